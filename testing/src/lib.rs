//! # Photo Annotator Testing
//!
//! Testing utilities and helpers for the photo annotator state container.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Assertion helpers for effect lists
//! - [`collect_actions`]: Runs effect descriptions and returns the actions they produce
//!
//! ## Example
//!
//! ```ignore
//! use annotator_testing::collect_actions;
//!
//! #[tokio::test]
//! async fn licences_load() {
//!     let env = test_environment();
//!     let effects = AppEffects::new().handle(&state, &SearchActions.request_licenses(), &env);
//!
//!     let actions = collect_actions(effects).await;
//!     assert_eq!(actions.len(), 1);
//! }
//! ```

use annotator_core::effect::Effect;
use futures::future::{BoxFuture, FutureExt, join_all};


pub use reducer_test::{ReducerTest, assertions};

/// Execute effects without a store and collect the produced actions
///
/// `Future` effects are awaited, `Parallel` children run concurrently and
/// their actions are returned in declaration order. Produced actions are
/// not fed back anywhere.
pub async fn collect_actions<A, I>(effects: I) -> Vec<A>
where
    A: Send + 'static,
    I: IntoIterator<Item = Effect<A>>,
{
    let runs: Vec<_> = effects.into_iter().map(run_effect).collect();
    join_all(runs).await.into_iter().flatten().collect()
}

fn run_effect<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
    match effect {
        Effect::None => async { Vec::new() }.boxed(),
        Effect::Future(fut) => async move { fut.await.into_iter().collect() }.boxed(),
        Effect::Parallel(children) => async move {
            let runs: Vec<_> = children.into_iter().map(run_effect).collect();
            join_all(runs).await.into_iter().flatten().collect()
        }
        .boxed(),
    }
}
