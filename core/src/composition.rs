//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//! - **`with_effects`**: Run an effect handler after a reducer has applied an action
//!
//! # Examples
//!
//! ```
//! use annotator_core::{Effects, SmallVec};
//! use annotator_core::composition::{combine_reducers, scope_reducer};
//! use annotator_core::reducer::Reducer;
//!
//! #[derive(Clone, Default)]
//! struct LayoutState {
//!     columns: u8,
//! }
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     layout: LayoutState,
//!     title: String,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     SetColumns(u8),
//!     Rename(String),
//! }
//!
//! struct LayoutReducer;
//! struct TitleReducer;
//!
//! impl Reducer for LayoutReducer {
//!     type State = LayoutState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut LayoutState, action: AppAction, _env: &()) -> Effects<AppAction> {
//!         if let AppAction::SetColumns(columns) = action {
//!             state.columns = columns;
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! impl Reducer for TitleReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> Effects<AppAction> {
//!         if let AppAction::Rename(title) = action {
//!             state.title = title;
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let combined = combine_reducers(vec![
//!     Box::new(scope_reducer(
//!         LayoutReducer,
//!         |app: &AppState| &app.layout,
//!         |app: &mut AppState, layout| app.layout = layout,
//!     )),
//!     Box::new(TitleReducer),
//! ]);
//!
//! let mut state = AppState::default();
//! let _ = combined.reduce(&mut state, AppAction::SetColumns(4), &());
//! assert_eq!(state.layout.columns, 4);
//! ```

use crate::Effects;
use crate::handler::EffectHandler;
use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence with a clone of the action, and all effects
/// are collected and concatenated. This is how every slice reducer observes the
/// one dispatched action stream.
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether the combination holds no reducers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let mut all_effects = Effects::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a slice of a larger state.
///
/// The slice is cloned out, reduced and written back. For slices held behind an
/// `Arc` the clone is a reference-count bump, and a reducer that ignores the
/// action writes the very same pointer back.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn() -> (A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let mut sub_state = (self.get_state)(state).clone();

        let effects = self.reducer.reduce(&mut sub_state, action, env);

        (self.set_state)(state, sub_state);

        effects
    }
}

/// Attaches an effect handler to a reducer.
///
/// The reducer runs first; the handler then sees the updated state and the
/// same action and contributes its effects. Because the Store only spawns
/// effects after `reduce` returns, a follow-up action can never overtake the
/// action that triggered it.
pub const fn with_effects<R, H>(reducer: R, handler: H) -> ReducerWithEffects<R, H>
where
    R: Reducer,
    H: EffectHandler<State = R::State, Action = R::Action, Environment = R::Environment>,
{
    ReducerWithEffects { reducer, handler }
}

/// A reducer followed by an effect handler.
///
/// Created by [`with_effects`].
pub struct ReducerWithEffects<R, H> {
    reducer: R,
    handler: H,
}

impl<R, H> Reducer for ReducerWithEffects<R, H>
where
    R: Reducer,
    R::Action: Clone,
    H: EffectHandler<State = R::State, Action = R::Action, Environment = R::Environment>,
{
    type State = R::State;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let mut effects = self.reducer.reduce(state, action.clone(), env);
        effects.extend(self.handler.handle(state, &action, env));
        effects
    }
}
