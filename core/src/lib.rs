//! # Photo Annotator Core
//!
//! Core traits and types for the photo annotator's unidirectional state container.
//!
//! The client keeps one state tree. Every user or network event becomes an
//! action; reducers turn `(state, action)` into the next state; effect handlers
//! look at the applied action and describe the asynchronous work (backend
//! calls) that should follow. The runtime crate executes those descriptions and
//! feeds the resulting actions back into the store.
//!
//! ## Core Concepts
//!
//! - **Action**: A tagged, immutable record of an intent or event
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect description (not execution)
//! - **Effect Handler**: Maps an applied action to effects
//! - **Environment**: Injected collaborators (backend API, session storage)
//!
//! ## Example
//!
//! ```ignore
//! use annotator_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct GalleryState {
//!     selected: Option<u64>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum GalleryAction {
//!     Select { id: u64 },
//!     Deselect,
//! }
//!
//! impl Reducer for GalleryReducer {
//!     type State = GalleryState;
//!     type Action = GalleryAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut GalleryState,
//!         action: GalleryAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<GalleryAction>; 4]> {
//!         match action {
//!             GalleryAction::Select { id } => state.selected = Some(id),
//!             GalleryAction::Deselect => state.selected = None,
//!         }
//!         SmallVec::new()
//!     }
//! }
//! ```

pub use smallvec::{SmallVec, smallvec};

/// Reducer composition utilities
pub mod composition;

/// Declarative macros for effect construction
mod effect_macros;

/// Effect list returned by reducers and effect handlers.
///
/// Most actions produce zero or one effect, so four inline slots avoid a heap
/// allocation on the hot dispatch path.
pub type Effects<A> = SmallVec<[effect::Effect<A>; 4]>;

/// Action module - tagged intent records
///
/// Actions represent every state transition in the system. Each action carries
/// a human-readable type tag (`"[Annotate] Select Image"`) that is unique
/// across the application and stable across serialization.
pub mod action {
    /// Common behavior of every action type.
    ///
    /// # Example
    ///
    /// ```
    /// use annotator_core::action::Action;
    ///
    /// #[derive(Clone, Debug)]
    /// enum GalleryAction {
    ///     Refresh,
    /// }
    ///
    /// impl Action for GalleryAction {
    ///     fn action_type(&self) -> &'static str {
    ///         match self {
    ///             Self::Refresh => "[Gallery] Refresh",
    ///         }
    ///     }
    /// }
    ///
    /// assert_eq!(GalleryAction::Refresh.action_type(), "[Gallery] Refresh");
    /// ```
    pub trait Action: Clone + Send + 'static {
        /// The globally unique type tag of this action
        fn action_type(&self) -> &'static str;
    }
}

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They are deterministic and never perform I/O themselves.
pub mod reducer {
    use super::Effects;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// A reducer must be total: actions it does not recognize leave the state
    /// untouched and produce no effects.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Effect handler module - bridges applied actions to asynchronous work
pub mod handler {
    use super::Effects;

    /// Maps an action that has already been applied to the state into effects.
    ///
    /// Handlers see the state *after* every reducer ran for the action, so a
    /// handler can read values the reducer just produced (for example the
    /// request token issued for a search).
    ///
    /// A handler should describe at most one backend call per action and turn
    /// its outcome into exactly one follow-up action.
    pub trait EffectHandler {
        /// The state type visible to the handler
        type State;

        /// The action type this handler observes and produces
        type Action;

        /// The environment type with injected collaborators
        type Environment;

        /// Produce the effects for an applied action
        fn handle(
            &self,
            state: &Self::State,
            action: &Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should
    /// happen, returned from reducers and effect handlers and executed by the
    /// Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the store
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}
