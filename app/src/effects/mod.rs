//! Effect handlers.
//!
//! [`AppEffects`] sees every action after all reducers applied it and returns
//! the backend work it asks for. Each effect makes one collaborator call and
//! resolves to exactly one follow-up action: the "complete" action on
//! success, the "failed" action otherwise. Failures are logged and counted
//! here, so nothing is dropped silently.

use crate::actions::AppAction;
use crate::environment::AppEnvironment;
use crate::error::ApiError;
use crate::state::AppState;
use annotator_core::{Effects, SmallVec, handler::EffectHandler};

mod annotate;
mod auth;
mod marking;
mod search;

/// Effect handler for the whole application.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppEffects;

impl AppEffects {
    /// Create the handler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EffectHandler for AppEffects {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn handle(&self, state: &AppState, action: &AppAction, env: &AppEnvironment) -> Effects<AppAction> {
        match action {
            AppAction::Annotate(action) => annotate::handle(state, action, env),
            AppAction::Search(action) => search::handle(state, action, env),
            AppAction::Auth(action) => auth::handle(action, env),
            AppAction::NudityCheck(action) => marking::handle(state, action, env),
            AppAction::CardLayout(_) | AppAction::Artboard(_) | AppAction::ObjectX(_) => SmallVec::new(),
        }
    }
}

/// Log and count a failed backend call, returning the message for the
/// "failed" action.
fn report(operation: &'static str, error: &ApiError) -> String {
    tracing::error!(operation, error = %error, "Backend call failed");
    metrics::counter!("annotator.api.failures", "operation" => operation).increment(1);
    error.to_string()
}
