//! Login session reducer.

use crate::actions::{AppAction, AuthAction};
use crate::environment::AppEnvironment;
use crate::state::AuthState;
use annotator_core::{Effects, SmallVec, reducer::Reducer};
use std::sync::Arc;

/// Reducer for [`AuthState`].
///
/// Only tracks what the views need; the token itself lives in the session
/// store and never enters the state tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = Arc<AuthState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let AppAction::Auth(action) = action else {
            return SmallVec::new();
        };

        match action {
            AuthAction::Login { username, .. } => {
                let slice = Arc::make_mut(state);
                slice.username = Some(username);
                slice.pending = true;
                slice.error = None;
            },

            AuthAction::LoginComplete { session } => {
                let slice = Arc::make_mut(state);
                if session.username.is_some() {
                    slice.username = session.username;
                }
                slice.authenticated = true;
                slice.pending = false;
            },

            AuthAction::LoginFailed { error } => {
                let slice = Arc::make_mut(state);
                slice.authenticated = false;
                slice.pending = false;
                slice.error = Some(error);
            },

            AuthAction::RestoreSession {} => {},

            AuthAction::SessionRestored { session } => {
                let slice = Arc::make_mut(state);
                slice.authenticated = session.is_some();
                slice.username = session.and_then(|session| session.username);
            },

            AuthAction::Logout {} => {
                Arc::make_mut(state).pending = true;
            },

            AuthAction::LogoutComplete {} => {
                *state = Arc::new(AuthState::default());
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AuthActions;
    use crate::mocks::test_environment;
    use crate::models::Session;

    const ACTIONS: AuthActions = AuthActions;

    fn reduce_all(actions: Vec<AppAction>) -> Arc<AuthState> {
        let env = test_environment();
        let mut state = Arc::new(AuthState::default());
        for action in actions {
            let _ = AuthReducer.reduce(&mut state, action, &env);
        }
        state
    }

    #[test]
    fn login_round_trip() {
        let pending = reduce_all(vec![ACTIONS.login("ana", "secret")]);
        assert!(pending.pending);
        assert!(!pending.authenticated);

        let done = reduce_all(vec![
            ACTIONS.login("ana", "secret"),
            ACTIONS.login_complete(&Session::new("tok")),
        ]);
        assert!(done.authenticated);
        assert!(!done.pending);
        assert_eq!(done.username.as_deref(), Some("ana"));
    }

    #[test]
    fn login_failure_keeps_user_logged_out() {
        let state = reduce_all(vec![
            ACTIONS.login("ana", "wrong"),
            ACTIONS.login_failed("Backend returned status 400: bad credentials"),
        ]);
        assert!(!state.authenticated);
        assert!(!state.pending);
        assert!(state.error.is_some());
    }

    #[test]
    fn restored_session_marks_authenticated() {
        let session = Session::new("tok").with_username("ana");
        let state = reduce_all(vec![ACTIONS.session_restored(Some(&session))]);
        assert!(state.authenticated);
        assert_eq!(state.username.as_deref(), Some("ana"));

        let state = reduce_all(vec![ACTIONS.session_restored(None)]);
        assert!(!state.authenticated);
    }

    #[test]
    fn logout_resets_the_slice() {
        let state = reduce_all(vec![
            ACTIONS.login("ana", "secret"),
            ACTIONS.login_complete(&Session::new("tok")),
            ACTIONS.logout(),
            ACTIONS.logout_complete(),
        ]);
        assert_eq!(*state, AuthState::default());
    }

    #[test]
    fn password_never_reaches_state() {
        let state = reduce_all(vec![ACTIONS.login("ana", "hunter2")]);
        assert!(!format!("{state:?}").contains("hunter2"));
    }
}
