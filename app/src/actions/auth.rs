//! Login session actions.

use super::AppAction;
use crate::models::{Password, Session};
use annotator_core::action::Action;
use serde::{Deserialize, Serialize};

/// Login session action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum AuthAction {
    /// Exchange credentials for a token.
    #[serde(rename = "[Auth] Login")]
    Login {
        /// Login name
        username: String,
        /// Password, redacted in debug output
        password: Password,
    },

    /// Login succeeded and the session was persisted.
    #[serde(rename = "[Auth] Login Complete")]
    LoginComplete {
        /// The new session
        session: Session,
    },

    /// Login failed.
    #[serde(rename = "[Auth] Login Failed")]
    LoginFailed {
        /// Human-readable error
        error: String,
    },

    /// Read the persisted session, if any.
    #[serde(rename = "[Auth] Restore Session")]
    RestoreSession {},

    /// Persisted session read.
    #[serde(rename = "[Auth] Session Restored")]
    SessionRestored {
        /// The stored session, `None` when logged out
        session: Option<Session>,
    },

    /// End the session.
    #[serde(rename = "[Auth] Logout")]
    Logout {},

    /// Session ended and removed from storage.
    #[serde(rename = "[Auth] Logout Complete")]
    LogoutComplete {},
}

impl Action for AuthAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::Login { .. } => AuthActions::LOGIN,
            Self::LoginComplete { .. } => AuthActions::LOGIN_COMPLETE,
            Self::LoginFailed { .. } => AuthActions::LOGIN_FAILED,
            Self::RestoreSession {} => AuthActions::RESTORE_SESSION,
            Self::SessionRestored { .. } => AuthActions::SESSION_RESTORED,
            Self::Logout {} => AuthActions::LOGOUT,
            Self::LogoutComplete {} => AuthActions::LOGOUT_COMPLETE,
        }
    }
}

/// Factory for login session actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthActions;

impl AuthActions {
    /// Type tag of [`AuthAction::Login`]
    pub const LOGIN: &'static str = "[Auth] Login";
    /// Type tag of [`AuthAction::LoginComplete`]
    pub const LOGIN_COMPLETE: &'static str = "[Auth] Login Complete";
    /// Type tag of [`AuthAction::LoginFailed`]
    pub const LOGIN_FAILED: &'static str = "[Auth] Login Failed";
    /// Type tag of [`AuthAction::RestoreSession`]
    pub const RESTORE_SESSION: &'static str = "[Auth] Restore Session";
    /// Type tag of [`AuthAction::SessionRestored`]
    pub const SESSION_RESTORED: &'static str = "[Auth] Session Restored";
    /// Type tag of [`AuthAction::Logout`]
    pub const LOGOUT: &'static str = "[Auth] Logout";
    /// Type tag of [`AuthAction::LogoutComplete`]
    pub const LOGOUT_COMPLETE: &'static str = "[Auth] Logout Complete";

    /// Log in with `username` and `password`
    #[must_use]
    pub fn login(self, username: impl Into<String>, password: impl Into<String>) -> AppAction {
        AppAction::Auth(AuthAction::Login {
            username: username.into(),
            password: Password::new(password),
        })
    }

    /// Login succeeded
    #[must_use]
    pub fn login_complete(self, session: &Session) -> AppAction {
        AppAction::Auth(AuthAction::LoginComplete {
            session: session.clone(),
        })
    }

    /// Login failed
    #[must_use]
    pub fn login_failed(self, error: impl Into<String>) -> AppAction {
        AppAction::Auth(AuthAction::LoginFailed { error: error.into() })
    }

    /// Read the persisted session
    #[must_use]
    pub const fn restore_session(self) -> AppAction {
        AppAction::Auth(AuthAction::RestoreSession {})
    }

    /// Persisted session read
    #[must_use]
    pub fn session_restored(self, session: Option<&Session>) -> AppAction {
        AppAction::Auth(AuthAction::SessionRestored {
            session: session.cloned(),
        })
    }

    /// End the session
    #[must_use]
    pub const fn logout(self) -> AppAction {
        AppAction::Auth(AuthAction::Logout {})
    }

    /// Session ended
    #[must_use]
    pub const fn logout_complete(self) -> AppAction {
        AppAction::Auth(AuthAction::LogoutComplete {})
    }
}
