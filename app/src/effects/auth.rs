//! Login session effects.
//!
//! The session store is the source of truth for the token: login writes it,
//! logout removes it, and the HTTP client reads it on every call.

use super::report;
use crate::actions::{AppAction, AuthAction, AuthActions};
use crate::environment::AppEnvironment;
use annotator_core::{Effects, SmallVec, async_effect, smallvec};
use std::sync::Arc;

const ACTIONS: AuthActions = AuthActions;

pub(super) fn handle(action: &AuthAction, env: &AppEnvironment) -> Effects<AppAction> {
    match action {
        AuthAction::Login { username, password } => {
            let api = Arc::clone(&env.api);
            let sessions = env.sessions.clone();
            let username = username.clone();
            let password = password.clone();
            smallvec![async_effect! {
                let session = match api.login(&username, password.expose()).await {
                    Ok(session) => session,
                    Err(error) => return Some(ACTIONS.login_failed(report("login", &error))),
                };
                if let Err(error) = sessions.save(&session).await {
                    tracing::error!(error = %error, "Could not persist session");
                    return Some(ACTIONS.login_failed(error.to_string()));
                }
                tracing::info!(username = %username, "Logged in");
                Some(ACTIONS.login_complete(&session))
            }]
        },

        AuthAction::RestoreSession {} => {
            let sessions = env.sessions.clone();
            smallvec![async_effect! {
                let session = sessions.load().await;
                Some(ACTIONS.session_restored(session.as_ref()))
            }]
        },

        AuthAction::Logout {} => {
            let api = Arc::clone(&env.api);
            let sessions = env.sessions.clone();
            smallvec![async_effect! {
                // The local session goes away even when the backend refuses
                if let Err(error) = api.logout().await {
                    let _ = report("logout", &error);
                }
                if let Err(error) = sessions.clear().await {
                    tracing::error!(error = %error, "Could not remove session");
                }
                Some(ACTIONS.logout_complete())
            }]
        },

        _ => SmallVec::new(),
    }
}
