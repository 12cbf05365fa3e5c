//! Injected collaborators.

use crate::api::PhotoApi;
use crate::session::SessionStore;
use std::sync::Arc;

/// Everything effect handlers need from the outside world.
///
/// Built once by the composition root and owned by the store; reducers get
/// it too but never touch it.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Backend API
    pub api: Arc<dyn PhotoApi>,
    /// Persisted login session
    pub sessions: SessionStore,
}

impl AppEnvironment {
    /// Wire the collaborators
    #[must_use]
    pub fn new(api: Arc<dyn PhotoApi>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
