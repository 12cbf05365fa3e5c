//! In-memory collaborators for tests and demos.
//!
//! - [`MockPhotoApi`]: scripted backend with gated responses and a call log
//! - [`InMemoryStorage`]: HashMap-backed session storage

use crate::environment::AppEnvironment;
use crate::session::SessionStore;
use std::sync::Arc;

mod api;
mod storage;

pub use api::{ApiCall, Gate, MockPhotoApi};
pub use storage::InMemoryStorage;

/// Session key used by the test environments
pub const TEST_SESSION_KEY: &str = "currentUser";

/// An environment backed by `api` and `storage`
#[must_use]
pub fn mock_environment(api: Arc<MockPhotoApi>, storage: InMemoryStorage) -> AppEnvironment {
    AppEnvironment::new(api, SessionStore::new(Arc::new(storage), TEST_SESSION_KEY))
}

/// An environment with nothing scripted and empty storage
#[must_use]
pub fn test_environment() -> AppEnvironment {
    mock_environment(Arc::new(MockPhotoApi::new()), InMemoryStorage::new())
}
