//! # Photo Annotator Client
//!
//! The client core of a Flickr photo search and annotation tool, built on
//! the unidirectional data flow of `annotator-core` and `annotator-runtime`:
//!
//! ```text
//! UI ──send──▶ Store ──reduce──▶ AppState ──select──▶ UI
//!                │
//!                └──▶ AppEffects ──▶ PhotoApi ──▶ follow-up action ──send──▶ Store
//! ```
//!
//! - [`actions`]: action enums and their factories
//! - [`reducers`]: one reducer per state slice, combined by [`reducers::app_reducer`]
//! - [`effects`]: backend calls triggered by applied actions
//! - [`selectors`]: read-only views of the state tree
//! - [`api`]: the backend collaborator and its HTTP implementation
//! - [`session`]: persisted login session and cookies
//! - `mocks`: in-memory collaborators for tests and demos, behind the
//!   `test-utils` feature
//!
//! # Example
//!
//! ```no_run
//! use annotator_app::api::HttpPhotoApi;
//! use annotator_app::config::ClientConfig;
//! use annotator_app::models::ImageState;
//! use annotator_app::session::{FileSessionStorage, SessionStore};
//! use annotator_app::{AppEnvironment, actions::Actions, build_store, selectors};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default();
//! let storage = Arc::new(FileSessionStorage::new("session.json"));
//! let sessions = SessionStore::new(storage, config.session_key.clone());
//! let api = HttpPhotoApi::from_config(&config, sessions.clone())?;
//! let store = build_store(AppEnvironment::new(Arc::new(api), sessions));
//! let actions = Actions::default();
//!
//! let mut done = store.send(actions.annotate.request_images(ImageState::All)).await?;
//! done.wait().await;
//!
//! let total = store.state(|state| selectors::total(state)).await;
//! # let _ = total;
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod effects;
pub mod environment;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
pub mod models;
pub mod monitor;
pub mod reducers;
pub mod selectors;
pub mod session;
pub mod state;

pub use actions::{Actions, AppAction};
pub use environment::AppEnvironment;
pub use reducers::{AppStore, app_reducer};
pub use state::AppState;

use annotator_runtime::{Store, StoreConfig};

/// Assemble the store with an empty state tree.
#[must_use]
pub fn build_store(env: AppEnvironment) -> AppStore {
    build_store_with_config(env, StoreConfig::default())
}

/// Assemble the store with a custom runtime configuration.
#[must_use]
pub fn build_store_with_config(env: AppEnvironment, config: StoreConfig) -> AppStore {
    Store::with_config(AppState::default(), app_reducer(), env, config)
}
