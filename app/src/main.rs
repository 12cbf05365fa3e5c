//! Annotator demo binary
//!
//! Composition root: loads configuration, wires the HTTP backend and the
//! session file into the store, then restores the session and loads the
//! licence list and saved images.
//!
//! Run with: `cargo run --bin annotator`
//! Configure with `ANNOTATOR_*` variables (a `.env` file is honoured).

use annotator_app::actions::Actions;
use annotator_app::api::HttpPhotoApi;
use annotator_app::config::ClientConfig;
use annotator_app::models::ImageState;
use annotator_app::monitor::spawn_action_logger;
use annotator_app::session::{FileSessionStorage, SessionStore};
use annotator_app::{AppEnvironment, build_store, selectors};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = ClientConfig::from_env().context("reading configuration")?;
    config.validate().context("validating configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting annotator client");

    let storage = Arc::new(FileSessionStorage::new(config.session_path.clone()));
    let sessions = SessionStore::new(storage, config.session_key.clone());
    let api = HttpPhotoApi::from_config(&config, sessions.clone()).context("building HTTP client")?;
    let store = build_store(AppEnvironment::new(Arc::new(api), sessions));
    let logger = spawn_action_logger(&store);
    let actions = Actions::default();

    let timeout = config.request_timeout + Duration::from_secs(1);
    for action in [
        actions.auth.restore_session(),
        actions.search.request_licenses(),
        actions.search.request_saved_images(ImageState::All),
    ] {
        let mut handle = store.send(action).await?;
        if handle.wait_with_timeout(timeout).await.is_err() {
            tracing::warn!("Gave up waiting for the backend");
        }
    }

    let (user, licences, saved, saved_total, error) = store
        .state(|state| {
            (
                selectors::current_user(state).map(str::to_string),
                state.search.licenses.len(),
                state.search.saved_images.len(),
                state.search.saved_total,
                state.search.error.clone(),
            )
        })
        .await;

    println!("User:          {}", user.as_deref().unwrap_or("(not logged in)"));
    println!("Licences:      {licences}");
    println!("Saved images:  {saved} of {saved_total}");
    if let Some(error) = error {
        println!("Last error:    {error}");
    }

    store.shutdown_default().await?;
    drop(store);
    let _ = tokio::time::timeout(Duration::from_secs(1), logger).await;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "annotator_app=info,annotator_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
