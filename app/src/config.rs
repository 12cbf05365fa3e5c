//! Client configuration.
//!
//! Loaded from `ANNOTATOR_*` environment variables (a `.env` file is read
//! first by the binary) with defaults matching a local development backend.
//!
//! # Example
//!
//! ```no_run
//! use annotator_app::config::ClientConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! config.validate()?;
//! println!("Backend: {}", config.api_url);
//! # Ok(())
//! # }
//! ```

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names
pub mod vars {
    /// Base URL of the REST API
    pub const API_URL: &str = "ANNOTATOR_API_URL";
    /// Base URL of the login/logout endpoints
    pub const AUTH_URL: &str = "ANNOTATOR_AUTH_URL";
    /// Key of the session blob in session storage
    pub const SESSION_KEY: &str = "ANNOTATOR_SESSION_KEY";
    /// File backing the session storage
    pub const SESSION_PATH: &str = "ANNOTATOR_SESSION_PATH";
    /// Value of the `csrftoken` cookie
    pub const CSRF_TOKEN: &str = "ANNOTATOR_CSRF_TOKEN";
    /// Per-request timeout in seconds
    pub const TIMEOUT_SECS: &str = "ANNOTATOR_TIMEOUT_SECS";
}

/// Backend client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, with trailing slash
    pub api_url: String,
    /// Base URL of the auth endpoints, with trailing slash
    pub auth_url: String,
    /// Key under which the session blob is stored
    pub session_key: String,
    /// File backing the session storage
    pub session_path: PathBuf,
    /// CSRF token sent on mutating requests, when known
    pub csrf_token: Option<String>,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/v1/".to_string(),
            auth_url: "http://localhost:8000/auth/".to_string(),
            session_key: "currentUser".to_string(),
            session_path: PathBuf::from(".annotator-session.json"),
            csrf_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment
    ///
    /// Unset variables fall back to [`ClientConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let request_timeout = match non_empty(vars::TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    var: vars::TIMEOUT_SECS,
                    value: raw,
                })?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_url: non_empty(vars::API_URL).unwrap_or(defaults.api_url),
            auth_url: non_empty(vars::AUTH_URL).unwrap_or(defaults.auth_url),
            session_key: non_empty(vars::SESSION_KEY).unwrap_or(defaults.session_key),
            session_path: non_empty(vars::SESSION_PATH)
                .map_or(defaults.session_path, PathBuf::from),
            csrf_token: non_empty(vars::CSRF_TOKEN),
            request_timeout,
        })
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the auth base URL
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set the CSRF token
    #[must_use]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a base URL is not http(s) or lacks
    /// its trailing slash, the session key is empty, or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [("api_url", &self.api_url), ("auth_url", &self.auth_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be an http(s) URL, got {url}"
                )));
            }
            if !url.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{name} must end with '/', got {url}"
                )));
            }
        }
        if self.session_key.is_empty() {
            return Err(ConfigError::Validation("session_key cannot be empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Validation("request_timeout must be > 0".to_string()));
        }
        Ok(())
    }
}
