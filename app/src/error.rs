//! Error types for the backend client, session storage and configuration.

use thiserror::Error;

/// Result type alias for backend calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors returned by a [`PhotoApi`](crate::api::PhotoApi) implementation.
///
/// `Clone` so scripted mock responses can hand out the same failure more
/// than once. Effect handlers turn these into the `error` string of a
/// "failed" action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// A URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the backend rejected the request as unauthenticated.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Errors from the persistent session storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data is not valid JSON.
    #[error("Session storage contains invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage lock was poisoned by a panicking writer.
    #[error("Session storage is unavailable")]
    Unavailable,
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}
