//! Error types for the org client.

use std::time::Duration;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A path segment could not be resolved in a JSON document.
    ///
    /// Raised by the nested accessor for both "key absent" and "value is not
    /// an object but more path remains" — the two are deliberately not
    /// distinguished.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Resource not found (404).
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Authentication failed or token invalid.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Rate limit exceeded.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Response body could not be interpreted.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
