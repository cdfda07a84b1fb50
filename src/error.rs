//! Error taxonomy shared by gateways and services.
//!
//! The service layer never panics on bad server data and never retries on its
//! own: every operation resolves with `Ok` or a typed [`AppError`], and a
//! failed operation leaves local state untouched.

use serde_json::{Value, json};
use thiserror::Error;

/// Application-level error for every networked and local operation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Token refresh failed. The operation aborts before any network call.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure (connection, DNS, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Input rejected before reaching the network.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A lookup by short URL matched nothing.
    #[error("{message}")]
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// True when the failure came from the server or the wire rather than
    /// from local validation.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Decode(e.to_string());
        }

        if let Some(status) = e.status() {
            return Self::Status {
                code: status.as_u16(),
                message: e.to_string(),
            };
        }

        Self::Transport(e.to_string())
    }
}

/// Maps a JSON field that was expected but missing to a [`AppError::Decode`].
pub fn missing_field(field: &str) -> AppError {
    AppError::Decode(format!("response is missing required field '{field}'"))
}

/// Shortcut for validation errors that carry the offending value.
pub fn invalid_value(message: impl Into<String>, value: impl Into<Value>) -> AppError {
    AppError::bad_request(message, json!({ "value": value.into() }))
}
