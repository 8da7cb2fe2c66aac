//! Error types for the Xeno SDK

use thiserror::Error;
use xeno_crm::{GatewayError, ParseError};

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Xeno SDK operations
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success status returned by the backend
    #[error("API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Segment conditions that do not decode into a condition group
    #[error("Malformed segment conditions: {0}")]
    Conditions(#[from] ParseError),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this is a not found error (404)
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, Error::Api { status_code: 404, .. })
    }
}

impl From<Error> for GatewayError {
    fn from(error: Error) -> Self {
        match error {
            Error::Api { status_code, message } => GatewayError::Rejected {
                status: status_code,
                message,
            },
            Error::Json(e) => GatewayError::Malformed(e.to_string()),
            Error::Conditions(e) => GatewayError::Malformed(e.to_string()),
            Error::Http(e) if e.is_decode() => GatewayError::Malformed(e.to_string()),
            other => GatewayError::Transport(other.to_string()),
        }
    }
}

/// Best-effort human message from an error body: the `message` field of a
/// JSON object, or the raw text
pub(crate) fn extract_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        if let Some(error) = value.get("error").and_then(|m| m.as_str()) {
            return error.to_string();
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "empty response body".to_string()
    } else {
        text
    }
}
