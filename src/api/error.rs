use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Unexpected error.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Backend { status: StatusCode, message: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),
}

impl ApiError {
    /// Text for a transient notification: the backend's own message when
    /// it sent one, otherwise the error description.
    pub fn user_message(&self) -> String {
        let message = match self {
            ApiError::Unauthorized(message) => message.clone(),
            ApiError::NotFound(message) | ApiError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Picks `message`, then `error` from a JSON error body, falling back to the
/// status reason phrase.
pub fn backend_message(status: StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or(parsed.error.filter(|e| !e.trim().is_empty()))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
