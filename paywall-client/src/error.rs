//! Client error types.
//!
//! [`ApiError`] is the normalized error every service method returns. Callers
//! render [`ApiError::message`] (or the serializable [`ErrorMessage`]) without
//! caring whether the failure came from the network, the backend or local
//! validation.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// Non-success HTTP status with the backend's message.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The envelope reported `success: false`.
    #[error("{0}")]
    Api(String),

    /// A 401 persisted after the token was refreshed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Credentials could not be refreshed and were cleared.
    #[error("session expired, please log in again")]
    SessionExpired,

    #[error("rate limited, try again later")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// A single-record response did not contain the expected record.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("token storage error: {0}")]
    Storage(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl ApiError {
    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Converts into the minimal serializable error object.
    #[must_use]
    pub fn to_error_message(&self) -> ErrorMessage {
        ErrorMessage::new(self.message())
    }

    /// HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized(_) | ApiError::SessionExpired => Some(401),
            ApiError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns true if this error represents a 429 rate-limit response.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    /// Returns the retry-after duration if this is a rate-limit error.
    #[must_use]
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            ApiError::RateLimited {
                retry_after_secs: Some(secs),
            } => Some(std::time::Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// Returns true if the user has to sign in again.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::SessionExpired)
    }
}

/// The `{message}` object views render on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&ApiError> for ErrorMessage {
    fn from(e: &ApiError) -> Self {
        e.to_error_message()
    }
}

impl From<ApiError> for ErrorMessage {
    fn from(e: ApiError) -> Self {
        e.to_error_message()
    }
}

/// Extracts the backend's message from an error body.
///
/// Looks for an `error` or `message` field (an `error` object with its own
/// `message` also counts), then falls back to a short plain-text body, then
/// to the status reason.
pub(crate) fn message_from_body(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidates = [
            json.get("error").and_then(Value::as_str),
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str),
            json.get("message").and_then(Value::as_str),
        ];
        if let Some(message) = candidates.into_iter().flatten().find(|m| !m.is_empty()) {
            return message.to_string();
        }
    }

    let text = body.trim();
    if !text.is_empty() && text.len() <= 200 && !text.starts_with('<') && !text.starts_with('{') {
        return text.to_string();
    }

    status
        .canonical_reason()
        .map_or_else(|| format!("request failed with status {}", status.as_u16()), str::to_string)
}
