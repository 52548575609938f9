//! The `{success, data, message}` wrapper used by backend JSON responses.

use serde::{Deserialize, Serialize};

/// Response envelope returned by most backend endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend considers the call successful.
    #[serde(default = "default_success")]
    pub success: bool,
    /// The payload, absent on failures.
    pub data: Option<T>,
    /// Human-readable message, usually present on failures.
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    /// Wraps a successful payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Builds a failed envelope carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
