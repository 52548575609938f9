//! Error types for link management.

use crate::link::LinkId;
use thiserror::Error;

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// No link with this ID exists in the store.
    #[error("link not found: {0}")]
    NotFound(LinkId),

    /// URL is not an absolute http(s) URL.
    #[error("invalid link URL: {0}")]
    InvalidUrl(String),

    /// Title is empty or whitespace.
    #[error("link title is required")]
    EmptyTitle,

    /// Expired links cannot be paused or resumed.
    #[error("link {0} has expired")]
    Expired(LinkId),

    /// Clicks are only counted on active links.
    #[error("link {0} is not active")]
    NotActive(LinkId),
}
