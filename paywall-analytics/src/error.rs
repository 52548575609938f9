//! Formatting errors.

use thiserror::Error;

/// Result type for formatting operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised by the strict formatting functions. The lenient variants
/// (`format_currency` and friends) never surface these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Currency code is not in the currency table.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Locale tag is not supported.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Value is NaN or infinite.
    #[error("value is not a finite number")]
    NonFinite,
}
