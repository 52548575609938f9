//! Checks run before a request is sent. A failure never reaches the network.

use crate::error::{ApiError, ApiResult};

pub(crate) fn required(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn email(field: &str, value: &str) -> ApiResult<()> {
    required(field, value)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ApiError::Validation(format!(
            "{field} must be a valid email address"
        ))),
    }
}

pub(crate) fn price(value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::Validation(
            "price must be zero or a positive amount".into(),
        ));
    }
    Ok(())
}
