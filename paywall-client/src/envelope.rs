//! Unwrapping of `{success, data, message}` response envelopes.

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Unwraps an envelope, or accepts a bare payload.
///
/// `success: false` becomes [`ApiError::Api`] with the envelope's message.
/// A missing, null or mis-shaped payload degrades to `T::default()`, so list
/// and aggregate views render empty instead of failing.
pub fn unwrap_envelope<T>(body: Value) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    let payload = take_payload(body)?;
    if payload.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(payload) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(
                "Unexpected {} payload, using empty default: {e}",
                std::any::type_name::<T>()
            );
            Ok(T::default())
        }
    }
}

/// Like [`unwrap_envelope`], but a missing or mis-shaped record is an error.
pub fn unwrap_record<T>(body: Value) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let payload = take_payload(body)?;
    if payload.is_null() {
        return Err(ApiError::InvalidResponse(format!(
            "missing {}",
            std::any::type_name::<T>()
        )));
    }
    serde_json::from_value(payload).map_err(|e| {
        ApiError::InvalidResponse(format!("{}: {e}", std::any::type_name::<T>()))
    })
}

fn take_payload(body: Value) -> ApiResult<Value> {
    match body {
        Value::Object(mut map) if map.contains_key("success") || map.contains_key("data") => {
            let success = map.get("success").and_then(Value::as_bool).unwrap_or(true);
            if !success {
                let message = map
                    .get("message")
                    .or_else(|| map.get("error"))
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Request failed")
                    .to_string();
                return Err(ApiError::Api(message));
            }
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}
