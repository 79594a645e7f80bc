//! Uniform result envelope for backend calls.
//!
//! The backend answers in several shapes: `{success, data}`, `{success,
//! message, credentials}`, bare arrays, bare objects, or an empty body. All
//! of them are folded into [`ApiResponse`] here so callers see one shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error reported when no response was received.
pub const NETWORK_ERROR: &str = "network error";

/// Normalized outcome of a backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Decoded payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message from the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response without a payload.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: None,
        }
    }

    /// Failed response with a reason.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Failure used when the backend could not be reached.
    #[must_use]
    pub fn network_error() -> Self {
        Self::failure(NETWORK_ERROR)
    }

    /// Attaches an informational message.
    #[must_use]
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Returns true if the call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the payload of a successful call.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }

    /// Returns the failure reason, falling back to `default`.
    #[must_use]
    pub fn error_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.error.as_deref().unwrap_or(default)
    }

    /// Converts the payload while keeping the envelope fields.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
        }
    }

    /// Converts into a `Result`, using the error text on failure.
    ///
    /// # Errors
    ///
    /// Returns the failure reason when the call did not succeed or carried
    /// no payload.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("response carried no data".to_string()),
            (false, _) => Err(self.error.unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

fn string_field(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Folds an HTTP status and raw body into an envelope.
///
/// - non-2xx: failure with the body's `error`, else `message`, else `HTTP <status>`
/// - 2xx, empty body: success without data
/// - 2xx, object with boolean `success`: passed through; `data` is the body's
///   `data` field when present, otherwise the whole body
/// - 2xx, anything else: the body itself is the data
#[must_use]
pub fn normalize<T: DeserializeOwned>(status: u16, body: &[u8]) -> ApiResponse<T> {
    let parsed = serde_json::from_slice::<Value>(body);

    if !(200..300).contains(&status) {
        let error = parsed
            .ok()
            .and_then(|body| string_field(&body, "error").or_else(|| string_field(&body, "message")))
            .unwrap_or_else(|| format!("HTTP {status}"));
        return ApiResponse::failure(error);
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return ApiResponse::empty();
    }

    let body = match parsed {
        Ok(body) => body,
        Err(e) => return ApiResponse::failure(format!("failed to parse response: {e}")),
    };

    let message = string_field(&body, "message");

    let (success, payload) = match body.get("success").and_then(Value::as_bool) {
        Some(success) => {
            let payload = match body.get("data") {
                Some(data) if !data.is_null() => data.clone(),
                _ => body.clone(),
            };
            (success, payload)
        }
        None => (true, body),
    };

    if !success {
        let error = string_field(&payload, "error")
            .or_else(|| message.clone())
            .unwrap_or_else(|| "request failed".to_string());
        return ApiResponse::failure(error).with_message(message);
    }

    match serde_json::from_value::<T>(payload) {
        Ok(data) => ApiResponse::ok(data).with_message(message),
        Err(e) => ApiResponse::failure(format!("failed to parse response: {e}")),
    }
}
