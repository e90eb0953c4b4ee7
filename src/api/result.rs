//! Normalized request outcomes.
//!
//! Every call through the request layer resolves to an [`ApiResult`]:
//! either the deserialized payload or the backend's error envelope, always
//! tagged with the HTTP status. Transport-level failures never reach this
//! type; they stay in the `Err` arm of the surrounding `Result`.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed diagnostic for a response body that could not be parsed or did
/// not match the expected payload shape.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response";

// ── Error envelope ───────────────────────────────────────────────

/// Application-level error envelope returned by the backend.
///
/// `details` maps field names to lists of validation messages, as the
/// backend's exception handler normalizes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable error code (e.g. `VALIDATION_ERROR`, `INVALID_CREDENTIALS`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Synthetic error for a non-2xx response without a parseable envelope.
    pub(crate) fn http_error(status: StatusCode) -> Self {
        Self {
            code: Some("HTTP_ERROR".to_string()),
            message: Some(
                status
                    .canonical_reason()
                    .unwrap_or("HTTP error")
                    .to_string(),
            ),
            details: None,
        }
    }

    /// Synthetic error for an unparseable or shape-mismatched body.
    pub(crate) fn invalid_json() -> Self {
        Self {
            code: None,
            message: Some(INVALID_JSON_MESSAGE.to_string()),
            details: None,
        }
    }

    /// Display message, or `fallback` when the envelope carried none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    }

    /// First validation message recorded for `field` in `details`.
    pub fn detail_message(&self, field: &str) -> Option<&str> {
        match self.details.as_ref()?.get(field)? {
            Value::Array(items) => items.first()?.as_str(),
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ── Request outcome ──────────────────────────────────────────────

/// Outcome of a request: the payload or the backend's error, never both.
#[derive(Debug, Clone)]
pub enum ApiResult<T> {
    /// 2xx response with a decoded payload.
    Success { status: StatusCode, data: T },
    /// HTTP failure, backend error envelope, or an undecodable body.
    Failure { status: StatusCode, error: ApiError },
}

impl<T> ApiResult<T> {
    /// Transport status code, present on both variants.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The payload, if this was a success.
    pub fn data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The error, if this was a failure.
    pub fn error(self) -> Option<ApiError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Transform the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Success { status, data } => ApiResult::Success {
                status,
                data: f(data),
            },
            Self::Failure { status, error } => ApiResult::Failure { status, error },
        }
    }
}

// ── Envelope normalization ───────────────────────────────────────

/// A response body after the one-time envelope unwrap.
#[derive(Debug)]
pub(crate) struct Envelope {
    /// The `data` field when the backend wrapped its payload, otherwise the
    /// whole body.
    pub payload: Value,
    /// The `error` field, when present and well-formed.
    pub error: Option<ApiError>,
}

/// Split a parsed body into payload and error exactly once, at the
/// boundary. Callers never look at the raw envelope again.
pub(crate) fn unwrap_envelope(mut body: Value) -> Envelope {
    let error = body
        .get("error")
        .and_then(|e| serde_json::from_value(e.clone()).ok());
    let payload = match body.get_mut("data") {
        Some(data) => data.take(),
        None => body,
    };
    Envelope { payload, error }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_prefers_data_field() {
        let env = unwrap_envelope(json!({"success": true, "data": {"id": 7}}));
        assert_eq!(env.payload, json!({"id": 7}));
        assert!(env.error.is_none());
    }

    #[test]
    fn envelope_falls_back_to_whole_body() {
        let env = unwrap_envelope(json!({"id": 7, "name": "case"}));
        assert_eq!(env.payload, json!({"id": 7, "name": "case"}));
    }

    #[test]
    fn envelope_extracts_error() {
        let env = unwrap_envelope(json!({
            "success": false,
            "error": {"code": "NOT_FOUND", "message": "Requested resource was not found."}
        }));
        let error = env.error.expect("error envelope");
        assert_eq!(error.code.as_deref(), Some("NOT_FOUND"));
        assert_eq!(
            error.message.as_deref(),
            Some("Requested resource was not found.")
        );
    }

    #[test]
    fn envelope_ignores_malformed_error_field() {
        let env = unwrap_envelope(json!({"error": "boom"}));
        assert!(env.error.is_none());
    }

    #[test]
    fn detail_message_reads_first_entry() {
        let error = ApiError {
            code: Some("VALIDATION_ERROR".into()),
            message: Some("Request validation failed.".into()),
            details: Some(json!({"identifier": ["Username already taken.", "second"]})),
        };
        assert_eq!(
            error.detail_message("identifier"),
            Some("Username already taken.")
        );
        assert_eq!(error.detail_message("password"), None);
    }

    #[test]
    fn detail_message_accepts_bare_string() {
        let error = ApiError {
            details: Some(json!({"identifier": "taken"})),
            ..ApiError::default()
        };
        assert_eq!(error.detail_message("identifier"), Some("taken"));
    }

    #[test]
    fn message_or_skips_empty_messages() {
        let error = ApiError {
            message: Some(String::new()),
            ..ApiError::default()
        };
        assert_eq!(error.message_or("fallback"), "fallback");
    }

    #[test]
    fn http_error_uses_canonical_reason() {
        let error = ApiError::http_error(StatusCode::FORBIDDEN);
        assert_eq!(error.code.as_deref(), Some("HTTP_ERROR"));
        assert_eq!(error.message.as_deref(), Some("Forbidden"));
    }

    #[test]
    fn map_transforms_success_only() {
        let ok: ApiResult<i32> = ApiResult::Success {
            status: StatusCode::OK,
            data: 2,
        };
        assert_eq!(ok.map(|n| n * 10).data(), Some(20));

        let failed: ApiResult<i32> = ApiResult::Failure {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::default(),
        };
        let mapped = failed.map(|n| n * 10);
        assert!(!mapped.is_success());
        assert_eq!(mapped.status(), StatusCode::BAD_REQUEST);
    }
}
