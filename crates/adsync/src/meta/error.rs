//! Error types for Meta Graph API operations.

use thiserror::Error;

use crate::entity::Platform;
use crate::http::HttpError;
use crate::platform::PlatformError;

/// Errors that can occur when interacting with the Meta Graph API.
#[derive(Debug, Error)]
pub enum MetaError {
    /// Transport-level failure. Never normalized into an API error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A success response whose body failed to parse.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Normalized platform error, built from the Graph error envelope.
    #[error("Meta API Error: {message} (code: {code})")]
    Api { message: String, code: String },

    /// Rate limit response; carries the raw body so the envelope can be
    /// normalized once the retry budget runs out.
    #[error("Meta rate limited")]
    RateLimited { body: Vec<u8> },

    /// Retry budget exhausted without a recognizable error envelope.
    #[error("Meta: max retries exceeded")]
    MaxRetries,
}

impl MetaError {
    /// Build a normalized API error, substituting the documented
    /// placeholders for absent envelope fields.
    #[must_use]
    pub fn api(message: Option<String>, code: Option<String>) -> Self {
        Self::Api {
            message: message.unwrap_or_else(|| "Unknown error".to_string()),
            code: code.unwrap_or_else(|| "unknown".to_string()),
        }
    }

    /// Resolve a rate-limited final error after retries are exhausted:
    /// with a recognizable envelope it becomes the normalized API error,
    /// without one it becomes the generic max-retries condition.
    #[must_use]
    pub fn into_exhausted(self) -> Self {
        match self {
            Self::RateLimited { body } => match parse_error_envelope(&body) {
                Some((message, code)) => Self::api(message, code),
                None => Self::MaxRetries,
            },
            other => other,
        }
    }
}

/// Check if an error is a rate limit error (retryable).
#[must_use]
pub fn is_rate_limit_error(err: &MetaError) -> bool {
    matches!(err, MetaError::RateLimited { .. })
}

/// Extract `(message, code)` from a Graph error envelope
/// `{"error": {"message": ..., "code": ...}}`.
///
/// Returns `None` when the body is not JSON or carries no `error` key.
#[must_use]
pub fn parse_error_envelope(body: &[u8]) -> Option<(Option<String>, Option<String>)> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let error = value.get("error")?;
    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .map(ToString::to_string);
    let code = error.get("code").map(|c| match c {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    });
    Some((message, code))
}

/// Graph rate limiting: HTTP 429, or the throttling error codes 17/32
/// that arrive on a 400.
#[must_use]
pub fn is_rate_limit_response(status: u16, body: &[u8]) -> bool {
    if status == 429 {
        return true;
    }
    matches!(
        parse_error_envelope(body),
        Some((_, Some(code))) if code == "17" || code == "32"
    )
}

impl From<MetaError> for PlatformError {
    fn from(err: MetaError) -> Self {
        match err {
            MetaError::Http(e) => PlatformError::Transport(e),
            MetaError::Json(e) => PlatformError::api(
                Platform::Meta,
                Some(format!("invalid JSON response: {e}")),
                None,
            ),
            MetaError::Api { message, code } => PlatformError::Api {
                platform: Platform::Meta,
                message,
                code,
            },
            MetaError::RateLimited { .. } => PlatformError::RateLimited {
                platform: Platform::Meta,
                retry_after: None,
            },
            MetaError::MaxRetries => PlatformError::MaxRetriesExceeded {
                platform: Platform::Meta,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_envelope() {
        let body = br#"{"error": {"message": "Invalid token", "code": 190}}"#;
        let (message, code) = parse_error_envelope(body).expect("envelope");
        assert_eq!(message.as_deref(), Some("Invalid token"));
        assert_eq!(code.as_deref(), Some("190"));
    }

    #[test]
    fn test_parse_error_envelope_missing_fields() {
        let body = br#"{"error": {}}"#;
        let (message, code) = parse_error_envelope(body).expect("envelope");
        assert!(message.is_none());
        assert!(code.is_none());
    }

    #[test]
    fn test_parse_error_envelope_not_json() {
        assert!(parse_error_envelope(b"<html>").is_none());
        assert!(parse_error_envelope(br#"{"no_error": 1}"#).is_none());
    }

    #[test]
    fn test_api_error_substitutes_placeholders() {
        let err = MetaError::api(None, None);
        assert_eq!(err.to_string(), "Meta API Error: Unknown error (code: unknown)");
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(is_rate_limit_response(429, b""));
        assert!(is_rate_limit_response(
            400,
            br#"{"error": {"message": "limit", "code": 17}}"#
        ));
        assert!(is_rate_limit_response(
            400,
            br#"{"error": {"message": "limit", "code": 32}}"#
        ));
        assert!(!is_rate_limit_response(
            400,
            br#"{"error": {"message": "bad", "code": 100}}"#
        ));
    }

    #[test]
    fn test_into_exhausted_with_envelope() {
        let err = MetaError::RateLimited {
            body: br#"{"error": {"message": "User request limit reached", "code": 17}}"#.to_vec(),
        };
        assert_eq!(
            err.into_exhausted().to_string(),
            "Meta API Error: User request limit reached (code: 17)"
        );
    }

    #[test]
    fn test_into_exhausted_without_envelope() {
        let err = MetaError::RateLimited { body: Vec::new() };
        assert!(matches!(err.into_exhausted(), MetaError::MaxRetries));
    }

    #[test]
    fn test_to_platform_error() {
        let api: PlatformError = MetaError::api(Some("boom".into()), Some("1".into())).into();
        assert_eq!(api.to_string(), "Meta API Error: boom (code: 1)");

        let transport: PlatformError =
            MetaError::Http(HttpError::Transport("connection reset".into())).into();
        assert!(matches!(transport, PlatformError::Transport(_)));
    }
}
