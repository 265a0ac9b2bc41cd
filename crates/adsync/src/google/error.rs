//! Error types for Google Ads API operations.

use thiserror::Error;

use crate::entity::Platform;
use crate::http::HttpError;
use crate::platform::PlatformError;

/// Errors that can occur when interacting with the Google Ads API.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Transport-level failure. Never normalized into an API error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A success response whose body failed to parse.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Normalized platform error, built from the Google error envelope.
    #[error("Google API Error: {message} (code: {code})")]
    Api { message: String, code: String },

    /// Rate limit response; carries the raw body so the envelope can be
    /// normalized once the retry budget runs out.
    #[error("Google rate limited")]
    RateLimited { body: Vec<u8> },

    /// Retry budget exhausted without a recognizable error envelope.
    #[error("Google: max retries exceeded")]
    MaxRetries,
}

impl GoogleError {
    /// Build a normalized API error with placeholder substitution.
    #[must_use]
    pub fn api(message: Option<String>, code: Option<String>) -> Self {
        Self::Api {
            message: message.unwrap_or_else(|| "Unknown error".to_string()),
            code: code.unwrap_or_else(|| "unknown".to_string()),
        }
    }

    /// Resolve a rate-limited final error after retries are exhausted.
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
pub fn is_rate_limit_error(err: &GoogleError) -> bool {
    matches!(err, GoogleError::RateLimited { .. })
}

/// Extract `(message, code)` from a Google error envelope
/// `{"error": {"code": 403, "message": ..., "status": "..."}}`.
///
/// The string `status` (e.g. `RESOURCE_EXHAUSTED`) is preferred as the
/// code; the numeric `code` is the fallback.
#[must_use]
pub fn parse_error_envelope(body: &[u8]) -> Option<(Option<String>, Option<String>)> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let error = value.get("error")?;
    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .map(ToString::to_string);
    let code = error
        .get("status")
        .and_then(|s| s.as_str())
        .map(ToString::to_string)
        .or_else(|| error.get("code").map(|c| c.to_string()));
    Some((message, code))
}

/// Google rate limiting: HTTP 429 or a RESOURCE_EXHAUSTED status.
#[must_use]
pub fn is_rate_limit_response(status: u16, body: &[u8]) -> bool {
    if status == 429 {
        return true;
    }
    matches!(
        parse_error_envelope(body),
        Some((_, Some(code))) if code == "RESOURCE_EXHAUSTED"
    )
}

impl From<GoogleError> for PlatformError {
    fn from(err: GoogleError) -> Self {
        match err {
            GoogleError::Http(e) => PlatformError::Transport(e),
            GoogleError::Json(e) => PlatformError::api(
                Platform::Google,
                Some(format!("invalid JSON response: {e}")),
                None,
            ),
            GoogleError::Api { message, code } => PlatformError::Api {
                platform: Platform::Google,
                message,
                code,
            },
            GoogleError::RateLimited { .. } => PlatformError::RateLimited {
                platform: Platform::Google,
                retry_after: None,
            },
            GoogleError::MaxRetries => PlatformError::MaxRetriesExceeded {
                platform: Platform::Google,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_envelope_prefers_status_string() {
        let body = br#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let (message, code) = parse_error_envelope(body).expect("envelope");
        assert_eq!(message.as_deref(), Some("Quota exceeded"));
        assert_eq!(code.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_parse_error_envelope_falls_back_to_numeric_code() {
        let body = br#"{"error": {"code": 400, "message": "Bad request"}}"#;
        let (_, code) = parse_error_envelope(body).expect("envelope");
        assert_eq!(code.as_deref(), Some("400"));
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(is_rate_limit_response(429, b""));
        assert!(is_rate_limit_response(
            403,
            br#"{"error": {"message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#
        ));
        assert!(!is_rate_limit_response(
            403,
            br#"{"error": {"message": "denied", "status": "PERMISSION_DENIED"}}"#
        ));
    }

    #[test]
    fn test_into_exhausted() {
        let with_envelope = GoogleError::RateLimited {
            body: br#"{"error": {"message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#
                .to_vec(),
        };
        assert_eq!(
            with_envelope.into_exhausted().to_string(),
            "Google API Error: Quota exceeded (code: RESOURCE_EXHAUSTED)"
        );

        let without = GoogleError::RateLimited { body: Vec::new() };
        assert!(matches!(without.into_exhausted(), GoogleError::MaxRetries));
    }
}
