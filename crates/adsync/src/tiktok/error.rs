//! Error types for TikTok Business API operations.

use thiserror::Error;

use super::types::{CODE_RATE_LIMIT, Envelope};
use crate::entity::Platform;
use crate::http::HttpError;
use crate::platform::PlatformError;

/// Errors that can occur when interacting with the TikTok Business API.
#[derive(Debug, Error)]
pub enum TiktokError {
    /// Transport-level failure. Never normalized into an API error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A response body that failed to parse.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Normalized platform error, built from the response envelope.
    #[error("TikTok API Error: {message} (code: {code})")]
    Api { message: String, code: String },

    /// Rate limit signal (envelope code 40100 or HTTP 429); carries the
    /// raw body so the envelope can be normalized after exhaustion.
    #[error("TikTok rate limited")]
    RateLimited { body: Vec<u8> },

    /// Retry budget exhausted without a recognizable error envelope.
    #[error("TikTok: max retries exceeded")]
    MaxRetries,
}

impl TiktokError {
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
pub fn is_rate_limit_error(err: &TiktokError) -> bool {
    matches!(err, TiktokError::RateLimited { .. })
}

/// Extract `(message, code)` from a response envelope with a non-zero
/// code. Returns `None` when the body is not an envelope at all.
#[must_use]
pub fn parse_error_envelope(body: &[u8]) -> Option<(Option<String>, Option<String>)> {
    let envelope: Envelope = serde_json::from_slice(body).ok()?;
    Some((envelope.message, Some(envelope.code.to_string())))
}

/// Whether an envelope signals throttling.
#[must_use]
pub fn is_rate_limit_envelope(envelope: &Envelope) -> bool {
    envelope.code == CODE_RATE_LIMIT
}

impl From<TiktokError> for PlatformError {
    fn from(err: TiktokError) -> Self {
        match err {
            TiktokError::Http(e) => PlatformError::Transport(e),
            TiktokError::Json(e) => PlatformError::api(
                Platform::Tiktok,
                Some(format!("invalid JSON response: {e}")),
                None,
            ),
            TiktokError::Api { message, code } => PlatformError::Api {
                platform: Platform::Tiktok,
                message,
                code,
            },
            TiktokError::RateLimited { .. } => PlatformError::RateLimited {
                platform: Platform::Tiktok,
                retry_after: None,
            },
            TiktokError::MaxRetries => PlatformError::MaxRetriesExceeded {
                platform: Platform::Tiktok,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_envelope() {
        let body = br#"{"code": 40105, "message": "Invalid access token"}"#;
        let (message, code) = parse_error_envelope(body).expect("envelope");
        assert_eq!(message.as_deref(), Some("Invalid access token"));
        assert_eq!(code.as_deref(), Some("40105"));
    }

    #[test]
    fn test_parse_error_envelope_not_json() {
        assert!(parse_error_envelope(b"<html>").is_none());
    }

    #[test]
    fn test_into_exhausted() {
        let with_envelope = TiktokError::RateLimited {
            body: br#"{"code": 40100, "message": "Too many requests"}"#.to_vec(),
        };
        assert_eq!(
            with_envelope.into_exhausted().to_string(),
            "TikTok API Error: Too many requests (code: 40100)"
        );

        let without = TiktokError::RateLimited { body: Vec::new() };
        assert!(matches!(without.into_exhausted(), TiktokError::MaxRetries));
    }

    #[test]
    fn test_to_platform_error_uses_titlecase_name() {
        let err: PlatformError = TiktokError::api(Some("bad".into()), Some("40001".into())).into();
        assert_eq!(err.to_string(), "TikTok API Error: bad (code: 40001)");
    }
}
