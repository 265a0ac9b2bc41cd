//! Error types for Naver SearchAd API operations.

use thiserror::Error;

use crate::entity::Platform;
use crate::http::HttpError;
use crate::platform::{CredentialFormatError, PlatformError};

/// Errors that can occur when interacting with the Naver SearchAd API.
#[derive(Debug, Error)]
pub enum NaverError {
    /// Transport-level failure. Never normalized into an API error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A success response whose body failed to parse.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or incomplete serialized credential.
    #[error(transparent)]
    Credential(#[from] CredentialFormatError),

    /// Normalized platform error, built from the Naver error envelope.
    #[error("Naver API Error: {message} (code: {code})")]
    Api { message: String, code: String },

    /// Rate limit response; carries the raw body so the envelope can be
    /// normalized once the retry budget runs out.
    #[error("Naver rate limited")]
    RateLimited { body: Vec<u8> },

    /// Retry budget exhausted without a recognizable error envelope.
    #[error("Naver: max retries exceeded")]
    MaxRetries,
}

impl NaverError {
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
pub fn is_rate_limit_error(err: &NaverError) -> bool {
    matches!(err, NaverError::RateLimited { .. })
}

/// Extract `(message, code)` from a Naver error envelope
/// `{"code": 1018, "status": 400, "title": "..."}`.
#[must_use]
pub fn parse_error_envelope(body: &[u8]) -> Option<(Option<String>, Option<String>)> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let code = value.get("code")?;
    let message = value
        .get("title")
        .and_then(|t| t.as_str())
        .map(ToString::to_string);
    Some((message, Some(code.to_string())))
}

impl From<NaverError> for PlatformError {
    fn from(err: NaverError) -> Self {
        match err {
            NaverError::Http(e) => PlatformError::Transport(e),
            NaverError::Json(e) => PlatformError::api(
                Platform::Naver,
                Some(format!("invalid JSON response: {e}")),
                None,
            ),
            NaverError::Credential(e) => PlatformError::Credential(e),
            NaverError::Api { message, code } => PlatformError::Api {
                platform: Platform::Naver,
                message,
                code,
            },
            NaverError::RateLimited { .. } => PlatformError::RateLimited {
                platform: Platform::Naver,
                retry_after: None,
            },
            NaverError::MaxRetries => PlatformError::MaxRetriesExceeded {
                platform: Platform::Naver,
            },
        }
    }
}
