use std::time::Duration;

use thiserror::Error;

use crate::entity::Platform;
use crate::http::HttpError;

impl Platform {
    /// Human-facing platform name used in normalized error messages.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Platform::Meta => "Meta",
            Platform::Google => "Google",
            Platform::Tiktok => "TikTok",
            Platform::Naver => "Naver",
        }
    }
}

/// Malformed serialized credentials for the api-key platform.
///
/// The two variants are deliberately distinct: callers and tests need to
/// tell "the string was not JSON" apart from "the JSON lacked a field".
#[derive(Debug, Error)]
pub enum CredentialFormatError {
    #[error("credential is not parseable: {0}")]
    NotParseable(String),

    #[error("credential is missing required fields: {0}")]
    MissingFields(String),
}

/// Errors that can occur when talking to an advertising platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform rejected the request. `message`/`code` come from the
    /// platform's own error envelope, already normalized by the client.
    #[error("{} API Error: {message} (code: {code})", Platform::title(.platform))]
    Api {
        platform: Platform,
        message: String,
        code: String,
    },

    /// Rate limit signal. Retried inside the clients; callers only see it
    /// if a platform surfaces it outside a retryable request.
    #[error("{} rate limit exceeded", Platform::title(.platform))]
    RateLimited {
        platform: Platform,
        retry_after: Option<Duration>,
    },

    /// An operation invoked against an adapter whose auth type does not
    /// support it. Always a caller/configuration bug, never retried.
    #[error("{operation} is not supported for this auth type ({})", Platform::title(.platform))]
    Unsupported {
        platform: Platform,
        operation: String,
    },

    /// Malformed or incomplete serialized credentials.
    #[error(transparent)]
    Credential(#[from] CredentialFormatError),

    /// Transport-level failure below the platform-error layer. Passed
    /// through unchanged, never normalized into `Api`.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The retry budget ran out without a recognizable error envelope.
    #[error("{}: max retries exceeded", Platform::title(.platform))]
    MaxRetriesExceeded { platform: Platform },

    /// Registry lookup for a platform nothing was registered for.
    #[error("no adapter registered for platform: {platform}")]
    AdapterNotRegistered { platform: Platform },
}

impl PlatformError {
    /// Create a normalized API error, substituting the documented
    /// placeholders when the envelope lacked either field.
    #[must_use]
    pub fn api(
        platform: Platform,
        message: Option<String>,
        code: Option<String>,
    ) -> Self {
        Self::Api {
            platform,
            message: message.unwrap_or_else(|| "Unknown error".to_string()),
            code: code.unwrap_or_else(|| "unknown".to_string()),
        }
    }

    /// Create an unsupported-operation error.
    #[must_use]
    pub fn unsupported(platform: Platform, operation: impl Into<String>) -> Self {
        Self::Unsupported {
            platform,
            operation: operation.into(),
        }
    }

    /// Check if this error is a rate limit error (retryable).
    #[inline]
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which keeps progress
/// reporting and log lines single-line.
#[inline]
#[must_use]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
