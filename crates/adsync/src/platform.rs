//! Platform-agnostic contract for advertising platform adapters.
//!
//! This module defines the [`AdPlatform`] trait that provides a unified
//! interface for the supported advertising platforms (Meta, Google Ads,
//! TikTok, Naver SearchAd), the normalized data model adapters produce,
//! the shared error taxonomy, and the runtime adapter registry.
//!
//! # Example
//!
//! ```ignore
//! use adsync::platform::{AdPlatform, AdapterRegistry};
//! use adsync::entity::Platform;
//!
//! async fn list_accounts(registry: &AdapterRegistry, token: &str) -> anyhow::Result<()> {
//!     let adapter = registry.adapter(Platform::Meta)?;
//!     for account in adapter.ad_accounts(token).await? {
//!         println!("{} ({})", account.name, account.external_account_id);
//!     }
//!     Ok(())
//! }
//! ```

mod convert;
mod errors;
mod registry;
mod types;

pub use convert::{metric_f64, metric_i64, micros_to_currency};
pub use errors::{CredentialFormatError, PlatformError, Result, short_error_message};
pub use registry::AdapterRegistry;
pub use types::{
    AdPlatform, NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, TokenExchange,
};

#[cfg(test)]
mod tests {
    use crate::entity::Platform;

    use super::*;

    #[test]
    fn test_platform_error_api_normalized_format() {
        let err = PlatformError::api(
            Platform::Meta,
            Some("Invalid OAuth access token".to_string()),
            Some("190".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Meta API Error: Invalid OAuth access token (code: 190)"
        );
    }

    #[test]
    fn test_platform_error_api_substitutes_placeholders() {
        let err = PlatformError::api(Platform::Tiktok, None, None);
        assert_eq!(
            err.to_string(),
            "TikTok API Error: Unknown error (code: unknown)"
        );
    }

    #[test]
    fn test_platform_error_unsupported_names_auth_type() {
        let err = PlatformError::unsupported(Platform::Naver, "exchange_code");
        let msg = err.to_string();
        assert!(msg.contains("not supported for this auth type"));
        assert!(msg.contains("exchange_code"));
        assert!(msg.contains("Naver"));
    }

    #[test]
    fn test_platform_error_is_rate_limited() {
        let rate_limited = PlatformError::RateLimited {
            platform: Platform::Google,
            retry_after: None,
        };
        assert!(rate_limited.is_rate_limited());

        let api_error = PlatformError::api(Platform::Google, None, None);
        assert!(!api_error.is_rate_limited());
    }

    #[test]
    fn test_credential_format_messages_are_distinct() {
        let parse = CredentialFormatError::NotParseable("expected value at line 1".to_string());
        assert!(parse.to_string().contains("not parseable"));

        let missing = CredentialFormatError::MissingFields("apiSecret".to_string());
        assert!(missing.to_string().contains("missing required fields"));
    }

    #[test]
    fn test_max_retries_message_names_platform() {
        let err = PlatformError::MaxRetriesExceeded {
            platform: Platform::Naver,
        };
        assert_eq!(err.to_string(), "Naver: max retries exceeded");
    }

    #[test]
    fn test_short_error_message_takes_first_line() {
        let err = std::io::Error::other("first line\nsecond line");
        assert_eq!(short_error_message(&err), "first line");
    }

    #[test]
    fn test_platform_titles() {
        assert_eq!(Platform::Meta.title(), "Meta");
        assert_eq!(Platform::Google.title(), "Google");
        assert_eq!(Platform::Tiktok.title(), "TikTok");
        assert_eq!(Platform::Naver.title(), "Naver");
    }
}
