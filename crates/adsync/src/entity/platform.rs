//! Platform enum for type-safe advertising platform handling.

use serde::{Deserialize, Serialize};

/// Supported advertising platforms.
///
/// This is a closed enumeration: the registry, the sync engine and the
/// stored account records are all keyed by it. Adding a platform means
/// adding an adapter, never a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Meta (Facebook/Instagram ads).
    Meta,
    /// Google Ads.
    Google,
    /// TikTok for Business.
    Tiktok,
    /// Naver SearchAd.
    Naver,
}

impl Platform {
    /// All supported platforms, in registry order.
    pub const ALL: &'static [Platform] =
        &[Platform::Meta, Platform::Google, Platform::Tiktok, Platform::Naver];
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Meta => write!(f, "meta"),
            Platform::Google => write!(f, "google"),
            Platform::Tiktok => write!(f, "tiktok"),
            Platform::Naver => write!(f, "naver"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meta" | "facebook" => Ok(Platform::Meta),
            "google" => Ok(Platform::Google),
            "tiktok" => Ok(Platform::Tiktok),
            "naver" => Ok(Platform::Naver),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// How a platform authenticates API access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// Authorization-code OAuth; credentials come from a token endpoint.
    OAuth,
    /// Static key/secret/customer triple carried as a serialized credential.
    ApiKey,
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthType::OAuth => write!(f, "oauth"),
            AuthType::ApiKey => write!(f, "api_key"),
        }
    }
}
