use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entity::{AuthType, Platform};

use super::errors::Result;

/// An advertising account from any platform (platform-agnostic
/// representation).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAdAccount {
    /// Platform-side account identifier.
    pub external_account_id: String,
    pub name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Whether the platform considers the account directly usable.
    /// Manager/aggregator accounts and disabled accounts are inactive.
    pub is_active: bool,
}

/// A campaign from any platform.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCampaign {
    /// Platform-side campaign identifier. May be a composite
    /// `"{accountId}:{campaignId}"` where the platform's insight query
    /// needs the parent account context.
    pub external_campaign_id: String,
    pub name: String,
    pub status: crate::entity::CampaignStatus,
}

/// One day of performance metrics for one campaign.
///
/// Monetary fields are decimal currency units: the adapter performs any
/// micro-unit conversion before this struct is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInsight {
    pub date: NaiveDate,
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub revenue: f64,
}

/// Result of an OAuth code exchange or token refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenExchange {
    pub access_token: String,
    /// `None` for platforms without refresh semantics (a supported
    /// absence), and on refresh responses that keep the old token.
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Capability contract every platform adapter implements.
///
/// The contract shape is identical regardless of auth type: api-key
/// adapters implement the OAuth operations by returning
/// [`PlatformError::Unsupported`](super::PlatformError::Unsupported), so
/// callers can rely on the full surface and branch on [`auth_type`]
/// before invoking OAuth-only operations.
///
/// [`auth_type`]: AdPlatform::auth_type
#[async_trait]
pub trait AdPlatform: Send + Sync {
    /// Which platform this adapter handles.
    fn platform(&self) -> Platform;

    /// How the platform authenticates API access.
    fn auth_type(&self) -> AuthType;

    /// Build the user-facing authorization URL for the OAuth dialog.
    fn auth_url(&self, redirect_uri: &str, state: &str) -> Result<String>;

    /// Exchange a short-lived authorization code for tokens.
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenExchange>;

    /// Refresh an access token. Platforms without refresh semantics
    /// return an unsupported-operation error; callers must gate on the
    /// refresh token they received at exchange time.
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenExchange>;

    /// Lightweight probe: is this credential still usable?
    async fn validate_token(&self, token: &str) -> Result<bool>;

    /// List the ad accounts reachable with this credential.
    async fn ad_accounts(&self, token: &str) -> Result<Vec<NormalizedAdAccount>>;

    /// List the campaigns of one ad account.
    async fn campaigns(
        &self,
        token: &str,
        external_account_id: &str,
    ) -> Result<Vec<NormalizedCampaign>>;

    /// Daily metrics for one campaign over an inclusive date window.
    async fn insights(
        &self,
        token: &str,
        external_campaign_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NormalizedInsight>>;
}
