//! Meta Graph API data types.
//!
//! Raw wire shapes private to the Meta client; the convert module maps
//! them into the normalized model. List responses arrive wrapped in a
//! `{"data": [...]}` envelope, and insight metrics arrive as strings.

use serde::Deserialize;

/// Graph API list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
}

/// One ad account from `GET /me/adaccounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaAdAccount {
    /// Numeric account id without the `act_` prefix.
    pub account_id: String,
    pub name: String,
    pub currency: String,
    pub timezone_name: String,
    /// 1 = active; every other value (including unknown future ones)
    /// means the account is not directly usable.
    pub account_status: i64,
}

/// One campaign from `GET /act_{id}/campaigns`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaCampaign {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// One `actions`/`action_values` entry on an insight row.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaAction {
    pub action_type: String,
    pub value: String,
}

/// One daily insight row from `GET /{campaign}/insights`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaInsightRow {
    pub date_start: String,
    pub spend: Option<String>,
    pub impressions: Option<String>,
    pub clicks: Option<String>,
    #[serde(default)]
    pub actions: Option<Vec<MetaAction>>,
    #[serde(default)]
    pub action_values: Option<Vec<MetaAction>>,
}

/// Token endpoint response. Meta issues no refresh token.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}
