//! TikTok Business API data types.
//!
//! Every response, success or failure, is an HTTP 200 envelope
//! `{"code", "message", "data"}`; `code != 0` is the platform error.
//! Report metrics arrive as strings.

use serde::Deserialize;

/// Business API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// `code` value meaning success.
pub const CODE_OK: i64 = 0;

/// `code` value for request throttling.
pub const CODE_RATE_LIMIT: i64 = 40100;

/// Token data from `/oauth2/access_token/` and `/oauth2/refresh_token/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TiktokTokenData {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// `data` payload of `/oauth2/advertiser/get/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvertiserList {
    #[serde(default)]
    pub list: Vec<AdvertiserRef>,
}

/// One advertiser id from the authorization listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvertiserRef {
    pub advertiser_id: String,
    #[serde(default)]
    pub advertiser_name: Option<String>,
}

/// `data` payload of `/advertiser/info/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvertiserInfoList {
    #[serde(default)]
    pub list: Vec<AdvertiserInfo>,
}

/// Advertiser attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvertiserInfo {
    pub advertiser_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// `STATUS_ENABLE` is the single active sentinel.
    #[serde(default)]
    pub status: Option<String>,
}

/// `data` payload of `/campaign/get/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignList {
    #[serde(default)]
    pub list: Vec<TiktokCampaign>,
}

/// One campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct TiktokCampaign {
    pub campaign_id: String,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub operation_status: String,
}

/// `data` payload of `/report/integrated/get/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportList {
    #[serde(default)]
    pub list: Vec<ReportRow>,
}

/// One daily report row.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRow {
    pub dimensions: ReportDimensions,
    pub metrics: ReportMetrics,
}

/// Report dimensions; `stat_time_day` arrives as
/// `"YYYY-MM-DD HH:MM:SS"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDimensions {
    pub stat_time_day: String,
}

/// Report metrics, all serialized as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportMetrics {
    #[serde(default)]
    pub spend: Option<String>,
    #[serde(default)]
    pub impressions: Option<String>,
    #[serde(default)]
    pub clicks: Option<String>,
    #[serde(default)]
    pub conversions: Option<String>,
    #[serde(default)]
    pub total_purchase_value: Option<String>,
}
