//! Model conversion for TikTok Business API responses.

use chrono::NaiveDate;

use super::types::{AdvertiserInfo, ReportRow, TiktokCampaign};
use crate::entity::CampaignStatus;
use crate::platform::{
    NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, metric_f64, metric_i64,
};

/// The one advertiser status value that means "usable".
const ADVERTISER_STATUS_ACTIVE: &str = "STATUS_ENABLE";

/// Map a native TikTok operation status onto the normalized vocabulary.
///
/// TikTok has no archive concept; anything unrecognized resolves to
/// `Paused`.
#[must_use]
pub fn map_campaign_status(native: &str) -> CampaignStatus {
    match native {
        "ENABLE" => CampaignStatus::Active,
        "DISABLE" => CampaignStatus::Paused,
        "DELETE" => CampaignStatus::Deleted,
        _ => CampaignStatus::Paused,
    }
}

/// Convert advertiser attributes to the normalized representation.
#[must_use]
pub fn to_normalized_account(info: &AdvertiserInfo) -> NormalizedAdAccount {
    NormalizedAdAccount {
        external_account_id: info.advertiser_id.clone(),
        name: info
            .name
            .clone()
            .unwrap_or_else(|| format!("TikTok {}", info.advertiser_id)),
        currency: info.currency.clone().unwrap_or_default(),
        timezone: info.timezone.clone().unwrap_or_default(),
        is_active: info.status.as_deref() == Some(ADVERTISER_STATUS_ACTIVE),
    }
}

/// Convert a raw campaign to the normalized representation.
#[must_use]
pub fn to_normalized_campaign(raw: &TiktokCampaign) -> NormalizedCampaign {
    NormalizedCampaign {
        external_campaign_id: raw.campaign_id.clone(),
        name: raw.campaign_name.clone(),
        status: map_campaign_status(&raw.operation_status),
    }
}

/// Convert a daily report row to the normalized representation.
///
/// `stat_time_day` arrives as `"YYYY-MM-DD HH:MM:SS"`; spend is already
/// in decimal currency units.
#[must_use]
pub fn to_normalized_insight(row: &ReportRow) -> Option<NormalizedInsight> {
    let date_part = row.dimensions.stat_time_day.split(' ').next()?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    Some(NormalizedInsight {
        date,
        spend: metric_f64(row.metrics.spend.as_deref()),
        impressions: metric_i64(row.metrics.impressions.as_deref()),
        clicks: metric_i64(row.metrics.clicks.as_deref()),
        conversions: metric_i64(row.metrics.conversions.as_deref()),
        revenue: metric_f64(row.metrics.total_purchase_value.as_deref()),
    })
}
