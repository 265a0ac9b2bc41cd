//! Model conversion for Meta Graph API responses.

use chrono::NaiveDate;

use super::types::{MetaAction, MetaAdAccount, MetaCampaign, MetaInsightRow};
use crate::entity::CampaignStatus;
use crate::platform::{
    NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, metric_f64, metric_i64,
};

/// The one `account_status` value that means "directly usable".
const ACCOUNT_STATUS_ACTIVE: i64 = 1;

/// Map a native Meta campaign status onto the normalized vocabulary.
///
/// Meta's own vocabulary matches ours one-to-one; anything unrecognized
/// resolves to `Paused`.
#[must_use]
pub fn map_campaign_status(native: &str) -> CampaignStatus {
    match native {
        "ACTIVE" => CampaignStatus::Active,
        "PAUSED" => CampaignStatus::Paused,
        "DELETED" => CampaignStatus::Deleted,
        "ARCHIVED" => CampaignStatus::Archived,
        _ => CampaignStatus::Paused,
    }
}

/// Convert a raw ad account to the normalized representation.
#[must_use]
pub fn to_normalized_account(raw: &MetaAdAccount) -> NormalizedAdAccount {
    NormalizedAdAccount {
        external_account_id: raw.account_id.clone(),
        name: raw.name.clone(),
        currency: raw.currency.clone(),
        timezone: raw.timezone_name.clone(),
        is_active: raw.account_status == ACCOUNT_STATUS_ACTIVE,
    }
}

/// Convert a raw campaign to the normalized representation.
#[must_use]
pub fn to_normalized_campaign(raw: &MetaCampaign) -> NormalizedCampaign {
    NormalizedCampaign {
        external_campaign_id: raw.id.clone(),
        name: raw.name.clone(),
        status: map_campaign_status(&raw.status),
    }
}

fn purchase_total(actions: Option<&[MetaAction]>) -> f64 {
    actions
        .unwrap_or_default()
        .iter()
        .filter(|a| a.action_type == "purchase")
        .filter_map(|a| a.value.parse::<f64>().ok())
        .sum()
}

/// Convert a raw daily insight row to the normalized representation.
///
/// Meta reports spend in decimal currency units already, so no unit
/// conversion applies. Rows with an unparseable date are dropped by the
/// caller.
#[must_use]
pub fn to_normalized_insight(raw: &MetaInsightRow) -> Option<NormalizedInsight> {
    let date = NaiveDate::parse_from_str(&raw.date_start, "%Y-%m-%d").ok()?;

    Some(NormalizedInsight {
        date,
        spend: metric_f64(raw.spend.as_deref()),
        impressions: metric_i64(raw.impressions.as_deref()),
        clicks: metric_i64(raw.clicks.as_deref()),
        conversions: purchase_total(raw.actions.as_deref()).round() as i64,
        revenue: purchase_total(raw.action_values.as_deref()),
    })
}
