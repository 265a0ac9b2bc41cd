//! Model conversion for Google Ads API responses.

use chrono::NaiveDate;

use super::types::{GoogleCustomer, SearchRow};
use crate::entity::CampaignStatus;
use crate::platform::{
    NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, metric_i64, micros_to_currency,
};

/// The one customer status value that means "serving".
const CUSTOMER_STATUS_ACTIVE: &str = "ENABLED";

/// Map a native Google campaign status onto the normalized vocabulary.
///
/// Google has no archive concept; anything unrecognized resolves to
/// `Paused`.
#[must_use]
pub fn map_campaign_status(native: &str) -> CampaignStatus {
    match native {
        "ENABLED" => CampaignStatus::Active,
        "PAUSED" => CampaignStatus::Paused,
        "REMOVED" => CampaignStatus::Deleted,
        _ => CampaignStatus::Paused,
    }
}

/// Compose the external campaign id carried through storage.
///
/// Google insight queries need the parent customer context, so the
/// campaign id is stored as `"{customerId}:{campaignId}"`.
#[must_use]
pub fn compose_campaign_ref(customer_id: &str, campaign_id: &str) -> String {
    format!("{customer_id}:{campaign_id}")
}

/// Split a stored campaign reference back into customer and campaign.
///
/// A missing separator means "no customer context" and is handled, not
/// an error.
#[must_use]
pub fn split_campaign_ref(reference: &str) -> (Option<&str>, &str) {
    match reference.split_once(':') {
        Some((customer, campaign)) => (Some(customer), campaign),
        None => (None, reference),
    }
}

/// Convert a customer attribute row to the normalized representation.
///
/// Manager (MCC) accounts are never directly active regardless of their
/// status; for serving accounts `ENABLED` is the single active sentinel.
#[must_use]
pub fn to_normalized_account(customer: &GoogleCustomer, customer_id: &str) -> NormalizedAdAccount {
    let status_active = customer.status.as_deref() == Some(CUSTOMER_STATUS_ACTIVE);
    NormalizedAdAccount {
        external_account_id: customer
            .id
            .clone()
            .unwrap_or_else(|| customer_id.to_string()),
        name: customer
            .descriptive_name
            .clone()
            .unwrap_or_else(|| format!("Google Ads {customer_id}")),
        currency: customer.currency_code.clone().unwrap_or_default(),
        timezone: customer.time_zone.clone().unwrap_or_default(),
        is_active: status_active && !customer.manager,
    }
}

/// Convert a campaign search row to the normalized representation.
#[must_use]
pub fn to_normalized_campaign(row: &SearchRow, customer_id: &str) -> Option<NormalizedCampaign> {
    let campaign = row.campaign.as_ref()?;
    Some(NormalizedCampaign {
        external_campaign_id: compose_campaign_ref(customer_id, &campaign.id),
        name: campaign.name.clone(),
        status: map_campaign_status(&campaign.status),
    })
}

/// Convert an insight search row to the normalized representation.
///
/// Google reports cost in micros: divide by 1,000,000 exactly.
/// Fractional conversion counts round to the nearest integer.
#[must_use]
pub fn to_normalized_insight(row: &SearchRow) -> Option<NormalizedInsight> {
    let date_raw = row.segments.as_ref()?.date.as_deref()?;
    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").ok()?;
    let metrics = row.metrics.clone().unwrap_or_default();

    let cost_micros = metrics
        .cost_micros
        .as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0);

    Some(NormalizedInsight {
        date,
        spend: micros_to_currency(cost_micros),
        impressions: metric_i64(metrics.impressions.as_deref()),
        clicks: metric_i64(metrics.clicks.as_deref()),
        conversions: metrics.conversions.unwrap_or(0.0).round() as i64,
        revenue: metrics.conversions_value.unwrap_or(0.0),
    })
}
