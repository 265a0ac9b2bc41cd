//! Model conversion for Naver SearchAd API responses.

use chrono::NaiveDate;

use super::types::{NaverCampaign, NaverCredentials, NaverStatRow};
use crate::entity::CampaignStatus;
use crate::platform::{NormalizedAdAccount, NormalizedCampaign, NormalizedInsight};

/// Map a native Naver status plus the user lock onto the normalized
/// vocabulary.
///
/// The lock is a manual override: when set it forces `Paused` no matter
/// what the status string says. Unknown statuses resolve to `Paused`.
#[must_use]
pub fn map_campaign_status(native: &str, user_lock: bool) -> CampaignStatus {
    if user_lock {
        return CampaignStatus::Paused;
    }
    match native {
        "ELIGIBLE" => CampaignStatus::Active,
        "PAUSED" => CampaignStatus::Paused,
        "DELETED" => CampaignStatus::Deleted,
        _ => CampaignStatus::Paused,
    }
}

/// Derive the single normalized account from the credential triple.
///
/// The SearchAd API has no account-listing endpoint: the customer id in
/// the credential *is* the account. SearchAd bills in KRW and operates
/// on KST.
#[must_use]
pub fn to_normalized_account(credentials: &NaverCredentials) -> NormalizedAdAccount {
    NormalizedAdAccount {
        external_account_id: credentials.customer_id.clone(),
        name: format!("Naver SearchAd {}", credentials.customer_id),
        currency: "KRW".to_string(),
        timezone: "Asia/Seoul".to_string(),
        is_active: true,
    }
}

/// Convert a raw campaign to the normalized representation.
#[must_use]
pub fn to_normalized_campaign(raw: &NaverCampaign) -> NormalizedCampaign {
    NormalizedCampaign {
        external_campaign_id: raw.ncc_campaign_id.clone(),
        name: raw.name.clone(),
        status: map_campaign_status(&raw.status, raw.user_lock),
    }
}

/// Convert a daily stat row to the normalized representation.
///
/// KRW has no decimal subunit: integer amounts pass through unchanged,
/// no micro-unit division applies.
#[must_use]
pub fn to_normalized_insight(row: &NaverStatRow) -> Option<NormalizedInsight> {
    let date = NaiveDate::parse_from_str(&row.stat_dt, "%Y-%m-%d").ok()?;

    Some(NormalizedInsight {
        date,
        spend: row.sales_amt as f64,
        impressions: row.imp_cnt,
        clicks: row.clk_cnt,
        conversions: row.ccnt,
        revenue: row.conv_amt as f64,
    })
}
