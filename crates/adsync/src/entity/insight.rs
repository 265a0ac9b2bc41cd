//! Durable daily insight record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day of performance metrics for one campaign, as the insight store
/// persists it. Matched against normalized platform data by
/// `(campaign_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub date: NaiveDate,
    /// Decimal currency units (already unit-normalized by the adapter).
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    /// Decimal currency units.
    pub revenue: f64,
}

impl InsightRecord {
    /// Whether the stored metrics differ from freshly fetched ones.
    #[must_use]
    pub fn differs_from(&self, other: &crate::platform::NormalizedInsight) -> bool {
        self.spend != other.spend
            || self.impressions != other.impressions
            || self.clicks != other.clicks
            || self.conversions != other.conversions
            || self.revenue != other.revenue
    }
}
