//! Durable campaign record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::campaign_status::CampaignStatus;

/// A campaign as the campaign store persists it.
///
/// Matched against normalized platform data by
/// `(ad_account_id, external_campaign_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub ad_account_id: Uuid,
    /// Platform-side campaign identifier. For platforms whose insight
    /// queries need the parent account context, this is a composite
    /// `"{accountId}:{campaignId}"` produced by the adapter.
    pub external_campaign_id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Whether the stored fields differ from freshly fetched ones.
    #[must_use]
    pub fn differs_from(&self, name: &str, status: CampaignStatus) -> bool {
        self.name != name || self.status != status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            ad_account_id: Uuid::new_v4(),
            external_campaign_id: "c-1".to_string(),
            name: "Spring Sale".to_string(),
            status: CampaignStatus::Active,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_differs_from() {
        let c = campaign();
        assert!(!c.differs_from("Spring Sale", CampaignStatus::Active));
        assert!(c.differs_from("Spring Sale", CampaignStatus::Paused));
        assert!(c.differs_from("Summer Sale", CampaignStatus::Active));
    }
}
