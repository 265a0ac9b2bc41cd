//! Normalized campaign status enum.

use serde::{Deserialize, Serialize};

/// Normalized campaign status shared by every platform.
///
/// Each adapter maps its platform's native vocabulary onto exactly one of
/// these values. Unknown native statuses resolve to `Paused`: an unknown
/// state must never be read as running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Deleted,
    Archived,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Active => write!(f, "ACTIVE"),
            CampaignStatus::Paused => write!(f, "PAUSED"),
            CampaignStatus::Deleted => write!(f, "DELETED"),
            CampaignStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}
