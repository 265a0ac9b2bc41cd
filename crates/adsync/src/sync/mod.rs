//! Organization-wide synchronization of campaigns and insights.

mod engine;
mod types;

pub use engine::SyncEngine;
pub use types::{
    AccountSyncResult, BulkSyncReport, CampaignSyncOutcome, DateRange, INSIGHT_CACHE_TTL_SECS,
    INSIGHT_WINDOW_DAYS, InsightSyncOutcome, SyncError,
};
