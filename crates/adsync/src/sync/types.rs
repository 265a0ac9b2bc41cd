//! Shared sync result types and constants.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::platform::PlatformError;
use crate::store::{CipherError, StoreError};

/// Trailing window, in days, of daily insights pulled during bulk sync.
pub const INSIGHT_WINDOW_DAYS: i64 = 30;

/// TTL for the optional insight refetch-suppression cache entries.
pub const INSIGHT_CACHE_TTL_SECS: u64 = 900;

/// Errors surfaced by the sync engine.
///
/// Per-campaign and per-insight failures inside a sync call are captured
/// into the outcome's `errors` list instead; these variants are the
/// call-level failures.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("ad account not found: {0}")]
    AccountNotFound(Uuid),

    #[error("campaign not found: {0}")]
    CampaignNotFound(Uuid),
}

/// Tally of one campaign synchronization call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignSyncOutcome {
    /// Campaigns reconciled without error.
    pub synced: usize,
    /// Newly created records.
    pub created: usize,
    /// Existing records that changed.
    pub updated: usize,
    /// Per-campaign failures; never aborts the remaining campaigns.
    pub errors: Vec<String>,
}

/// Absolute window a set of insights was synced over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Tally of one insight synchronization call.
#[derive(Debug, Clone, Serialize)]
pub struct InsightSyncOutcome {
    pub synced: usize,
    pub created: usize,
    pub updated: usize,
    pub date_range: DateRange,
    /// Per-record failures; never aborts the remaining records.
    pub errors: Vec<String>,
}

impl InsightSyncOutcome {
    /// An empty outcome over a window (used when a cached sync is
    /// skipped).
    #[must_use]
    pub fn empty(date_range: DateRange) -> Self {
        Self {
            synced: 0,
            created: 0,
            updated: 0,
            date_range,
            errors: Vec::new(),
        }
    }
}

/// One account's entry in a bulk sync report.
///
/// Structural invariant: `campaigns` is `Some` exactly when `error` is
/// `None`, and vice versa.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSyncResult {
    pub ad_account_id: Uuid,
    pub account_name: String,
    pub campaigns: Option<CampaignSyncOutcome>,
    pub error: Option<String>,
}

/// Organization-wide bulk sync report.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSyncReport {
    pub total_accounts: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<AccountSyncResult>,
}
