//! Collaborator interfaces consumed by the sync engine.
//!
//! Persistence, credential encryption and caching are external
//! collaborators: this crate defines the traits and the engine's use of
//! them, never an implementation. Tests provide in-memory versions.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::entity::{AdAccount, Campaign, CampaignStatus, InsightRecord, Platform};

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Backend(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl StoreError {
    #[inline]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable ad account lookups.
#[async_trait]
pub trait AdAccountStore: Send + Sync {
    /// Accounts the organization has marked active, optionally scoped to
    /// one platform.
    async fn find_active_by_organization(
        &self,
        organization_id: Uuid,
        platform: Option<Platform>,
    ) -> StoreResult<Vec<AdAccount>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<AdAccount>>;
}

/// Fields for creating a campaign record.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub ad_account_id: Uuid,
    pub external_campaign_id: String,
    pub name: String,
    pub status: CampaignStatus,
}

/// Durable campaign reconciliation interface.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Campaign>>;

    /// Keyed lookup used for reconciliation.
    async fn find_by_external_id(
        &self,
        ad_account_id: Uuid,
        external_campaign_id: &str,
    ) -> StoreResult<Option<Campaign>>;

    /// Campaigns currently in `Active` status for one account.
    async fn find_active(&self, ad_account_id: Uuid) -> StoreResult<Vec<Campaign>>;

    async fn insert(&self, campaign: NewCampaign) -> StoreResult<Campaign>;

    async fn update(&self, campaign: &Campaign) -> StoreResult<()>;
}

/// Fields for creating an insight record.
#[derive(Debug, Clone)]
pub struct NewInsight {
    pub campaign_id: Uuid,
    pub date: NaiveDate,
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub revenue: f64,
}

/// Durable daily-insight reconciliation interface.
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Keyed lookup used for reconciliation.
    async fn find_by_date(
        &self,
        campaign_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<InsightRecord>>;

    async fn insert(&self, insight: NewInsight) -> StoreResult<InsightRecord>;

    async fn update(&self, insight: &InsightRecord) -> StoreResult<()>;
}

/// Errors surfaced by the token cipher.
#[derive(Debug, Error)]
#[error("token cipher error: {0}")]
pub struct CipherError(pub String);

/// Credential encryption collaborator.
///
/// The engine decrypts a stored credential immediately before handing it
/// to an adapter and never persists plaintext.
pub trait TokenCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError>;
    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError>;
}

/// Optional TTL cache consulted to avoid redundant insight refetches
/// within a short window. Cost reduction only, never correctness.
#[async_trait]
pub trait SyncCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str, ttl_secs: u64);
}
