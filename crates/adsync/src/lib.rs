//! adsync - a normalized multi-platform advertising data sync engine.
//!
//! This library ingests advertising performance data (accounts,
//! campaigns, daily metrics) from four heterogeneous platforms (Meta,
//! Google Ads, TikTok and Naver SearchAd) and exposes them through a
//! single normalized model, so downstream aggregation never needs
//! platform-specific knowledge.
//!
//! The moving parts:
//! - [`platform`]: the capability contract ([`platform::AdPlatform`]),
//!   the normalized data model, the shared error taxonomy and the
//!   runtime [`platform::AdapterRegistry`];
//! - [`meta`], [`google`], [`tiktok`], [`naver`]: one adapter + resilient
//!   HTTP client pair per platform (retry with exponential backoff on
//!   rate limits, per-platform error-envelope normalization);
//! - [`sync`]: the orchestrator walking an organization's active
//!   accounts with per-entity failure isolation;
//! - [`store`]: collaborator traits for persistence, credential
//!   encryption and caching (implementations live outside this crate);
//! - [`config`]: typed configuration and one-shot registry assembly.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use adsync::config::{Config, build_registry};
//! use adsync::sync::SyncEngine;
//!
//! let config = Config::load(Some("adsync.toml".as_ref()))?;
//! let registry = Arc::new(build_registry(&config)?);
//! let engine = SyncEngine::new(registry, accounts, campaigns, insights, cipher);
//!
//! let report = engine.sync_all_active_accounts(org_id, None).await?;
//! println!("{}/{} accounts synced", report.successful, report.total_accounts);
//! ```

pub mod config;
pub mod entity;
pub mod google;
pub mod http;
pub mod meta;
pub mod naver;
pub mod platform;
pub mod retry;
pub mod store;
pub mod sync;
pub mod tiktok;

pub use entity::{AdAccount, AuthType, Campaign, CampaignStatus, InsightRecord, Platform};
pub use platform::{
    AdPlatform, AdapterRegistry, CredentialFormatError, NormalizedAdAccount, NormalizedCampaign,
    NormalizedInsight, PlatformError, TokenExchange,
};
pub use sync::{BulkSyncReport, SyncEngine, SyncError};
