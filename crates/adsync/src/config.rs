//! Configuration and adapter assembly.
//!
//! Configuration is loaded with the following precedence (highest to
//! lowest):
//! 1. Environment variables (prefixed with `ADSYNC_`, sections separated
//!    by a double underscore, e.g. `ADSYNC_META__APP_ID`)
//! 2. Config file (TOML, path supplied by the caller)
//! 3. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [meta]
//! app_id = "..."
//! app_secret = "..."
//!
//! [google]
//! client_id = "..."
//! client_secret = "..."
//! developer_token = "..."
//!
//! [tiktok]
//! app_id = "..."
//! secret = "..."
//! ```
//!
//! Naver needs no app-level configuration: its credential triple travels
//! with each account.
//!
//! [`build_registry`] assembles clients → adapters → registry once at
//! process start; nothing resolves dependencies at call time.

use std::path::Path;
use std::sync::Arc;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::google::{GoogleAdapter, GoogleClient, GoogleError};
use crate::meta::{MetaAdapter, MetaClient, MetaError};
use crate::naver::{NaverAdapter, NaverClient, NaverError};
use crate::platform::AdapterRegistry;
use crate::tiktok::{TiktokAdapter, TiktokClient, TiktokError};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub meta: MetaConfig,
    pub google: GoogleConfig,
    pub tiktok: TiktokConfig,
}

/// Meta app credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    pub app_id: String,
    pub app_secret: String,
}

/// Google OAuth client plus the Ads API developer token.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub developer_token: String,
}

/// TikTok app credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TiktokConfig {
    pub app_id: String,
    pub secret: String,
}

impl Config {
    /// Load configuration from an optional TOML file and the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // Field names contain underscores (`app_id`), so sections are
        // separated by a double underscore: ADSYNC_GOOGLE__CLIENT_ID.
        builder = builder.add_source(
            Environment::with_prefix("ADSYNC")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

/// Errors while constructing platform clients.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("meta client: {0}")]
    Meta(#[from] MetaError),

    #[error("google client: {0}")]
    Google(#[from] GoogleError),

    #[error("tiktok client: {0}")]
    Tiktok(#[from] TiktokError),

    #[error("naver client: {0}")]
    Naver(#[from] NaverError),
}

/// Build the full adapter registry from configuration.
///
/// All four platforms are always registered; accounts select their
/// adapter through the stored [`Platform`](crate::entity::Platform).
pub fn build_registry(config: &Config) -> Result<AdapterRegistry, AssemblyError> {
    let mut registry = AdapterRegistry::new();

    registry.register(Arc::new(MetaAdapter::new(MetaClient::new(
        &config.meta.app_id,
        &config.meta.app_secret,
    )?)));
    registry.register(Arc::new(GoogleAdapter::new(GoogleClient::new(
        &config.google.client_id,
        &config.google.client_secret,
        &config.google.developer_token,
    )?)));
    registry.register(Arc::new(TiktokAdapter::new(TiktokClient::new(
        &config.tiktok.app_id,
        &config.tiktok.secret,
    )?)));
    registry.register(Arc::new(NaverAdapter::new(NaverClient::new()?)));

    Ok(registry)
}
