use std::collections::HashMap;
use std::sync::Arc;

use crate::entity::Platform;

use super::errors::{PlatformError, Result};
use super::types::AdPlatform;

/// Runtime lookup table from platform identifier to adapter instance.
///
/// One adapter per platform; registering a second adapter for the same
/// platform overwrites the first (last registration wins). A missing
/// adapter is a configuration bug, so lookup returns an error rather
/// than an optional.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<Platform, Arc<dyn AdPlatform>>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the adapter for its own platform.
    pub fn register(&mut self, adapter: Arc<dyn AdPlatform>) {
        self.adapters.insert(adapter.platform(), adapter);
    }

    /// Resolve the adapter for `platform`.
    pub fn adapter(&self, platform: Platform) -> Result<Arc<dyn AdPlatform>> {
        self.adapters
            .get(&platform)
            .cloned()
            .ok_or(PlatformError::AdapterNotRegistered { platform })
    }

    /// Non-failing presence check.
    #[must_use]
    pub fn has_adapter(&self, platform: Platform) -> bool {
        self.adapters.contains_key(&platform)
    }

    /// Enumerate the platforms with a registered adapter, in the closed
    /// enum's canonical order.
    #[must_use]
    pub fn supported_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .iter()
            .copied()
            .filter(|p| self.adapters.contains_key(p))
            .collect()
    }
}
