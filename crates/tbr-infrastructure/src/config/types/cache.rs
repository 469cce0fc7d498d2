//! Cache configuration types

use crate::constants::CACHE_DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tbr_providers::constants::CACHE_DEFAULT_MAX_ENTRIES;

/// Cache store backing the cache-aside layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheProviderKind {
    /// In-process cache (Moka)
    #[default]
    Moka,
    /// Shared cache (Redis)
    Redis,
    /// No caching
    Null,
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled; a disabled cache behaves like the `null` provider
    pub enabled: bool,

    /// Cache provider
    pub provider: CacheProviderKind,

    /// Maximum entries held by the in-process provider
    pub max_entries: u64,

    /// Redis URL (for Redis provider)
    pub redis_url: Option<String>,

    /// Namespace for cache keys
    pub namespace: String,

    /// Per-category TTL overrides in seconds, keyed by category name
    pub ttl_overrides: BTreeMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: CacheProviderKind::Moka,
            max_entries: CACHE_DEFAULT_MAX_ENTRIES,
            redis_url: None,
            namespace: CACHE_DEFAULT_NAMESPACE.to_string(),
            ttl_overrides: BTreeMap::new(),
        }
    }
}
