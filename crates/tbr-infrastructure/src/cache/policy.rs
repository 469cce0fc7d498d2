//! TTL policy per cache category

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::cache::CacheEntryConfig;
use tbr_domain::value_objects::CacheCategory;

/// Time to live for each cache category
///
/// Built-in defaults come from [`CacheCategory::default_ttl`]; configured
/// overrides replace them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtlPolicy {
    overrides: HashMap<CacheCategory, Duration>,
}

impl TtlPolicy {
    /// Policy using only the built-in TTLs
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy from a `category name -> seconds` table
    pub fn from_overrides(overrides: &BTreeMap<String, u64>) -> Result<Self> {
        let mut policy = Self::new();
        for (name, secs) in overrides {
            let category: CacheCategory = name.parse().map_err(|_| {
                Error::config(format!("Unknown cache category '{name}' in ttl_overrides"))
            })?;
            policy = policy.with_ttl(category, Duration::from_secs(*secs));
        }
        Ok(policy)
    }

    /// Override the TTL of one category
    pub fn with_ttl(mut self, category: CacheCategory, ttl: Duration) -> Self {
        self.overrides.insert(category, ttl);
        self
    }

    /// TTL applied to entries of `category`
    pub fn ttl_for(&self, category: CacheCategory) -> Duration {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_ttl())
    }

    /// Entry configuration for a write in `category`
    pub fn entry_config(&self, category: CacheCategory) -> CacheEntryConfig {
        CacheEntryConfig::new().with_ttl(self.ttl_for(category))
    }
}
