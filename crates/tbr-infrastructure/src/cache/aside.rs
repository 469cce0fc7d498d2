//! Cache-aside (get-or-compute)
//!
//! Read the cache; on a live entry skip the computation entirely. Otherwise
//! compute, store the success with the category's TTL, and return it.
//! Failures of the computation are never cached.
//!
//! The store is treated as best effort: a failing read counts as a miss and a
//! failing write is logged and dropped, so a broken cache degrades to direct
//! upstream calls instead of failing requests.

use super::key::CacheKey;
use super::policy::TtlPolicy;
use super::provider::SharedCacheProvider;
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::{Duration, Instant};
use tbr_domain::error::Result;
use tbr_domain::value_objects::CacheCategory;
use tracing::{debug, warn};

/// Cache operation result
#[derive(Debug, Clone)]
pub struct CacheOperationResult<T> {
    /// The result value
    pub value: T,
    /// Whether the result came from cache (hit) or was computed (miss)
    pub from_cache: bool,
    /// Operation duration
    pub duration: Duration,
}

/// Cache-aside helper bound to one store and TTL policy
#[derive(Debug, Clone)]
pub struct CacheAside {
    cache: SharedCacheProvider,
    policy: TtlPolicy,
}

impl CacheAside {
    /// Create a new cache-aside helper
    pub fn new(cache: SharedCacheProvider, policy: TtlPolicy) -> Self {
        Self { cache, policy }
    }

    /// Underlying store
    pub fn cache(&self) -> &SharedCacheProvider {
        &self.cache
    }

    /// TTL policy used for writes
    pub fn policy(&self) -> &TtlPolicy {
        &self.policy
    }

    /// Get or compute a value
    ///
    /// `compute` runs only on a miss. Its error is returned as-is and nothing
    /// is written. A key failing [`CacheKey::validate`] is rejected before
    /// the store or `compute` is touched.
    pub async fn get_or_compute<F, V, Fut>(
        &self,
        key: &str,
        category: CacheCategory,
        compute: F,
    ) -> Result<CacheOperationResult<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
        V: Serialize + DeserializeOwned + Send + Sync,
    {
        CacheKey::validate(key)?;
        let start_time = Instant::now();

        match self.cache.get::<V>(key).await {
            Ok(Some(cached_value)) => {
                debug!(key, %category, "Cache hit");
                return Ok(CacheOperationResult {
                    value: cached_value,
                    from_cache: true,
                    duration: start_time.elapsed(),
                });
            }
            Ok(None) => debug!(key, %category, "Cache miss"),
            Err(e) => warn!(key, %category, error = %e, "Cache read failed, computing"),
        }

        let computed_value = compute().await?;

        self.store(key, category, &computed_value).await;

        Ok(CacheOperationResult {
            value: computed_value,
            from_cache: false,
            duration: start_time.elapsed(),
        })
    }

    /// Drop a cached value
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        CacheKey::validate(key)?;
        self.cache.delete(key).await
    }

    /// Recompute a value and overwrite the cache regardless of its state
    pub async fn refresh<F, V, Fut>(&self, key: &str, category: CacheCategory, compute: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
        V: Serialize + Send + Sync,
    {
        CacheKey::validate(key)?;
        let value = compute().await?;
        self.store(key, category, &value).await;
        Ok(value)
    }

    async fn store<V>(&self, key: &str, category: CacheCategory, value: &V)
    where
        V: Serialize + Send + Sync,
    {
        let config = self.policy.entry_config(category);
        if let Err(e) = self.cache.set(key, value, config).await {
            warn!(key, %category, error = %e, "Cache write failed, result not cached");
        }
    }
}
