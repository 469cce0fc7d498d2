//! Moka in-memory cache provider
//!
//! Concurrent in-memory cache with a TTL per entry: the TTL carried by
//! [`CacheEntryConfig`] on each write becomes that entry's expiry, and a later
//! write to the same key resets it.
//!
//! ## Example
//!
//! ```ignore
//! use tbr_providers::cache::MokaCacheProvider;
//!
//! let provider = MokaCacheProvider::with_capacity(5_000);
//! ```

use crate::constants::{CACHE_DEFAULT_MAX_ENTRIES, CACHE_MAX_ENTRY_BYTES};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};

/// Stored payload together with the TTL it was written with
#[derive(Clone)]
struct StoredEntry {
    json: Arc<str>,
    ttl: Duration,
}

/// Expiry policy reading the TTL out of each entry
struct EntryExpiry;

impl Expiry<String, StoredEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-memory cache provider
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, StoredEntry>,
    max_entries: u64,
    max_entry_bytes: usize,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a new Moka cache provider with default settings
    pub fn new() -> Self {
        Self::with_capacity(CACHE_DEFAULT_MAX_ENTRIES)
    }

    /// Create a new Moka cache provider holding at most `max_entries`
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryExpiry)
            .build();

        Self {
            cache,
            max_entries,
            max_entry_bytes: CACHE_MAX_ENTRY_BYTES,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Override the largest accepted payload size
    pub fn with_max_entry_bytes(mut self, max_entry_bytes: usize) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    /// Get the maximum number of entries
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        if let Some(entry) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Ok(Some(entry.json.to_string()))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        if value.len() > self.max_entry_bytes {
            return Err(Error::cache(format!(
                "Cache value size {} exceeds maximum size {}",
                value.len(),
                self.max_entry_bytes
            )));
        }

        let entry = StoredEntry {
            json: Arc::from(value),
            ttl: config.effective_ttl(),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        // Run pending tasks so entry_count is accurate
        self.cache.run_pending_tasks().await;
        Ok(CacheStats::from_counters(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.cache.entry_count(),
        ))
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        usize::try_from(self.cache.entry_count())
            .map_err(|e| Error::infrastructure_with_source("Cache size overflow", e))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
