//! Redis cache provider
//!
//! Shared cache backed by Redis so several app instances reuse each other's
//! upstream results. Expiry is delegated to Redis with `SET ... EX`.
//!
//! The database may be shared with other tenants: with a key prefix, `clear`,
//! `size` and `stats` only see keys under that prefix (found with `SCAN`).
//!
//! ```ignore
//! use tbr_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?.with_key_prefix("tbr:");
//! ```

use crate::constants::REDIS_SCAN_BATCH;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};

/// Redis cache provider
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Client,
    url: String,
    key_prefix: Option<String>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider from a connection URL
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| Error::infrastructure_with_source("Failed to create Redis client", e))?;

        Ok(Self {
            client,
            url: url.to_string(),
            key_prefix: None,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Limit `clear`, `size` and `stats` to keys starting with `prefix`
    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// `SCAN MATCH` pattern covering this provider's keys
    pub fn scan_pattern(&self) -> String {
        let prefix = self.key_prefix.as_deref().unwrap_or_default();
        let mut pattern = String::with_capacity(prefix.len() + 1);
        for c in prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('*');
        pattern
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::infrastructure_with_source("Failed to get Redis connection", e))
    }

    /// Keys matching [`Self::scan_pattern`], without duplicates
    async fn scan_keys(&self, conn: &mut MultiplexedConnection) -> Result<Vec<String>> {
        let pattern = self.scan_pattern();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, page): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(REDIS_SCAN_BATCH)
                .query_async(&mut *conn)
                .await
                .map_err(|e| Error::infrastructure_with_source("Redis SCAN failed", e))?;
            keys.extend(page);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn entry_count(&self) -> Result<u64> {
        let mut conn = self.connection().await?;
        if self.key_prefix.is_none() {
            return redis::cmd("DBSIZE")
                .query_async(&mut conn)
                .await
                .map_err(|e| Error::infrastructure_with_source("Redis DBSIZE failed", e));
        }

        let keys = self.scan_keys(&mut conn).await?;
        u64::try_from(keys.len())
            .map_err(|e| Error::infrastructure_with_source("Cache size overflow", e))
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;

        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis GET failed", e))?;

        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.connection().await?;

        // SET EX rejects 0, so round sub-second TTLs up to one second
        let ttl_seconds = config.effective_ttl().as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis SET failed", e))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis DEL failed", e))?;
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        conn.exists(key)
            .await
            .map_err(|e| Error::infrastructure_with_source("Redis EXISTS failed", e))
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let keys = self.scan_keys(&mut conn).await?;

        for chunk in keys.chunks(REDIS_SCAN_BATCH) {
            let _: i64 = conn
                .del(chunk)
                .await
                .map_err(|e| Error::infrastructure_with_source("Redis DEL failed", e))?;
        }
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let entries = self.entry_count().await?;
        Ok(CacheStats::from_counters(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            entries,
        ))
    }

    async fn size(&self) -> Result<usize> {
        let entries = self.entry_count().await?;
        usize::try_from(entries)
            .map_err(|e| Error::infrastructure_with_source("Cache size overflow", e))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("url", &self.url)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}
