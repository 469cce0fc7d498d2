//! Shared cache provider wrapper
//!
//! Typed, namespaced access to any [`CacheProvider`]. Values are stored as
//! JSON; the namespace is prepended to every key so several applications can
//! share one store.

use crate::constants::CACHE_NAMESPACE_SEPARATOR;
use std::fmt;
use std::sync::Arc;
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};

/// Shared cache provider wrapper
#[derive(Clone)]
pub struct SharedCacheProvider {
    provider: Arc<dyn CacheProvider>,
    namespace: Option<String>,
}

// Construction and Configuration Methods
impl SharedCacheProvider {
    /// Create a new shared cache provider
    pub fn new<P: CacheProvider + 'static>(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            namespace: None,
        }
    }

    /// Create a new shared cache provider from Arc
    pub fn from_arc(provider: Arc<dyn CacheProvider>) -> Self {
        Self {
            provider,
            namespace: None,
        }
    }

    /// Prefix every key with `namespace`
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Get the underlying cache provider as an Arc
    pub fn as_provider(&self) -> Arc<dyn CacheProvider> {
        Arc::clone(&self.provider)
    }

    /// Key as written to the underlying store
    pub fn namespaced_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}{CACHE_NAMESPACE_SEPARATOR}{key}"),
            None => key.to_string(),
        }
    }
}

// Cache Operations Methods
impl SharedCacheProvider {
    /// Get a typed value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        let namespaced_key = self.namespaced_key(key);
        match self.provider.get_json(&namespaced_key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json).map_err(|e| {
                    Error::infrastructure_with_source("Failed to deserialize cached value", e)
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache
    pub async fn set<T>(&self, key: &str, value: &T, config: CacheEntryConfig) -> Result<()>
    where
        T: serde::Serialize + Send + Sync,
    {
        let namespaced_key = self.namespaced_key(key);
        let json = serde_json::to_string(value).map_err(|e| {
            Error::infrastructure_with_source("Failed to serialize value for cache", e)
        })?;
        self.provider.set_json(&namespaced_key, &json, config).await
    }

    /// Delete a value from the cache
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let namespaced_key = self.namespaced_key(key);
        self.provider.delete(&namespaced_key).await
    }

    /// Check if a key exists in the cache
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let namespaced_key = self.namespaced_key(key);
        self.provider.exists(&namespaced_key).await
    }

    /// Get cache statistics
    pub async fn stats(&self) -> Result<CacheStats> {
        self.provider.stats().await
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}

impl fmt::Debug for SharedCacheProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCacheProvider")
            .field("provider", &self.provider.provider_name())
            .field("namespace", &self.namespace)
            .finish()
    }
}
