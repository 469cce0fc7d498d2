//! Provider Factory
//!
//! Builds cache stores, the cache-aside layer and item fetchers from
//! configuration. Provider implementations come from `tbr-providers`; this
//! module only wires them.

use std::sync::Arc;
use std::time::Duration;

use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::{CacheProvider, ItemFetcher};
use tbr_providers::cache::{MokaCacheProvider, NullCacheProvider};
use tbr_providers::fetch::{
    HttpFetchConfig, HttpItemFetcher, SocialFetchConfig, SocialImageFetcher,
};
use tracing::info;

use crate::cache::{CacheAside, SharedCacheProvider, TtlPolicy};
use crate::config::{CacheConfig, CacheProviderKind, FetchConfig, FetchSource};
#[cfg(feature = "cache-redis")]
use crate::constants::CACHE_NAMESPACE_SEPARATOR;

/// Factory for cache stores
pub struct CacheProviderFactory;

impl CacheProviderFactory {
    /// Create the configured cache store
    ///
    /// A disabled cache yields the null provider.
    pub fn create(config: &CacheConfig) -> Result<Arc<dyn CacheProvider>> {
        if !config.enabled {
            info!("Cache disabled, using null provider");
            return Ok(Self::create_null());
        }

        let provider: Arc<dyn CacheProvider> = match config.provider {
            CacheProviderKind::Moka => Arc::new(MokaCacheProvider::with_capacity(config.max_entries)),
            CacheProviderKind::Redis => Self::create_redis(config)?,
            CacheProviderKind::Null => Self::create_null(),
        };
        info!(provider = provider.provider_name(), "Cache provider ready");
        Ok(provider)
    }

    /// Create the cache-aside layer: configured store, namespace and TTLs
    pub fn create_cache_aside(config: &CacheConfig) -> Result<CacheAside> {
        let policy = TtlPolicy::from_overrides(&config.ttl_overrides)?;
        let cache = SharedCacheProvider::from_arc(Self::create(config)?)
            .with_namespace(config.namespace.clone());
        Ok(CacheAside::new(cache, policy))
    }

    /// Create a cache that never stores anything
    pub fn create_null() -> Arc<dyn CacheProvider> {
        Arc::new(NullCacheProvider::new())
    }

    #[cfg(feature = "cache-redis")]
    fn create_redis(config: &CacheConfig) -> Result<Arc<dyn CacheProvider>> {
        let url = config
            .redis_url
            .as_deref()
            .ok_or_else(|| Error::config("Redis URL required for redis cache provider"))?;
        // Keys arrive already namespaced by `SharedCacheProvider`
        let prefix = format!("{}{CACHE_NAMESPACE_SEPARATOR}", config.namespace);
        Ok(Arc::new(
            tbr_providers::cache::RedisCacheProvider::new(url)?.with_key_prefix(prefix),
        ))
    }

    #[cfg(not(feature = "cache-redis"))]
    fn create_redis(_config: &CacheConfig) -> Result<Arc<dyn CacheProvider>> {
        Err(Error::config(
            "Redis cache provider requested but the cache-redis feature is not enabled",
        ))
    }
}

/// Factory for item fetchers
pub struct ItemFetcherFactory;

impl ItemFetcherFactory {
    /// Create the fetcher for the configured source
    pub fn create(config: &FetchConfig) -> Result<Arc<dyn ItemFetcher>> {
        let fetcher = match config.source {
            FetchSource::Http => Self::create_http(config)?,
            FetchSource::Social => Self::create_social(config)?,
        };
        info!(fetcher = fetcher.fetcher_name(), "Item fetcher ready");
        Ok(fetcher)
    }

    /// `GET base_url?query_param=item`; needs `base_url`
    pub fn create_http(config: &FetchConfig) -> Result<Arc<dyn ItemFetcher>> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| Error::config("fetch.base_url is required to fetch items"))?;

        Ok(Arc::new(HttpItemFetcher::new(HttpFetchConfig {
            base_url,
            query_param: config.query_param.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        })?))
    }

    /// Social image search over the configured platforms
    pub fn create_social(config: &FetchConfig) -> Result<Arc<dyn ItemFetcher>> {
        let social = &config.social;
        Ok(Arc::new(SocialImageFetcher::new(SocialFetchConfig {
            platforms: social.platforms.clone(),
            subreddits: social.subreddits.clone(),
            max_images: social.max_images,
            reddit_base_url: social.reddit_base_url.clone(),
            pinterest_base_url: social.pinterest_base_url.clone(),
            flickr_base_url: social.flickr_base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        })?))
    }
}
