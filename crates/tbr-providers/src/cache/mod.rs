//! Cache Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheProvider`] | Testing | Every read misses, writes are dropped |
//! | [`MokaCacheProvider`] | Local | In-memory cache with per-entry TTL |
//! | `RedisCacheProvider` | Shared | Redis-backed, TTL enforced server side |

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;

// Re-export domain types used by cache providers
pub use tbr_domain::ports::providers::cache::{CacheEntryConfig, CacheStats};
