//! Caching with deterministic keys and per-category TTLs
//!
//! Cache provider implementations are in the `tbr-providers` crate.
//! Port types (`CacheProvider`, `CacheEntryConfig`) are in `tbr-domain`.

pub mod aside;
pub mod key;
pub mod policy;
pub mod provider;

pub use aside::{CacheAside, CacheOperationResult};
pub use key::CacheKey;
pub use policy::TtlPolicy;
pub use provider::SharedCacheProvider;
