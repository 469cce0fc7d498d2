//! # TravelBlogr Upstream Shield
//!
//! Keeps the travel-data APIs behind a blog platform (geocoding, points of
//! interest, images, weather, routing, translation, LLM trip plans and social
//! lookups) within their rate limits.
//!
//! ## Features
//!
//! - **Concurrency gates**: FIFO limit on simultaneous calls per upstream
//! - **Batch fetching**: fixed-size concurrent batches with a pause in between
//! - **Cache-aside**: deterministic keys, per-category TTLs, fail-open store
//!
//! ## Example
//!
//! ```ignore
//! use tbr::infrastructure::{BatchFetcher, CacheKey};
//! use tbr::{BatchConfig, CacheCategory};
//!
//! let fetcher = BatchFetcher::new(BatchConfig::new(5, 1000))?;
//! let outcome = fetcher
//!     .run_cached(places, &cache, CacheCategory::Locations,
//!         |place: &String| CacheKey::new(CacheCategory::Locations, place).build(),
//!         |place| geocode(place))
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - error type, ports and value objects
//! - `providers` - cache stores and item fetchers
//! - `infrastructure` - gates, batching, cache-aside, config and logging
//! - `cli` - the `tbr` command

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tbr_domain::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use tbr_providers::*;
}

/// Infrastructure layer - gates, batching, caching, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use tbr_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;
