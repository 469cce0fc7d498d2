//! # TravelBlogr - Provider Implementations
//!
//! Adapters implementing the ports defined in `tbr-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheProvider` | Moka, Redis, Null |
//! | Fetch | `ItemFetcher` | Http, Social, Static |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! tbr-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```

// Re-export tbr-domain types commonly used with providers
pub use tbr_domain::error::{Error, Result};
pub use tbr_domain::ports::providers::{CacheProvider, ItemFetcher};

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
///
/// Implements `CacheProvider` for in-memory and shared stores.
pub mod cache;

/// Item fetcher implementations
///
/// Implements `ItemFetcher` for HTTP upstreams, social image search and fixed fixtures.
pub mod fetch;
