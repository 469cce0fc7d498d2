//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheProvider | Key-value store with per-entry TTL |
//! | ItemFetcher | Fetches the upstream payload for one work item |

/// Cache provider port
pub mod cache;
/// Item fetcher port
pub mod fetch;

// Re-export provider ports for convenience
pub use cache::{CacheEntryConfig, CacheProvider, CacheStats};
pub use fetch::ItemFetcher;
