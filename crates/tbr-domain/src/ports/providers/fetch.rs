//! Item Fetcher Port
//!
//! One upstream lookup per work item (a location name, a search query).
//! Implementations may enforce their own deadline and report it as
//! [`Error::Timeout`](crate::Error::Timeout); callers above this port never
//! impose one.

use crate::error::Result;
use async_trait::async_trait;

/// Fetches the upstream payload for a single work item
#[async_trait]
pub trait ItemFetcher: Send + Sync + std::fmt::Debug {
    /// Fetch the JSON payload for `item`
    async fn fetch(&self, item: &str) -> Result<serde_json::Value>;

    /// Identifier used in logs ("http", "static", ...)
    fn fetcher_name(&self) -> &str;
}
