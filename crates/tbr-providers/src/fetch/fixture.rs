//! Fixed-response item fetcher
//!
//! Serves canned payloads keyed by item. Items without a payload fail with a
//! 404 upstream error. Optional per-item latency makes completion order
//! controllable in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::ItemFetcher;

/// Item fetcher answering from an in-memory table
#[derive(Debug, Default)]
pub struct StaticItemFetcher {
    responses: HashMap<String, serde_json::Value>,
    latency: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl StaticItemFetcher {
    /// Create an empty fetcher; every item fails until given a response
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `item` with `value`
    pub fn with_response<S: Into<String>>(mut self, item: S, value: serde_json::Value) -> Self {
        self.responses.insert(item.into(), value);
        self
    }

    /// Delay the answer for `item`
    pub fn with_latency<S: Into<String>>(mut self, item: S, latency: Duration) -> Self {
        self.latency.insert(item.into(), latency);
        self
    }

    /// Number of fetches served so far, failures included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemFetcher for StaticItemFetcher {
    async fn fetch(&self, item: &str) -> Result<serde_json::Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency.get(item) {
            tokio::time::sleep(*latency).await;
        }

        self.responses
            .get(item)
            .cloned()
            .ok_or_else(|| Error::upstream(404, format!("No fixture for '{item}'")))
    }

    fn fetcher_name(&self) -> &str {
        "static"
    }
}
