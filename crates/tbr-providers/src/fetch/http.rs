//! HTTP item fetcher
//!
//! Looks up one work item against a JSON endpoint:
//! `GET {base_url}?{query_param}={item}`. The request carries its own deadline;
//! an elapsed deadline is reported as [`Error::Timeout`], distinct from other
//! network failures, so callers can tell a slow upstream from a broken one.

use crate::constants::{
    CONTENT_TYPE_JSON, FETCH_DEFAULT_QUERY_PARAM, FETCH_DEFAULT_TIMEOUT_SECS,
    FETCH_DEFAULT_USER_AGENT,
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::ItemFetcher;
use tracing::debug;

/// HTTP fetcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpFetchConfig {
    /// Endpoint queried for every item
    pub base_url: String,
    /// Query parameter carrying the item
    pub query_param: String,
    /// Per-request deadline
    pub timeout: Duration,
    /// User agent header
    pub user_agent: String,
}

impl HttpFetchConfig {
    /// Configuration for `base_url` with default parameter, deadline and agent
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            query_param: FETCH_DEFAULT_QUERY_PARAM.to_string(),
            timeout: Duration::from_secs(FETCH_DEFAULT_TIMEOUT_SECS),
            user_agent: FETCH_DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Override the per-request deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the query parameter name
    pub fn with_query_param<S: Into<String>>(mut self, query_param: S) -> Self {
        self.query_param = query_param.into();
        self
    }
}

/// Item fetcher for JSON HTTP endpoints
#[derive(Debug, Clone)]
pub struct HttpItemFetcher {
    base_url: Url,
    query_param: String,
    timeout: Duration,
    http_client: Client,
}

impl HttpItemFetcher {
    /// Build a fetcher with its own HTTP client
    pub fn new(config: HttpFetchConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::network_with_source("Failed to build HTTP client", e))?;
        Self::with_client(config, http_client)
    }

    /// Build a fetcher around an existing client
    pub fn with_client(config: HttpFetchConfig, http_client: Client) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::configuration_with_source(format!("Invalid base_url '{}'", config.base_url), e)
        })?;

        Ok(Self {
            base_url,
            query_param: config.query_param,
            timeout: config.timeout,
            http_client,
        })
    }

    /// URL requested for `item`
    pub fn request_url(&self, item: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair(&self.query_param, item);
        url
    }

    async fn check_and_parse(response: Response) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::upstream(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::network_with_source("Response parse failed", e))
    }
}

#[async_trait]
impl ItemFetcher for HttpItemFetcher {
    async fn fetch(&self, item: &str) -> Result<serde_json::Value> {
        let url = self.request_url(item);
        debug!(url = %url, "Fetching item");

        let response = self
            .http_client
            .get(url.clone())
            .header("Accept", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("GET {url}"), self.timeout)
                } else {
                    Error::network_with_source(format!("GET {url} failed"), e)
                }
            })?;

        Self::check_and_parse(response).await
    }

    fn fetcher_name(&self) -> &str {
        "http"
    }
}
