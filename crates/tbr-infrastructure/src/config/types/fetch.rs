//! Upstream fetch configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tbr_domain::error::Error;
use tbr_providers::constants::{
    FETCH_DEFAULT_QUERY_PARAM, FETCH_DEFAULT_TIMEOUT_SECS, FETCH_DEFAULT_USER_AGENT,
};
use tbr_providers::fetch::{SocialFetchConfig, SocialPlatform};

/// Upstream queried for each item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    /// `GET base_url?query_param=item`
    #[default]
    Http,
    /// Image search across social platforms
    Social,
}

impl FetchSource {
    /// Configuration name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Social => "social",
        }
    }
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "social" => Ok(Self::Social),
            _ => Err(Error::invalid_argument(format!(
                "Unknown fetch source '{s}'. Expected one of: http, social"
            ))),
        }
    }
}

/// Item fetcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Upstream used by `tbr fetch`
    pub source: FetchSource,

    /// Endpoint queried once per item; required for the http source
    pub base_url: Option<String>,

    /// Query parameter carrying the item
    pub query_param: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent upstream
    pub user_agent: String,

    /// Social image search settings
    pub social: SocialConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source: FetchSource::default(),
            base_url: None,
            query_param: FETCH_DEFAULT_QUERY_PARAM.to_string(),
            timeout_secs: FETCH_DEFAULT_TIMEOUT_SECS,
            user_agent: FETCH_DEFAULT_USER_AGENT.to_string(),
            social: SocialConfig::default(),
        }
    }
}

/// Social image search configuration (`[fetch.social]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Platforms searched, in order
    pub platforms: Vec<SocialPlatform>,

    /// Subreddits searched, in order
    pub subreddits: Vec<String>,

    /// Images kept per platform
    pub max_images: usize,

    pub reddit_base_url: String,
    pub pinterest_base_url: String,
    pub flickr_base_url: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        let defaults = SocialFetchConfig::default();
        Self {
            platforms: defaults.platforms,
            subreddits: defaults.subreddits,
            max_images: defaults.max_images,
            reddit_base_url: defaults.reddit_base_url,
            pinterest_base_url: defaults.pinterest_base_url,
            flickr_base_url: defaults.flickr_base_url,
        }
    }
}
