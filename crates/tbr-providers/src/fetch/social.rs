//! Social image fetcher
//!
//! Searches public, key-less endpoints for travel photos of a place and
//! merges the hits, best scored first:
//!
//! - Reddit: one top-posts search per photography subreddit, keeping direct
//!   image links whose title is not on the exclude list;
//! - Pinterest: the public pin search resource, highest rendition available;
//! - Flickr: the public photo feed, upgraded to the large rendition.
//!
//! Each platform stops at `max_images`. A failing subreddit or platform is
//! logged and skipped; a lookup fails only when every enabled platform failed.
//!
//! Subreddits are searched one after another, so one lookup never has more
//! than one Reddit request in flight. Run lookups behind the `reddit` gate to
//! cap them across items.

use crate::constants::{
    CONTENT_TYPE_JSON, FETCH_DEFAULT_TIMEOUT_SECS, FETCH_DEFAULT_USER_AGENT,
    SOCIAL_DEFAULT_MAX_IMAGES, SOCIAL_DEFAULT_SUBREDDITS, SOCIAL_EXCLUDED_TITLE_WORDS,
    SOCIAL_FLICKR_FEED_URL, SOCIAL_IMAGE_EXTENSIONS, SOCIAL_IMAGE_HOSTS,
    SOCIAL_PINTEREST_IMAGE_SIZES, SOCIAL_PINTEREST_SEARCH_URL, SOCIAL_REDDIT_BASE_URL,
    SOCIAL_REDDIT_SEARCH_LIMIT,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tbr_domain::error::{Error, Result};
use tbr_domain::ports::providers::ItemFetcher;
use tracing::{debug, warn};

/// Platform an image was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Reddit,
    Pinterest,
    Flickr,
}

impl SocialPlatform {
    /// Every platform, in search order
    pub const ALL: [Self; 3] = [Self::Reddit, Self::Pinterest, Self::Flickr];

    /// Configuration name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::Pinterest => "pinterest",
            Self::Flickr => "flickr",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialPlatform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown social platform '{s}'. Expected one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

/// One image found on a social platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialImage {
    pub url: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub platform: SocialPlatform,
    /// Upvotes on Reddit, saves on Pinterest, 0 on Flickr
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub source_url: Option<String>,
}

/// Merged images for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSearchResult {
    pub query: String,
    pub total_images: usize,
    pub images: Vec<SocialImage>,
}

/// Social fetcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialFetchConfig {
    /// Platforms searched, in order
    pub platforms: Vec<SocialPlatform>,
    /// Subreddits searched, in order
    pub subreddits: Vec<String>,
    /// Images kept per platform
    pub max_images: usize,
    pub reddit_base_url: String,
    pub pinterest_base_url: String,
    pub flickr_base_url: String,
    /// Per-request deadline
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SocialFetchConfig {
    fn default() -> Self {
        Self {
            platforms: SocialPlatform::ALL.to_vec(),
            subreddits: SOCIAL_DEFAULT_SUBREDDITS.map(str::to_string).to_vec(),
            max_images: SOCIAL_DEFAULT_MAX_IMAGES,
            reddit_base_url: SOCIAL_REDDIT_BASE_URL.to_string(),
            pinterest_base_url: SOCIAL_PINTEREST_SEARCH_URL.to_string(),
            flickr_base_url: SOCIAL_FLICKR_FEED_URL.to_string(),
            timeout: Duration::from_secs(FETCH_DEFAULT_TIMEOUT_SECS),
            user_agent: FETCH_DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Whether `url` points straight at an image
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    SOCIAL_IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        || SOCIAL_IMAGE_HOSTS.iter().any(|host| lower.contains(host))
}

/// Whether a post title marks it as something other than a travel photo
pub fn is_excluded_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    SOCIAL_EXCLUDED_TITLE_WORDS
        .iter()
        .any(|word| lower.contains(word))
}

/// Item fetcher searching Reddit, Pinterest and Flickr for images
#[derive(Debug, Clone)]
pub struct SocialImageFetcher {
    config: SocialFetchConfig,
    reddit_base: Url,
    pinterest_base: Url,
    flickr_base: Url,
    http_client: Client,
}

impl SocialImageFetcher {
    /// Build a fetcher with its own HTTP client
    pub fn new(config: SocialFetchConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::network_with_source("Failed to build HTTP client", e))?;
        Self::with_client(config, http_client)
    }

    /// Build a fetcher around an existing client
    pub fn with_client(config: SocialFetchConfig, http_client: Client) -> Result<Self> {
        if config.max_images == 0 {
            return Err(Error::invalid_argument("max_images must be at least 1"));
        }

        Ok(Self {
            reddit_base: parse_base_url("reddit_base_url", &config.reddit_base_url)?,
            pinterest_base: parse_base_url("pinterest_base_url", &config.pinterest_base_url)?,
            flickr_base: parse_base_url("flickr_base_url", &config.flickr_base_url)?,
            config,
            http_client,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &SocialFetchConfig {
        &self.config
    }

    /// Search every enabled platform and merge the hits by descending score
    pub async fn search(&self, query: &str) -> Result<SocialSearchResult> {
        let mut images = Vec::new();
        let mut succeeded = 0usize;
        let mut last_error = None;

        for &platform in &self.config.platforms {
            let found = match platform {
                SocialPlatform::Reddit => self.search_reddit(query).await,
                SocialPlatform::Pinterest => self.search_pinterest(query).await,
                SocialPlatform::Flickr => self.search_flickr(query).await,
            };

            match found {
                Ok(found) => {
                    debug!(%platform, found = found.len(), "Platform searched");
                    succeeded += 1;
                    images.extend(found);
                }
                Err(e) => {
                    warn!(%platform, error = %e, "Platform search failed, skipping");
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error.filter(|_| succeeded == 0) {
            return Err(e);
        }

        // Stable: equal scores keep platform order
        images.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(SocialSearchResult {
            query: query.to_string(),
            total_images: images.len(),
            images,
        })
    }

    /// Search the configured subreddits in order until `max_images` is reached
    ///
    /// Fails only when every subreddit searched failed.
    pub async fn search_reddit(&self, query: &str) -> Result<Vec<SocialImage>> {
        let max_images = self.config.max_images;
        let mut images = Vec::new();
        let mut searched = 0usize;
        let mut failed = 0usize;
        let mut last_error = None;

        for subreddit in &self.config.subreddits {
            if images.len() >= max_images {
                break;
            }
            searched += 1;

            let url = self.reddit_search_url(subreddit, query)?;
            debug!(subreddit = %subreddit, "Searching subreddit");

            match self.get_json::<RedditListing>(url).await {
                Ok(listing) => {
                    let posts = listing.data.children.into_iter().map(|child| child.data);
                    for image in posts.filter_map(reddit_image) {
                        if images.len() >= max_images {
                            break;
                        }
                        images.push(image);
                    }
                    debug!(subreddit = %subreddit, total = images.len(), "Subreddit searched");
                }
                Err(e) => {
                    warn!(subreddit = %subreddit, error = %e, "Subreddit search failed, skipping");
                    failed += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failed == searched => Err(e),
            _ => Ok(images),
        }
    }

    /// Search Pinterest pins
    pub async fn search_pinterest(&self, query: &str) -> Result<Vec<SocialImage>> {
        let options = serde_json::json!({
            "options": { "query": query, "scope": "pins" },
            "context": {},
        });
        let mut url = self.pinterest_base.clone();
        url.query_pairs_mut()
            .append_pair("source_url", &format!("/search/pins/?q={query}"))
            .append_pair("data", &options.to_string());

        let response: PinterestResponse = self.get_json(url).await?;
        Ok(response
            .resource_response
            .data
            .results
            .into_iter()
            .take(self.config.max_images)
            .filter_map(pin_image)
            .collect())
    }

    /// Search the Flickr public feed by tag
    pub async fn search_flickr(&self, query: &str) -> Result<Vec<SocialImage>> {
        let mut url = self.flickr_base.clone();
        url.query_pairs_mut()
            .append_pair("tags", query)
            .append_pair("format", "json")
            .append_pair("nojsoncallback", "1");

        let feed: FlickrFeed = self.get_json(url).await?;
        Ok(feed
            .items
            .into_iter()
            .take(self.config.max_images)
            .filter_map(flickr_image)
            .collect())
    }

    fn reddit_search_url(&self, subreddit: &str, query: &str) -> Result<Url> {
        let mut url = self.reddit_base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config("reddit_base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(["r", subreddit, "search.json"]);
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("restrict_sr", "1")
            .append_pair("sort", "top")
            .append_pair("limit", &SOCIAL_REDDIT_SEARCH_LIMIT.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .http_client
            .get(url.clone())
            .header("Accept", CONTENT_TYPE_JSON)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("GET {url}"), self.config.timeout)
                } else {
                    Error::network_with_source(format!("GET {url} failed"), e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::network_with_source(format!("Unexpected payload from {url}"), e))
    }
}

#[async_trait]
impl ItemFetcher for SocialImageFetcher {
    async fn fetch(&self, item: &str) -> Result<serde_json::Value> {
        let result = self.search(item).await?;
        serde_json::to_value(result)
            .map_err(|e| Error::infrastructure_with_source("Failed to encode social images", e))
    }

    fn fetcher_name(&self) -> &str {
        "social"
    }
}

fn parse_base_url(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw)
        .map_err(|e| Error::configuration_with_source(format!("Invalid {field} '{raw}'"), e))
}

fn reddit_image(post: RedditPost) -> Option<SocialImage> {
    if !is_image_url(&post.url) || is_excluded_title(&post.title) {
        return None;
    }

    Some(SocialImage {
        author_url: post
            .author
            .as_ref()
            .map(|author| format!("https://reddit.com/u/{author}")),
        source_url: post
            .permalink
            .map(|permalink| format!("https://reddit.com{permalink}")),
        timestamp: unix_timestamp(post.created_utc),
        url: post.url,
        title: Some(post.title).filter(|title| !title.is_empty()),
        author: post.author,
        platform: SocialPlatform::Reddit,
        score: post.score,
    })
}

fn pin_image(pin: Pin) -> Option<SocialImage> {
    let url = SOCIAL_PINTEREST_IMAGE_SIZES
        .iter()
        .find_map(|size| pin.images.get(*size).and_then(|image| image.url.clone()))?;
    let (author, author_url) = pin
        .pinner
        .map_or((None, None), |pinner| (pinner.username, pinner.profile_url));

    Some(SocialImage {
        url,
        title: pin
            .title
            .filter(|title| !title.is_empty())
            .or(pin.grid_title),
        author,
        author_url,
        platform: SocialPlatform::Pinterest,
        score: pin
            .aggregated_pin_data
            .map_or(0, |data| data.aggregated_stats.saves),
        timestamp: None,
        source_url: pin
            .id
            .map(|id| format!("https://www.pinterest.com/pin/{}/", json_text(&id))),
    })
}

fn flickr_image(item: FlickrItem) -> Option<SocialImage> {
    // _m is the small rendition, _b the large one
    let url = item.media.m.replace("_m.jpg", "_b.jpg");
    if url.is_empty() {
        return None;
    }

    Some(SocialImage {
        url,
        title: item.title,
        author: Some(flickr_author(&item.author)).filter(|author| !author.is_empty()),
        author_url: item.author_url,
        platform: SocialPlatform::Flickr,
        score: 0,
        timestamp: item.published,
        source_url: item.link,
    })
}

/// `nobody@flickr.com ("name")` -> `name`
fn flickr_author(raw: &str) -> String {
    raw.split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map_or(raw, |(name, _)| name)
        .trim_matches('"')
        .to_string()
}

#[allow(clippy::cast_possible_truncation)]
fn unix_timestamp(secs: f64) -> Option<String> {
    if secs <= 0.0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(secs as i64, 0).map(|time| time.to_rfc3339())
}

fn json_text(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

// Wire formats; every field is optional upstream

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RedditListingData {
    children: Vec<RedditChild>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RedditPost {
    url: String,
    title: String,
    author: Option<String>,
    score: i64,
    created_utc: f64,
    permalink: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PinterestResponse {
    resource_response: PinterestResource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PinterestResource {
    data: PinterestData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PinterestData {
    results: Vec<Pin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Pin {
    id: Option<serde_json::Value>,
    title: Option<String>,
    grid_title: Option<String>,
    images: HashMap<String, PinImage>,
    pinner: Option<Pinner>,
    aggregated_pin_data: Option<AggregatedPinData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PinImage {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Pinner {
    username: Option<String>,
    profile_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AggregatedPinData {
    aggregated_stats: AggregatedStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AggregatedStats {
    saves: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlickrFeed {
    items: Vec<FlickrItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlickrItem {
    title: Option<String>,
    link: Option<String>,
    media: FlickrMedia,
    author: String,
    author_url: Option<String>,
    published: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlickrMedia {
    m: String,
}
