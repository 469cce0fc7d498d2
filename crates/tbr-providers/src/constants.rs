//! Provider implementation constants

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default number of entries held by the in-memory cache
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Largest JSON payload the in-memory cache accepts for one entry (1 MiB)
pub const CACHE_MAX_ENTRY_BYTES: usize = 1024 * 1024;

/// Redis URL used when none is configured
pub const REDIS_DEFAULT_URL: &str = "redis://localhost:6379";

/// Keys requested per `SCAN` step and deleted per `DEL`
pub const REDIS_SCAN_BATCH: usize = 500;

// ============================================================================
// HTTP FETCH CONSTANTS
// ============================================================================

/// Content-Type header for JSON requests
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Per-request deadline for upstream lookups in seconds
pub const FETCH_DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Query parameter carrying the work item
pub const FETCH_DEFAULT_QUERY_PARAM: &str = "q";

/// User agent sent to public upstream endpoints
pub const FETCH_DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; TravelBlogr/1.0)";

// ============================================================================
// SOCIAL IMAGE CONSTANTS
// ============================================================================

/// Reddit site root; searches go to `/r/<subreddit>/search.json`
pub const SOCIAL_REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Pinterest public pin search resource
pub const SOCIAL_PINTEREST_SEARCH_URL: &str =
    "https://www.pinterest.com/resource/BaseSearchResource/get/";

/// Flickr public photo feed
pub const SOCIAL_FLICKR_FEED_URL: &str = "https://www.flickr.com/services/feeds/photos_public.gne";

/// Photography subreddits searched, in order
pub const SOCIAL_DEFAULT_SUBREDDITS: [&str; 6] = [
    "itookapicture",
    "travelphotography",
    "earthporn",
    "cityporn",
    "villageporn",
    "architectureporn",
];

/// Images kept per platform
pub const SOCIAL_DEFAULT_MAX_IMAGES: usize = 20;

/// Posts requested per subreddit search
pub const SOCIAL_REDDIT_SEARCH_LIMIT: u32 = 25;

/// Link suffixes treated as direct images
pub const SOCIAL_IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Hosts serving only images
pub const SOCIAL_IMAGE_HOSTS: [&str; 2] = ["i.redd.it", "i.imgur.com"];

/// Title words marking posts that are not travel photos
pub const SOCIAL_EXCLUDED_TITLE_WORDS: [&str; 5] = ["meme", "funny", "joke", "selfie", "my face"];

/// Pinterest renditions, best first
pub const SOCIAL_PINTEREST_IMAGE_SIZES: [&str; 3] = ["orig", "736x", "564x"];
