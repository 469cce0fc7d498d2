//! Domain layer constants
//!
//! Defaults that are part of the domain contract. Infrastructure-specific
//! constants (file names, env prefixes, provider sizing) live in
//! `tbr_infrastructure::constants`.

// ============================================================================
// CACHE DOMAIN CONSTANTS
// ============================================================================

/// Fallback TTL for cache entries without a category (1 hour)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Separator between the segments of a cache key
pub const CACHE_KEY_SEPARATOR: char = ':';

/// Free-text context is cut to this many characters before fingerprinting
pub const CACHE_KEY_CONTEXT_MAX_CHARS: usize = 200;

/// Hex characters of the SHA-256 digest kept in a context fingerprint
pub const CACHE_KEY_FINGERPRINT_LEN: usize = 16;

/// Hard limit on the length of a finished cache key
pub const CACHE_KEY_MAX_LEN: usize = 250;

// ============================================================================
// CATEGORY TTLS
// ============================================================================

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

/// Geocoded location records
pub const TTL_LOCATIONS_SECS: u64 = 30 * DAY;

/// Points of interest around a location
pub const TTL_POIS_SECS: u64 = 7 * DAY;

/// Image search results (CDN and social sources)
pub const TTL_IMAGES_SECS: u64 = 30 * DAY;

/// Weather forecasts
pub const TTL_WEATHER_SECS: u64 = HOUR;

/// Route geometry and travel times
pub const TTL_ROUTES_SECS: u64 = DAY;

/// Machine translations
pub const TTL_TRANSLATIONS_SECS: u64 = 30 * DAY;

/// LLM-generated trip plans
pub const TTL_AI_PLANS_SECS: u64 = DAY;

/// Web search results
pub const TTL_SEARCH_SECS: u64 = 6 * HOUR;

/// Reddit, Pinterest and Flickr lookups
pub const TTL_SOCIAL_SECS: u64 = DAY;

// ============================================================================
// BATCH DOMAIN CONSTANTS
// ============================================================================

/// Default number of items processed concurrently per batch
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Default pause between two batches in milliseconds
pub const DEFAULT_BATCH_DELAY_MS: u64 = 1000;
