//! Cache categories
//!
//! Every cached upstream result belongs to a category. The category is the
//! first segment of the cache key and decides how long the entry lives.

use crate::constants::{
    TTL_AI_PLANS_SECS, TTL_IMAGES_SECS, TTL_LOCATIONS_SECS, TTL_POIS_SECS, TTL_ROUTES_SECS,
    TTL_SEARCH_SECS, TTL_SOCIAL_SECS, TTL_TRANSLATIONS_SECS, TTL_WEATHER_SECS,
};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Namespace of a cached upstream result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCategory {
    /// Geocoded location records
    Locations,
    /// Points of interest
    Pois,
    /// Image search results
    Images,
    /// Weather forecasts
    Weather,
    /// Route geometry and durations
    Routes,
    /// Machine translations
    Translations,
    /// LLM-generated trip plans
    AiPlans,
    /// Web search results
    Search,
    /// Reddit, Pinterest and Flickr lookups
    Social,
}

impl CacheCategory {
    /// Every category, in declaration order
    pub const ALL: [CacheCategory; 9] = [
        Self::Locations,
        Self::Pois,
        Self::Images,
        Self::Weather,
        Self::Routes,
        Self::Translations,
        Self::AiPlans,
        Self::Search,
        Self::Social,
    ];

    /// Key segment and config name for this category
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Pois => "pois",
            Self::Images => "images",
            Self::Weather => "weather",
            Self::Routes => "routes",
            Self::Translations => "translations",
            Self::AiPlans => "ai_plans",
            Self::Search => "search",
            Self::Social => "social",
        }
    }

    /// Built-in time to live for entries of this category
    pub fn default_ttl(self) -> Duration {
        let secs = match self {
            Self::Locations => TTL_LOCATIONS_SECS,
            Self::Pois => TTL_POIS_SECS,
            Self::Images => TTL_IMAGES_SECS,
            Self::Weather => TTL_WEATHER_SECS,
            Self::Routes => TTL_ROUTES_SECS,
            Self::Translations => TTL_TRANSLATIONS_SECS,
            Self::AiPlans => TTL_AI_PLANS_SECS,
            Self::Search => TTL_SEARCH_SECS,
            Self::Social => TTL_SOCIAL_SECS,
        };
        Duration::from_secs(secs)
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown cache category '{s}'. Expected one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}
