//! Main application configuration

use super::{CacheConfig, FetchConfig, LoggingConfig};
use crate::constants::{REDDIT_GATE_CAPACITY, REDDIT_GATE_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tbr_domain::value_objects::BatchConfig;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Batch size and pacing
    pub batch: BatchConfig,
    /// Concurrency gates: upstream name to capacity
    pub gates: BTreeMap<String, usize>,
    /// HTTP item fetcher
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            cache: CacheConfig::default(),
            batch: BatchConfig::default(),
            gates: BTreeMap::from([(REDDIT_GATE_NAME.to_string(), REDDIT_GATE_CAPACITY)]),
            fetch: FetchConfig::default(),
        }
    }
}
