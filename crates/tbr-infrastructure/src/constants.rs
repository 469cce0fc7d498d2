//! Infrastructure layer constants
//!
//! Domain-level defaults (TTLs, batch sizing) are in `tbr_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tbr.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tbr";

/// Environment variable prefix for configuration (`TBR__SECTION__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "TBR";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "TBR_LOG";

/// File stem for rolling log files
pub const LOG_FILE_STEM: &str = "tbr";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Prefix applied to every key written by this process
pub const CACHE_DEFAULT_NAMESPACE: &str = "tbr";

/// Cache namespace separator
pub const CACHE_NAMESPACE_SEPARATOR: &str = ":";

// ============================================================================
// GATE CONSTANTS
// ============================================================================

/// Gate guarding Reddit-sourced lookups
pub const REDDIT_GATE_NAME: &str = "reddit";

/// Simultaneous Reddit requests allowed
pub const REDDIT_GATE_CAPACITY: usize = 2;
