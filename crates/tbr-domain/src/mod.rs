//! # TravelBlogr Domain Layer
//!
//! Core types shared by every layer of the upstream-shield workspace.
//! Nothing here performs I/O; adapters live in `tbr-providers` and the
//! orchestration (gates, batching, cache-aside) lives in `tbr-infrastructure`.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Domain-level defaults (TTLs, key limits, batch defaults) |
//! | [`ports`] | Provider traits (`CacheProvider`, `ItemFetcher`) |
//! | [`value_objects`] | Cache categories, batch configuration and outcomes |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::providers::{CacheEntryConfig, CacheProvider, CacheStats, ItemFetcher};
pub use value_objects::{BatchConfig, BatchOutcome, CacheCategory};
