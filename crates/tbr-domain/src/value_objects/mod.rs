//! Value Objects
//!
//! Immutable descriptions passed between layers.

/// Batch configuration and outcomes
pub mod batch;
/// Cache categories and their TTL defaults
pub mod cache;

pub use batch::{BatchConfig, BatchOutcome};
pub use cache::CacheCategory;
