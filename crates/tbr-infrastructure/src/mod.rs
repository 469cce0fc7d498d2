//! # Infrastructure Layer
//!
//! Orchestration that keeps rate-limited upstreams healthy, plus the
//! cross-cutting concerns every binary needs.
//!
//! ## Module Categories
//!
//! ### Upstream Shielding
//! | Module | Description |
//! |--------|-------------|
//! | [`concurrency`] | FIFO concurrency gates and the named gate registry |
//! | [`batch`] | Fixed-size batches with an inter-batch delay |
//! | [`cache`] | Cache keys, TTL policy and cache-aside over a shared provider |
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`factory`] | Builds providers from configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod batch;
pub mod cache;
pub mod concurrency;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod factory;
pub mod logging;

// Re-export commonly used types
pub use batch::BatchFetcher;
pub use cache::{CacheAside, CacheKey, SharedCacheProvider, TtlPolicy};
pub use concurrency::{ConcurrencyGate, GatePermit, GateRegistry};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use factory::{CacheProviderFactory, ItemFetcherFactory};
pub use logging::init_logging;
