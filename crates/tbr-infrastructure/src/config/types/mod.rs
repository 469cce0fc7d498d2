//! Configuration types module

pub mod app;
pub mod cache;
pub mod fetch;
pub mod logging;

pub use app::AppConfig;
pub use cache::{CacheConfig, CacheProviderKind};
pub use fetch::{FetchConfig, FetchSource, SocialConfig};
pub use logging::LoggingConfig;
