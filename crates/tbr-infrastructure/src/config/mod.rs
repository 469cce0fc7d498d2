//! Configuration management
//!
//! Layered configuration: built-in defaults, then a TOML file, then
//! `TBR__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader, to_toml};
pub use types::{
    AppConfig, CacheConfig, CacheProviderKind, FetchConfig, FetchSource, LoggingConfig,
    SocialConfig,
};
