//! Configuration loader
//!
//! Sources are merged in this order, later ones overriding earlier ones:
//! 1. `AppConfig::default()`
//! 2. a TOML file (explicit path, or the first `tbr.toml` found in the
//!    working directory, `./tbr/`, the user config dir or `~/.tbr/`)
//! 3. environment variables such as `TBR__BATCH__BATCH_SIZE=3` or
//!    `TBR__GATES__REDDIT=1`

use crate::cache::TtlPolicy;
use crate::config::{
    AppConfig, CacheConfig, CacheProviderKind, FetchConfig, LoggingConfig, SocialConfig,
};
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};
use tbr_domain::error::{Error, Result};
use tbr_domain::value_objects::BatchConfig;
use tbr_providers::fetch::SocialPlatform;

/// Separator between the prefix and nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            let found = config_path.exists();
            if found {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, found);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{ENV_SEPARATOR}", self.env_prefix)).split(ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        Self::validate(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = to_toml(config)?;
        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;
        Ok(())
    }

    /// First existing default configuration file, if any
    pub fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Validate configuration values
    pub fn validate(config: &AppConfig) -> Result<()> {
        validate_logging_config(&config.logging)?;
        validate_cache_config(&config.cache)?;
        validate_batch_config(&config.batch)?;
        validate_gates_config(config)?;
        validate_fetch_config(&config.fetch)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a configuration as pretty TOML
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.namespace.trim().is_empty() {
        return Err(Error::config("Cache namespace cannot be empty"));
    }
    if config.enabled
        && config.provider == CacheProviderKind::Redis
        && config.redis_url.as_deref().is_none_or(|url| url.trim().is_empty())
    {
        return Err(Error::config(
            "Redis URL is required when the redis cache provider is selected",
        ));
    }
    TtlPolicy::from_overrides(&config.ttl_overrides).map(|_| ())
}

fn validate_batch_config(config: &BatchConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| Error::config(format!("Invalid batch configuration: {e}")))
}

fn validate_gates_config(config: &AppConfig) -> Result<()> {
    if let Some((name, _)) = config.gates.iter().find(|(_, capacity)| **capacity == 0) {
        return Err(Error::config(format!(
            "Gate '{name}' capacity must be at least 1"
        )));
    }
    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<()> {
    if config.timeout_secs == 0 {
        return Err(Error::config("Fetch timeout cannot be 0"));
    }
    if config.query_param.trim().is_empty() {
        return Err(Error::config("Fetch query parameter cannot be empty"));
    }
    validate_social_config(&config.social)
}

fn validate_social_config(config: &SocialConfig) -> Result<()> {
    if config.platforms.is_empty() {
        return Err(Error::config("Social search needs at least one platform"));
    }
    if config.max_images == 0 {
        return Err(Error::config("Social max_images must be at least 1"));
    }
    if config.platforms.contains(&SocialPlatform::Reddit)
        && config.subreddits.iter().all(|name| name.trim().is_empty())
    {
        return Err(Error::config(
            "Social search on reddit needs at least one subreddit",
        ));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set batch configuration
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.config.batch = batch;
        self
    }

    /// Add or replace a named gate
    pub fn with_gate<S: Into<String>>(mut self, name: S, capacity: usize) -> Self {
        self.config.gates.insert(name.into(), capacity);
        self
    }

    /// Set fetch configuration
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.config.fetch = fetch;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig> {
        ConfigLoader::validate(&self.config)?;
        Ok(self.config)
    }
}
