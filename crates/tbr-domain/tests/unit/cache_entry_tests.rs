//! Unit tests for cache entry configuration and statistics

use std::time::Duration;
use tbr_domain::constants::DEFAULT_CACHE_TTL_SECS;
use tbr_domain::{CacheEntryConfig, CacheStats};

#[test]
fn test_default_entry_config_uses_fallback_ttl() {
    let config = CacheEntryConfig::default();
    assert_eq!(
        config.effective_ttl(),
        Duration::from_secs(DEFAULT_CACHE_TTL_SECS)
    );
}

#[test]
fn test_entry_config_without_ttl_falls_back() {
    let config = CacheEntryConfig { ttl: None };
    assert_eq!(
        config.effective_ttl(),
        Duration::from_secs(DEFAULT_CACHE_TTL_SECS)
    );
}

#[test]
fn test_entry_config_ttl_builders() {
    assert_eq!(
        CacheEntryConfig::new().with_ttl_secs(90).effective_ttl(),
        Duration::from_secs(90)
    );
    assert_eq!(
        CacheEntryConfig::new()
            .with_ttl(Duration::from_millis(1500))
            .effective_ttl(),
        Duration::from_millis(1500)
    );
}

#[test]
fn test_stats_hit_rate() {
    let stats = CacheStats::from_counters(3, 1, 2);
    assert!((stats.hit_rate - 0.75).abs() < f64::EPSILON);
    assert_eq!(stats.entries, 2);

    let empty = CacheStats::new();
    assert!(empty.calculate_hit_rate().abs() < f64::EPSILON);
}
