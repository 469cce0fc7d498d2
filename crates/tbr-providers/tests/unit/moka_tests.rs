//! Moka Cache Provider Tests

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tbr_providers::CacheProvider;
use tbr_providers::cache::{CacheEntryConfig, MokaCacheProvider};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Poi {
    name: String,
    score: i32,
}

#[tokio::test]
async fn test_moka_provider_basic_operations() {
    let provider = MokaCacheProvider::new();

    let value = Poi {
        name: "Louvre".to_string(),
        score: 98,
    };

    let json = serde_json::to_string(&value).unwrap();
    provider
        .set_json("pois:paris", &json, CacheEntryConfig::default())
        .await
        .unwrap();

    let retrieved_json = provider.get_json("pois:paris").await.unwrap();
    let retrieved: Option<Poi> = retrieved_json.map(|j| serde_json::from_str(&j).unwrap());
    assert_eq!(retrieved, Some(value));

    assert!(provider.exists("pois:paris").await.unwrap());
    assert!(provider.delete("pois:paris").await.unwrap());
    assert!(!provider.exists("pois:paris").await.unwrap());
    assert!(provider.get_json("pois:paris").await.unwrap().is_none());
}

#[tokio::test]
async fn test_moka_provider_nonexistent_key() {
    let provider = MokaCacheProvider::new();

    assert!(provider.get_json("nonexistent").await.unwrap().is_none());
    assert!(!provider.exists("nonexistent").await.unwrap());
    assert!(!provider.delete("nonexistent").await.unwrap());
}

#[tokio::test]
async fn test_moka_provider_entry_expires_after_ttl() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json(
            "weather:oslo",
            "\"rain\"",
            CacheEntryConfig::new().with_ttl(Duration::from_millis(50)),
        )
        .await
        .unwrap();
    provider
        .set_json(
            "pois:oslo",
            "\"museum\"",
            CacheEntryConfig::new().with_ttl_secs(3600),
        )
        .await
        .unwrap();

    assert!(provider.get_json("weather:oslo").await.unwrap().is_some());

    std::thread::sleep(Duration::from_millis(150));

    assert!(provider.get_json("weather:oslo").await.unwrap().is_none());
    assert_eq!(
        provider.get_json("pois:oslo").await.unwrap().as_deref(),
        Some("\"museum\"")
    );
}

#[tokio::test]
async fn test_moka_provider_write_overwrites_value_and_ttl() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json(
            "routes:a-b",
            "\"old\"",
            CacheEntryConfig::new().with_ttl(Duration::from_millis(50)),
        )
        .await
        .unwrap();
    provider
        .set_json(
            "routes:a-b",
            "\"new\"",
            CacheEntryConfig::new().with_ttl_secs(3600),
        )
        .await
        .unwrap();

    std::thread::sleep(Duration::from_millis(150));

    assert_eq!(
        provider.get_json("routes:a-b").await.unwrap().as_deref(),
        Some("\"new\"")
    );
}

#[tokio::test]
async fn test_moka_provider_rejects_oversized_values() {
    let provider = MokaCacheProvider::new().with_max_entry_bytes(8);

    let result = provider
        .set_json("images:rome", "\"far too long\"", CacheEntryConfig::default())
        .await;

    assert!(result.is_err());
    assert!(!provider.exists("images:rome").await.unwrap());
}

#[tokio::test]
async fn test_moka_provider_clear_and_stats() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("key1", "\"value1\"", CacheEntryConfig::default())
        .await
        .unwrap();
    provider
        .set_json("key2", "\"value2\"", CacheEntryConfig::default())
        .await
        .unwrap();

    provider.get_json("key1").await.unwrap();
    provider.get_json("missing").await.unwrap();

    let stats = provider.stats().await.unwrap();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);

    provider.clear().await.unwrap();
    assert_eq!(provider.size().await.unwrap(), 0);
    assert!(!provider.exists("key1").await.unwrap());
}
