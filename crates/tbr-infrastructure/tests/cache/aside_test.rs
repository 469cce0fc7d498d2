//! Cache-Aside Tests

use crate::utils::ScriptedCacheProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tbr_domain::error::{Error, Result};
use tbr_domain::value_objects::CacheCategory;
use tbr_infrastructure::cache::{CacheAside, SharedCacheProvider, TtlPolicy};

fn aside(store: &Arc<ScriptedCacheProvider>) -> CacheAside {
    CacheAside::new(
        SharedCacheProvider::from_arc(store.clone()).with_namespace("tbr"),
        TtlPolicy::new(),
    )
}

async fn counted(calls: &AtomicUsize, value: &str) -> Result<String> {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(value.to_string())
}

#[tokio::test]
async fn test_miss_then_hit() {
    let store = Arc::new(ScriptedCacheProvider::new());
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    let miss = cache
        .get_or_compute("pois:paris", CacheCategory::Pois, || counted(&calls, "louvre"))
        .await
        .unwrap();
    let hit = cache
        .get_or_compute("pois:paris", CacheCategory::Pois, || counted(&calls, "other"))
        .await
        .unwrap();

    assert!(!miss.from_cache);
    assert!(hit.from_cache);
    assert_eq!(hit.value, "louvre");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_entry_written_with_namespace_and_category_ttl() {
    let store = Arc::new(ScriptedCacheProvider::new());
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    cache
        .get_or_compute("translations:hola", CacheCategory::Translations, || {
            counted(&calls, "hello")
        })
        .await
        .unwrap();

    assert_eq!(store.keys(), vec!["tbr:translations:hola".to_string()]);
    assert_eq!(
        store.ttl_of("tbr:translations:hola"),
        Some(CacheCategory::Translations.default_ttl())
    );
}

#[tokio::test]
async fn test_compute_error_propagates_and_is_not_stored() {
    let store = Arc::new(ScriptedCacheProvider::new());
    let cache = aside(&store);

    let result = cache
        .get_or_compute("weather:oslo", CacheCategory::Weather, || async {
            Err::<String, _>(Error::timeout("weather api", Duration::from_secs(10)))
        })
        .await;

    assert!(result.unwrap_err().is_timeout());
    assert_eq!(store.writes(), 0);
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn test_read_failure_counts_as_miss() {
    let store = Arc::new(ScriptedCacheProvider::new());
    store.fail_reads(true);
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    let result = cache
        .get_or_compute("search:beaches", CacheCategory::Search, || {
            counted(&calls, "results")
        })
        .await
        .unwrap();

    assert_eq!(result.value, "results");
    assert!(!result.from_cache);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // The fresh value is still written
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_write_failure_still_returns_value() {
    let store = Arc::new(ScriptedCacheProvider::new());
    store.fail_writes(true);
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    let result = cache
        .get_or_compute("images:fjord", CacheCategory::Images, || counted(&calls, "url"))
        .await
        .unwrap();

    assert_eq!(result.value, "url");
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn test_undecodable_entry_is_recomputed() {
    let store = Arc::new(ScriptedCacheProvider::new());
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    // A string is cached where a number is expected
    cache
        .get_or_compute("routes:a-b", CacheCategory::Routes, || counted(&calls, "fast"))
        .await
        .unwrap();
    let result = cache
        .get_or_compute("routes:a-b", CacheCategory::Routes, || async {
            Ok::<u32, Error>(42)
        })
        .await
        .unwrap();

    assert_eq!(result.value, 42);
    assert!(!result.from_cache);
}

#[tokio::test]
async fn test_invalidate_and_refresh() {
    let store = Arc::new(ScriptedCacheProvider::new());
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    cache
        .get_or_compute("social:oslo", CacheCategory::Social, || counted(&calls, "v1"))
        .await
        .unwrap();

    let refreshed = cache
        .refresh("social:oslo", CacheCategory::Social, || counted(&calls, "v2"))
        .await
        .unwrap();
    assert_eq!(refreshed, "v2");

    let hit = cache
        .get_or_compute("social:oslo", CacheCategory::Social, || counted(&calls, "v3"))
        .await
        .unwrap();
    assert_eq!(hit.value, "v2");

    assert!(cache.invalidate("social:oslo").await.unwrap());
    assert!(!cache.invalidate("social:oslo").await.unwrap());

    let recomputed = cache
        .get_or_compute("social:oslo", CacheCategory::Social, || counted(&calls, "v4"))
        .await
        .unwrap();
    assert_eq!(recomputed.value, "v4");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_invalid_key_rejected_before_store_and_compute() {
    let store = Arc::new(ScriptedCacheProvider::new());
    let cache = aside(&store);
    let calls = AtomicUsize::new(0);

    let empty = cache
        .get_or_compute("", CacheCategory::Pois, || counted(&calls, "louvre"))
        .await
        .unwrap_err();
    let multiline = cache
        .refresh("pois:\nparis", CacheCategory::Pois, || counted(&calls, "louvre"))
        .await
        .unwrap_err();

    assert!(matches!(empty, Error::InvalidArgument { .. }), "{empty}");
    assert!(matches!(multiline, Error::InvalidArgument { .. }), "{multiline}");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
}
