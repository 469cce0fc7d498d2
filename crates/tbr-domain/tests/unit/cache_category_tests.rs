//! Unit tests for cache categories

use std::time::Duration;
use tbr_domain::CacheCategory;

#[test]
fn test_category_round_trips_through_name() {
    for category in CacheCategory::ALL {
        let parsed: CacheCategory = category.as_str().parse().unwrap();
        assert_eq!(parsed, category);
    }
}

#[test]
fn test_category_parse_is_lenient_on_case_and_dashes() {
    assert_eq!("POIS".parse::<CacheCategory>().unwrap(), CacheCategory::Pois);
    assert_eq!(
        "ai-plans".parse::<CacheCategory>().unwrap(),
        CacheCategory::AiPlans
    );
}

#[test]
fn test_unknown_category_lists_choices() {
    let error = "hotels".parse::<CacheCategory>().unwrap_err();
    let message = error.to_string();
    assert!(message.contains("hotels"));
    assert!(message.contains("pois"));
}

#[test]
fn test_weather_expires_before_pois() {
    assert_eq!(CacheCategory::Weather.default_ttl(), Duration::from_secs(3600));
    assert!(CacheCategory::Weather.default_ttl() < CacheCategory::Pois.default_ttl());
}

#[test]
fn test_category_serde_uses_snake_case() {
    let json = serde_json::to_string(&CacheCategory::AiPlans).unwrap();
    assert_eq!(json, "\"ai_plans\"");
}
