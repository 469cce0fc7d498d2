//! Unit tests for domain error types

use std::time::Duration;
use tbr_domain::Error;

#[test]
fn test_generic_error_display() {
    let error = Error::generic("Something went wrong");
    assert!(format!("{error}").contains("Something went wrong"));
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("batch_size must be positive");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "batch_size must be positive"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_timeout_is_distinct() {
    let error = Error::timeout("GET https://example.test", Duration::from_secs(10));
    assert!(error.is_timeout());
    assert!(format!("{error}").contains("10s"));

    let network = Error::network("connection refused");
    assert!(!network.is_timeout());
}

#[test]
fn test_upstream_rate_limited() {
    assert!(Error::upstream(429, "slow down").is_rate_limited());
    assert!(!Error::upstream(500, "boom").is_rate_limited());
}

#[test]
fn test_io_error_from() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io.into();
    assert!(matches!(error, Error::IoSimple { .. }));
}

#[test]
fn test_json_error_from() {
    let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = parse.into();
    assert!(format!("{error}").starts_with("JSON parsing error"));
}
