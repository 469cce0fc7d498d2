//! HTTP Item Fetcher Tests
//!
//! Each test serves one canned HTTP/1.1 response from a local listener.

use std::time::Duration;
use tbr_providers::fetch::{HttpFetchConfig, HttpItemFetcher};
use tbr_providers::{Error, ItemFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single response and return the base URL
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/search")
}

/// Accept a connection and never answer
async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    format!("http://{addr}/search")
}

#[test]
fn test_request_url_encodes_item() {
    let fetcher =
        HttpItemFetcher::new(HttpFetchConfig::new("https://api.example.test/pois")).unwrap();

    let url = fetcher.request_url("São Paulo & co");
    assert_eq!(url.path(), "/pois");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs, vec![("q".to_string(), "São Paulo & co".to_string())]);
}

#[test]
fn test_invalid_base_url_is_configuration_error() {
    let error = HttpItemFetcher::new(HttpFetchConfig::new("not a url")).unwrap_err();
    assert!(matches!(error, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_fetch_parses_json_body() {
    let base_url = serve_once("200 OK", r#"{"name":"Kyoto","pois":3}"#).await;
    let fetcher = HttpItemFetcher::new(HttpFetchConfig::new(base_url)).unwrap();

    let value = fetcher.fetch("Kyoto").await.unwrap();
    assert_eq!(value["name"], "Kyoto");
    assert_eq!(value["pois"], 3);
}

#[tokio::test]
async fn test_fetch_maps_status_to_upstream_error() {
    let base_url = serve_once("429 Too Many Requests", r#"{"error":"slow down"}"#).await;
    let fetcher = HttpItemFetcher::new(HttpFetchConfig::new(base_url)).unwrap();

    let error = fetcher.fetch("Lima").await.unwrap_err();
    assert!(error.is_rate_limited());
}

#[tokio::test]
async fn test_fetch_reports_deadline_as_timeout() {
    let base_url = serve_silence().await;
    let fetcher = HttpItemFetcher::new(
        HttpFetchConfig::new(base_url).with_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let error = fetcher.fetch("Quito").await.unwrap_err();
    assert!(error.is_timeout(), "expected timeout, got {error}");
}
