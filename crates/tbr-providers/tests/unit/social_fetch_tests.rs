//! Social Image Fetcher Tests
//!
//! A local listener stands in for Reddit, Pinterest and Flickr; each route
//! answers with a canned JSON body and every request target is recorded.

use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tbr_providers::ItemFetcher;
use tbr_providers::fetch::social::{is_excluded_title, is_image_url};
use tbr_providers::fetch::{SocialFetchConfig, SocialImageFetcher, SocialPlatform};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct Route {
    path: &'static str,
    status_line: &'static str,
    body: String,
}

fn ok(path: &'static str, body: serde_json::Value) -> Route {
    Route {
        path,
        status_line: "200 OK",
        body: body.to_string(),
    }
}

fn failing(path: &'static str, status_line: &'static str) -> Route {
    Route {
        path,
        status_line,
        body: r#"{"error":"unavailable"}"#.to_string(),
    }
}

/// Serve `routes` until the test ends; returns the root URL and the log of
/// request targets
async fn serve(routes: Vec<Route>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);

            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let target = request
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                let path = target.split('?').next().unwrap_or_default().to_string();
                log.lock().unwrap().push(target);

                let (status_line, body) = routes
                    .iter()
                    .find(|route| route.path == path)
                    .map_or(("404 Not Found", "{}".to_string()), |route| {
                        (route.status_line, route.body.clone())
                    });
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), requests)
}

fn config(root: &str, platforms: &[SocialPlatform], subreddits: &[&str]) -> SocialFetchConfig {
    SocialFetchConfig {
        platforms: platforms.to_vec(),
        subreddits: subreddits.iter().map(ToString::to_string).collect(),
        reddit_base_url: format!("{root}/reddit"),
        pinterest_base_url: format!("{root}/pinterest/search"),
        flickr_base_url: format!("{root}/flickr/feed"),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn post(url: &str, title: &str, score: i64) -> serde_json::Value {
    json!({
        "data": {
            "url": url,
            "title": title,
            "author": "wanderer",
            "score": score,
            "created_utc": 1_700_000_000.0,
            "permalink": format!("/r/travelphotography/comments/{score}/")
        }
    })
}

fn listing(posts: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "data": { "children": posts } })
}

fn urls(images: &[tbr_providers::fetch::SocialImage]) -> Vec<&str> {
    images.iter().map(|image| image.url.as_str()).collect()
}

#[test]
fn test_image_url_detection() {
    assert!(is_image_url("https://example.com/paris.jpg"));
    assert!(is_image_url("https://example.com/PARIS.JPEG"));
    assert!(is_image_url("https://example.com/night.webp"));
    assert!(is_image_url("https://i.redd.it/abc123"));
    assert!(is_image_url("https://i.imgur.com/xyz"));
    assert!(!is_image_url("https://www.reddit.com/r/travel/comments/1/"));
    assert!(!is_image_url("https://youtube.com/watch?v=1"));
}

#[test]
fn test_excluded_titles() {
    assert!(is_excluded_title("Funny pigeon in Venice"));
    assert!(is_excluded_title("Obligatory SELFIE at the Louvre"));
    assert!(is_excluded_title("my face when the train is late"));
    assert!(!is_excluded_title("Golden hour over the Seine"));
}

#[test]
fn test_platform_names_parse() {
    assert_eq!("Reddit".parse::<SocialPlatform>().unwrap(), SocialPlatform::Reddit);
    assert_eq!(" flickr ".parse::<SocialPlatform>().unwrap(), SocialPlatform::Flickr);
    assert!("twitter".parse::<SocialPlatform>().is_err());
}

#[test]
fn test_zero_max_images_rejected() {
    let result = SocialImageFetcher::new(SocialFetchConfig {
        max_images: 0,
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_invalid_base_url_rejected() {
    let result = SocialImageFetcher::new(SocialFetchConfig {
        flickr_base_url: "not a url".to_string(),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[tokio::test]
async fn test_reddit_keeps_filtered_images_up_to_cap() {
    let (root, requests) = serve(vec![
        ok(
            "/reddit/r/travelphotography/search.json",
            listing(vec![
                post("https://example.com/louvre.jpg", "Louvre at dawn", 10),
                post("https://www.reddit.com/r/travel/comments/9/", "Trip report", 100),
                post("https://i.redd.it/meme.png", "Paris meme", 50),
                post("https://i.imgur.com/seine", "Seine by night", 5),
            ]),
        ),
        ok(
            "/reddit/r/cityporn/search.json",
            listing(vec![
                post("https://i.redd.it/skyline", "Skyline", 30),
                post("https://example.com/extra.png", "One too many", 1),
            ]),
        ),
    ])
    .await;
    let fetcher = SocialImageFetcher::new(SocialFetchConfig {
        max_images: 3,
        ..config(&root, &[SocialPlatform::Reddit], &["travelphotography", "cityporn"])
    })
    .unwrap();

    let result = fetcher.search("Paris").await.unwrap();

    assert_eq!(result.query, "Paris");
    assert_eq!(result.total_images, 3);
    assert_eq!(
        urls(&result.images),
        vec![
            "https://i.redd.it/skyline",
            "https://example.com/louvre.jpg",
            "https://i.imgur.com/seine",
        ]
    );

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("/reddit/r/travelphotography/search.json?"));
    for param in ["q=Paris", "restrict_sr=1", "sort=top", "limit=25"] {
        assert!(requests[0].contains(param), "{param} missing in {}", requests[0]);
    }
}

#[tokio::test]
async fn test_reddit_stops_searching_once_cap_reached() {
    let (root, requests) = serve(vec![ok(
        "/reddit/r/earthporn/search.json",
        listing(vec![
            post("https://i.redd.it/fjord", "Fjord", 7),
            post("https://i.redd.it/glacier", "Glacier", 3),
        ]),
    )])
    .await;
    let fetcher = SocialImageFetcher::new(SocialFetchConfig {
        max_images: 1,
        ..config(&root, &[SocialPlatform::Reddit], &["earthporn", "villageporn"])
    })
    .unwrap();

    let result = fetcher.search("Norway").await.unwrap();

    assert_eq!(urls(&result.images), vec!["https://i.redd.it/fjord"]);
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].contains("villageporn"));
}

#[tokio::test]
async fn test_reddit_post_metadata() {
    let (root, _requests) = serve(vec![ok(
        "/reddit/r/travelphotography/search.json",
        listing(vec![post("https://i.redd.it/alfama", "Alfama rooftops", 42)]),
    )])
    .await;
    let fetcher =
        SocialImageFetcher::new(config(&root, &[SocialPlatform::Reddit], &["travelphotography"]))
            .unwrap();

    let result = fetcher.search("Lisbon").await.unwrap();
    let image = &result.images[0];

    assert_eq!(image.platform, SocialPlatform::Reddit);
    assert_eq!(image.title.as_deref(), Some("Alfama rooftops"));
    assert_eq!(image.author.as_deref(), Some("wanderer"));
    assert_eq!(image.author_url.as_deref(), Some("https://reddit.com/u/wanderer"));
    assert_eq!(image.score, 42);
    assert_eq!(image.timestamp.as_deref(), Some("2023-11-14T22:13:20+00:00"));
    assert_eq!(
        image.source_url.as_deref(),
        Some("https://reddit.com/r/travelphotography/comments/42/")
    );
}

#[tokio::test]
async fn test_failing_subreddit_is_skipped() {
    let (root, _requests) = serve(vec![
        failing("/reddit/r/itookapicture/search.json", "500 Internal Server Error"),
        ok(
            "/reddit/r/travelphotography/search.json",
            listing(vec![post("https://i.redd.it/harbour", "Harbour", 8)]),
        ),
    ])
    .await;
    let fetcher = SocialImageFetcher::new(config(
        &root,
        &[SocialPlatform::Reddit],
        &["itookapicture", "travelphotography"],
    ))
    .unwrap();

    let result = fetcher.search("Porto").await.unwrap();

    assert_eq!(urls(&result.images), vec!["https://i.redd.it/harbour"]);
}

#[tokio::test]
async fn test_platforms_merge_by_descending_score() {
    let (root, _requests) = serve(vec![
        ok(
            "/reddit/r/travelphotography/search.json",
            listing(vec![post("https://i.redd.it/duomo", "Duomo", 25)]),
        ),
        ok(
            "/pinterest/search",
            json!({
                "resource_response": { "data": { "results": [
                    {
                        "id": "981",
                        "title": "",
                        "grid_title": "Milan in spring",
                        "images": { "736x": { "url": "https://i.pinimg.com/736x/milan.jpg" } },
                        "pinner": { "username": "pinner1", "profile_url": "https://pinterest.com/pinner1" },
                        "aggregated_pin_data": { "aggregated_stats": { "saves": 40 } }
                    },
                    { "id": 982, "images": {} }
                ] } }
            }),
        ),
        ok(
            "/flickr/feed",
            json!({
                "items": [{
                    "title": "Navigli",
                    "link": "https://www.flickr.com/photos/x/1/",
                    "media": { "m": "https://live.staticflickr.com/1/navigli_m.jpg" },
                    "author": "nobody@flickr.com (\"lens_walker\")",
                    "published": "2024-05-01T10:00:00Z"
                }]
            }),
        ),
    ])
    .await;
    let fetcher = SocialImageFetcher::new(config(
        &root,
        &SocialPlatform::ALL,
        &["travelphotography"],
    ))
    .unwrap();

    let result = fetcher.search("Milan").await.unwrap();

    assert_eq!(
        urls(&result.images),
        vec![
            "https://i.pinimg.com/736x/milan.jpg",
            "https://i.redd.it/duomo",
            "https://live.staticflickr.com/1/navigli_b.jpg",
        ]
    );

    let pin = &result.images[0];
    assert_eq!(pin.platform, SocialPlatform::Pinterest);
    assert_eq!(pin.title.as_deref(), Some("Milan in spring"));
    assert_eq!(pin.author.as_deref(), Some("pinner1"));
    assert_eq!(pin.source_url.as_deref(), Some("https://www.pinterest.com/pin/981/"));

    let photo = &result.images[2];
    assert_eq!(photo.platform, SocialPlatform::Flickr);
    assert_eq!(photo.author.as_deref(), Some("lens_walker"));
    assert_eq!(photo.timestamp.as_deref(), Some("2024-05-01T10:00:00Z"));
    assert_eq!(photo.score, 0);
}

#[tokio::test]
async fn test_failing_platform_is_isolated() {
    let (root, _requests) = serve(vec![
        ok(
            "/reddit/r/travelphotography/search.json",
            listing(vec![post("https://i.redd.it/tram", "Tram 28", 12)]),
        ),
        failing("/pinterest/search", "503 Service Unavailable"),
    ])
    .await;
    let fetcher = SocialImageFetcher::new(config(
        &root,
        &[SocialPlatform::Pinterest, SocialPlatform::Reddit],
        &["travelphotography"],
    ))
    .unwrap();

    let result = fetcher.search("Lisbon").await.unwrap();

    assert_eq!(urls(&result.images), vec!["https://i.redd.it/tram"]);
}

#[tokio::test]
async fn test_every_platform_failing_is_an_error() {
    let (root, _requests) = serve(vec![
        failing("/reddit/r/travelphotography/search.json", "429 Too Many Requests"),
        failing("/flickr/feed", "500 Internal Server Error"),
    ])
    .await;
    let fetcher = SocialImageFetcher::new(config(
        &root,
        &[SocialPlatform::Flickr, SocialPlatform::Reddit],
        &["travelphotography"],
    ))
    .unwrap();

    let error = fetcher.search("Lima").await.unwrap_err();

    assert!(error.is_rate_limited(), "expected the reddit 429, got {error}");
}

#[tokio::test]
async fn test_empty_results_are_not_an_error() {
    let (root, _requests) = serve(vec![ok(
        "/reddit/r/travelphotography/search.json",
        listing(Vec::new()),
    )])
    .await;
    let fetcher =
        SocialImageFetcher::new(config(&root, &[SocialPlatform::Reddit], &["travelphotography"]))
            .unwrap();

    let result = fetcher.search("Nowhere").await.unwrap();

    assert_eq!(result.total_images, 0);
    assert!(result.images.is_empty());
}

#[tokio::test]
async fn test_fetch_returns_search_json() {
    let (root, _requests) = serve(vec![ok(
        "/reddit/r/travelphotography/search.json",
        listing(vec![post("https://i.redd.it/canal", "Canal", 9)]),
    )])
    .await;
    let fetcher =
        SocialImageFetcher::new(config(&root, &[SocialPlatform::Reddit], &["travelphotography"]))
            .unwrap();

    let value = fetcher.fetch("Amsterdam").await.unwrap();

    assert_eq!(fetcher.fetcher_name(), "social");
    assert_eq!(value["query"], "Amsterdam");
    assert_eq!(value["total_images"], 1);
    assert_eq!(value["images"][0]["platform"], "reddit");
    assert_eq!(value["images"][0]["url"], "https://i.redd.it/canal");
}
