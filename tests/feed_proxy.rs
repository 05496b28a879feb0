//! End-to-end tests for the archive-to-RSS proxy.
//!
//! A stub upstream serves fixture HTML on a random local port; the proxy
//! is pointed at it and exercised over real sockets.

use std::net::SocketAddr;

use axum::http::header;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use letterfeed::{Config, FeedService, WebServer};

const BACKLIGHT: &str = include_str!("fixtures/backlight.html");

/// Spawn a stub archive host and return its address.
async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/tcarmody/archive", get(|| async { Html(BACKLIGHT) }))
        .route(
            "/garbled/archive",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html")],
                    vec![0xffu8, 0xfe, 0xfd],
                )
            }),
        )
        .route(
            "/quiet/archive",
            get(|| async { Html("<html><head><title>Quiet</title></head><body></body></html>") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn test_config(upstream: SocketAddr) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.upstream.base_url = format!("http://{upstream}");
    config
}

async fn spawn_proxy(upstream: SocketAddr) -> SocketAddr {
    let server = WebServer::new(&test_config(upstream)).unwrap();
    server.run_with_addr().await.unwrap()
}

#[tokio::test]
async fn test_proxy_returns_rss_for_archive() {
    let upstream = spawn_upstream().await;
    let proxy = spawn_proxy(upstream).await;

    let resp = reqwest::get(format!("http://{proxy}/tcarmody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/rss+xml"));

    let body = resp.text().await.unwrap();
    assert!(body.contains("<rss version=\"2.0\">"));
    assert!(body.contains("<title>Backlight</title>"));
    assert!(body.contains(&format!("<link>http://{upstream}/tcarmody</link>")));
    assert!(body.contains("<title>University dreams</title>"));
    assert!(body.contains("<pubDate>Fri, 21 Sep 2018 00:00:00 +0000</pubDate>"));

    // All ten issues made it through
    assert_eq!(body.matches("<item>").count(), 10);
}

#[tokio::test]
async fn test_proxy_empty_archive_is_valid_feed() {
    let upstream = spawn_upstream().await;
    let proxy = spawn_proxy(upstream).await;

    let resp = reqwest::get(format!("http://{proxy}/quiet")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<title>Quiet</title>"));
    assert!(!body.contains("<item>"));
}

#[tokio::test]
async fn test_proxy_maps_missing_archive_to_bad_gateway() {
    let upstream = spawn_upstream().await;
    let proxy = spawn_proxy(upstream).await;

    let resp = reqwest::get(format!("http://{proxy}/nobody")).await.unwrap();

    assert_eq!(resp.status(), 502);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_proxy_maps_unreachable_upstream_to_bad_gateway() {
    // Grab a port that nothing is listening on
    let unused = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = unused.local_addr().unwrap();
    drop(unused);

    let proxy = spawn_proxy(dead_addr).await;

    let resp = reqwest::get(format!("http://{proxy}/tcarmody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
}

#[tokio::test]
async fn test_proxy_maps_undecodable_body_to_internal_error() {
    let upstream = spawn_upstream().await;
    let proxy = spawn_proxy(upstream).await;

    let resp = reqwest::get(format!("http://{proxy}/garbled"))
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favicon_redirects_to_upstream_icon() {
    let upstream = spawn_upstream().await;
    let proxy = spawn_proxy(upstream).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let resp = client
        .get(format!("http://{proxy}/favicon.ico"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 301);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        &format!("http://{upstream}/favicon.ico")
    );
}

#[tokio::test]
async fn test_feed_service_extracts_backlight() {
    let upstream = spawn_upstream().await;
    let config = test_config(upstream);

    let service = FeedService::new(&config.upstream).unwrap();
    let feed = service.feed_for("/tcarmody").await.unwrap();

    assert_eq!(feed.title, "Backlight");
    assert_eq!(feed.link, format!("http://{upstream}/tcarmody"));
    assert_eq!(feed.items.len(), 10);

    let age = chrono::Utc::now().signed_duration_since(feed.created_at);
    assert!(age.num_seconds() < 1);

    let item = &feed.items[2];
    assert_eq!(item.title, "University dreams");
    assert_eq!(
        item.description,
        "*Hogwarts was the first and best home he had ever known. \
         He and Voldemort and Snape, the abandoned boys, had all found home here."
    );
}

#[tokio::test]
async fn test_feed_service_rejects_missing_archive() {
    let upstream = spawn_upstream().await;
    let config = test_config(upstream);

    let service = FeedService::new(&config.upstream).unwrap();
    let err = service.feed_for("/nobody").await.unwrap_err();

    assert!(matches!(err, letterfeed::LetterfeedError::Upstream(_)));
    assert!(err.to_string().contains("404"));
}
