mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

use shortlink_redirector::api::handlers::redirect_handler;
use shortlink_redirector::infrastructure::cache::{CacheService, Ttl};

use common::StubStore;

fn test_server(state: shortlink_redirector::AppState) -> TestServer {
    let app = Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn redirect_success() {
    let store = Arc::new(StubStore::new().with_link("go", "https://example.com/target"));
    let (state, _rx, _cache) = common::create_test_state(store);
    let server = test_server(state);

    let response = server.get("/go").await;

    assert_eq!(response.status_code(), 302);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn unknown_alias_renders_not_found_and_caches_nothing() {
    let store = Arc::new(StubStore::new());
    let (state, _rx, cache) = common::create_test_state(store);
    let server = test_server(state);

    let response = server.get("/alias-not-exist").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Not Found"));
    assert!(!cache.has("alias:alias-not-exist").await.unwrap());
}

#[tokio::test]
async fn first_hit_populates_cache_and_second_skips_the_fetch() {
    let store = Arc::new(StubStore::new().with_link("go", "https://example.com"));
    let (state, _rx, cache) = common::create_test_state(store.clone());
    let server = test_server(state);

    let first = server.get("/go").await;
    assert_eq!(first.status_code(), 302);
    assert_eq!(
        cache.get("alias:go").await.unwrap(),
        Some(json!("https://example.com"))
    );
    assert_eq!(store.link_fetch_count(), 1);

    let second = server.get("/go").await;
    assert_eq!(second.status_code(), 302);
    assert_eq!(second.header("location"), "https://example.com");
    assert_eq!(store.link_fetch_count(), 1);
}

#[tokio::test]
async fn repeated_requests_yield_the_same_destination() {
    let store = Arc::new(StubStore::new().with_link("go", "https://example.com"));
    let (state, _rx, _cache) = common::create_test_state(store);
    let server = test_server(state);

    for _ in 0..3 {
        let response = server.get("/go").await;
        assert_eq!(response.status_code(), 302);
        assert_eq!(response.header("location"), "https://example.com");
    }
}

#[tokio::test]
async fn preloaded_cache_entry_short_circuits_the_upstream() {
    let store = Arc::new(StubStore::new());
    let (state, mut rx, cache) = common::create_test_state(store.clone());
    cache
        .set(
            "alias:testing-cache-app",
            json!({ "destination": "https://google.com" }),
            Ttl::Default,
        )
        .await
        .unwrap();
    let server = test_server(state);

    let response = server.get("/testing-cache-app").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://google.com");
    assert_eq!(store.link_fetch_count(), 0);
    // The bypass alias never queues a view event either.
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn redirect_queues_a_view_event() {
    let store = Arc::new(StubStore::new().with_link("clickme", "https://example.com"));
    let (state, mut rx, _cache) = common::create_test_state(store);
    let server = test_server(state);

    let response = server.get("/clickme").await;
    assert_eq!(response.status_code(), 302);

    let event = rx.try_recv().expect("view event should be queued");
    assert_eq!(event.alias, "clickme");
}

#[tokio::test]
async fn info_request_renders_the_record_without_caching_or_counting() {
    let store = Arc::new(StubStore::new().with_link("demo", "https://example.com"));
    let (state, mut rx, cache) = common::create_test_state(store.clone());
    let server = test_server(state);

    let response = server.get("/demo+").await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("demo"));
    assert!(html.contains("https://example.com"));
    assert!(html.contains("3 views"));

    assert!(!cache.has("alias:demo").await.unwrap());
    assert!(rx.try_recv().is_err());
    assert_eq!(store.link_fetch_count(), 1);
}

#[tokio::test]
async fn raw_alias_is_sanitized_before_resolution() {
    let store = Arc::new(StubStore::new().with_link("My-Cool-Alias", "https://example.com"));
    let (state, _rx, cache) = common::create_test_state(store);
    let server = test_server(state);

    let response = server.get("/My%20Cool%20Alias!!").await;

    assert_eq!(response.status_code(), 302);
    assert!(cache.has("alias:My-Cool-Alias").await.unwrap());
}

#[tokio::test]
async fn malformed_upstream_payload_reads_as_not_found() {
    let store = Arc::new(StubStore::new().with_malformed("broken"));
    let (state, _rx, cache) = common::create_test_state(store);
    let server = test_server(state);

    let response = server.get("/broken").await;

    response.assert_status_not_found();
    assert!(!cache.has("alias:broken").await.unwrap());
}

#[tokio::test]
async fn unreachable_upstream_fails_closed_with_not_found() {
    let store = Arc::new(StubStore::new().unreachable());
    let (state, mut rx, _cache) = common::create_test_state(store);
    let server = test_server(state);

    let response = server.get("/whatever").await;

    response.assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn cached_destination_survives_until_explicit_delete() {
    let store = Arc::new(StubStore::new().with_link("go", "https://example.com"));
    let (state, _rx, cache) = common::create_test_state(store.clone());
    let server = test_server(state);

    server.get("/go").await;
    assert!(cache.has("alias:go").await.unwrap());

    assert!(cache.delete("alias:go").await.unwrap());
    assert_eq!(cache.get("alias:go").await.unwrap(), None);

    // Next request fetches again and repopulates.
    let response = server.get("/go").await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(store.link_fetch_count(), 2);
    assert!(cache.has("alias:go").await.unwrap());
}
