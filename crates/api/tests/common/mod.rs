#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use trackshare_api::config::{ServerConfig, StoreBackend};
use trackshare_api::router::build_app_router;
use trackshare_api::state::AppState;
use trackshare_db::{MemoryTrackStore, TrackStore};

/// Shared secret configured for test apps.
pub const API_KEY: &str = "test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(api_key: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        api_key: api_key.map(str::to_string),
        store_backend: StoreBackend::Memory,
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryTrackStore::new()), Some(API_KEY))
}

/// Build the full application router over the given store and API key.
///
/// Uses the same middleware stack as `main.rs` (request ID, timeout,
/// tracing, panic recovery).
pub fn build_test_app_with(store: Arc<dyn TrackStore>, api_key: Option<&str>) -> Router {
    let config = test_config(api_key);
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a request with an optional JSON body and API key.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    api_key: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// POST JSON with the test API key.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(API_KEY)).await
}

/// DELETE with the test API key.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(API_KEY)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Upload request body.
pub fn upload(identifier: &str, content: &str) -> serde_json::Value {
    serde_json::json!({ "identifier": identifier, "content": content })
}

/// A three-point document with elevations 10, 15, 12 and a one-hour span.
pub const THREE_POINT_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="tests" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Lake Loop</name>
    <trkseg>
      <trkpt lat="47.3769" lon="8.5417"><ele>10</ele><time>2023-01-01T00:00:00Z</time></trkpt>
      <trkpt lat="47.3800" lon="8.5450"><ele>15</ele></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="47.3850" lon="8.5500"><ele>12</ele><time>2023-01-01T01:00:00Z</time></trkpt>
    </trkseg>
  </trk>
</gpx>"#;
