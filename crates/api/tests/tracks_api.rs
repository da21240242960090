//! Integration tests for the track endpoints.
//!
//! Runs the full router over the in-memory store so no database is needed.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{body_json, delete, get, post_json, send, upload, API_KEY, THREE_POINT_GPX};
use trackshare_db::{MemoryTrackStore, TrackStore};

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_creates_then_updates() {
    let store = Arc::new(MemoryTrackStore::new());
    let app = common::build_test_app_with(store.clone(), Some(API_KEY));

    let response = post_json(app.clone(), "/api/v1/tracks", upload("t1", THREE_POINT_GPX)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], true);
    assert_eq!(json["data"]["identifier"], "t1");

    let first = store.get("t1").await.unwrap().unwrap();

    let response = post_json(app, "/api/v1/tracks", upload("t1", "<gpx/>")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], false);

    let second = store.get("t1").await.unwrap().unwrap();
    assert_eq!(store.len().await, 1);
    assert_eq!(second.content, "<gpx/>");
    assert_eq!(second.uploaded_at, first.uploaded_at);
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn upload_accepts_gpx_content_alias() {
    let app = common::build_test_app();
    let body = serde_json::json!({ "identifier": "t1", "gpx_content": THREE_POINT_GPX });

    let response = post_json(app, "/api/v1/tracks", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn upload_rejects_empty_identifier() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/tracks", upload("", THREE_POINT_GPX)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "identifier");
}

#[tokio::test]
async fn upload_rejects_overlong_identifier() {
    let app = common::build_test_app();
    let id = "x".repeat(257);
    let response = post_json(app, "/api/v1/tracks", upload(&id, THREE_POINT_GPX)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "identifier");
}

#[tokio::test]
async fn upload_rejects_empty_content_before_touching_store() {
    let store = Arc::new(MemoryTrackStore::new());
    let app = common::build_test_app_with(store.clone(), Some(API_KEY));

    let response = post_json(app, "/api/v1/tracks", upload("t1", "")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "content");
    assert!(store.is_empty().await);
}

// ---------------------------------------------------------------------------
// Shared-secret gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_without_api_key_are_unauthorized() {
    let app = common::build_test_app();

    let response = send(
        app.clone(),
        Method::POST,
        "/api/v1/tracks",
        Some(upload("t1", THREE_POINT_GPX)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = send(app, Method::DELETE, "/api/v1/tracks/t1", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn writes_with_wrong_api_key_are_unauthorized() {
    let app = common::build_test_app();
    let response = send(
        app,
        Method::POST,
        "/api/v1/tracks",
        Some(upload("t1", THREE_POINT_GPX)),
        Some("wrong"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn writes_fail_when_no_api_key_is_configured() {
    let app = common::build_test_app_with(Arc::new(MemoryTrackStore::new()), None);
    let response = post_json(app, "/api/v1/tracks", upload("t1", THREE_POINT_GPX)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn reads_do_not_need_api_key() {
    let app = common::build_test_app();
    post_json(app.clone(), "/api/v1/tracks", upload("t1", THREE_POINT_GPX)).await;

    let response = get(app, "/api/v1/tracks/t1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Fetch and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_content_and_timestamps() {
    let app = common::build_test_app();
    post_json(app.clone(), "/api/v1/tracks", upload("t1", THREE_POINT_GPX)).await;

    let json = body_json(get(app, "/api/v1/tracks/t1").await).await;
    let data = &json["data"];
    assert_eq!(data["identifier"], "t1");
    assert_eq!(data["content"], THREE_POINT_GPX);
    assert!(data["uploaded_at"].is_string());
    assert!(data["updated_at"].is_string());
    assert!(data.get("id").is_none());
}

#[tokio::test]
async fn fetch_unknown_track_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/tracks/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_unknown_track_returns_404() {
    let app = common::build_test_app();
    let response = delete(app, "/api/v1/tracks/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn percent_encoded_identifiers_round_trip() {
    let app = common::build_test_app();
    post_json(app.clone(), "/api/v1/tracks", upload("ride 2023/01", THREE_POINT_GPX)).await;

    let response = get(app, "/api/v1/tracks/ride%202023%2F01").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["identifier"], "ride 2023/01");
}

// ---------------------------------------------------------------------------
// Summary read path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summary_decodes_and_computes_statistics() {
    let app = common::build_test_app();
    post_json(app.clone(), "/api/v1/tracks", upload("abc", THREE_POINT_GPX)).await;

    let response = get(app, "/api/v1/tracks/abc/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["identifier"], "abc");
    assert_eq!(data["name"], "Lake Loop");
    assert_eq!(data["point_count"], 3);

    let stats = &data["statistics"];
    assert!(stats["total_distance_meters"].as_f64().unwrap() > 0.0);
    assert_eq!(stats["elevation_gain_meters"], 5.0);
    assert_eq!(stats["elevation_loss_meters"], 3.0);
    assert_eq!(stats["duration_seconds"], 3600.0);

    assert_eq!(data["display"]["duration"], "1h 0m");
    assert_eq!(data["display"]["elevation_gain"], "5 m");
    assert_eq!(data["start"]["latitude"], 47.3769);
    assert_eq!(data["end"]["latitude"], 47.385);
    assert_eq!(data["bounds"]["max_longitude"], 8.55);
}

#[tokio::test]
async fn summary_of_corrupt_track_is_a_decode_error() {
    let app = common::build_test_app();
    post_json(app.clone(), "/api/v1/tracks", upload("bad", "<gpx><trk>")).await;

    let response = get(app.clone(), "/api/v1/tracks/bad/summary").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "DECODE_ERROR");

    // The stored record itself is untouched and still fetchable.
    let response = get(app, "/api/v1/tracks/bad").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn summary_of_track_without_points_is_a_decode_error() {
    let app = common::build_test_app();
    let doc = "<gpx><trk><name>Empty</name></trk></gpx>";
    post_json(app.clone(), "/api/v1/tracks", upload("empty", doc)).await;

    let response = get(app, "/api/v1/tracks/empty/summary").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn summary_of_unknown_track_is_not_found() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/tracks/nope/summary").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_fetch_summarize_delete() {
    let app = common::build_test_app();

    let response = post_json(app.clone(), "/api/v1/tracks", upload("abc", THREE_POINT_GPX)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), "/api/v1/tracks/abc").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/api/v1/tracks/abc/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app.clone(), "/api/v1/tracks/abc").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, "/api/v1/tracks/abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/tracks/missing").await;

    let request_id = response.headers().get("x-request-id");
    assert!(request_id.is_some(), "Response must contain an x-request-id header");
    assert_eq!(request_id.unwrap().to_str().unwrap().len(), 36);
}
