//! End-to-end tests for the HTTP API, driving the router in-process.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use overlap_server::{create_router, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(&ServerConfig::default())
}

async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    post(app, "application/json", body).await
}

async fn post(app: Router, content_type: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/calculate-overlap")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn member(zone: &str, start: &str, end: &str) -> Value {
    json!({"timezone": zone, "start_local": start, "end_local": end})
}

// =========================================================
// Overlap results
// =========================================================

#[tokio::test]
async fn test_new_york_and_london_overlap() {
    let body = json!([
        member("America/New_York", "2024-06-10T09:00", "2024-06-10T12:00"),
        member("Europe/London", "2024-06-10T15:00", "2024-06-10T18:00"),
    ]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "is_overlap": true,
            "overlap_start_utc": "2024-06-10T14:00:00Z",
            "overlap_end_utc": "2024-06-10T16:00:00Z",
        })
    );
}

#[tokio::test]
async fn test_no_overlap_is_a_success() {
    let body = json!([
        member("Etc/UTC", "2024-06-10T09:00", "2024-06-10T10:00"),
        member("Etc/UTC", "2024-06-10T10:00", "2024-06-10T11:00"),
    ]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"is_overlap": false}));
}

#[tokio::test]
async fn test_gap_time_is_resolved() {
    let body = json!([
        member("America/New_York", "2024-03-10T02:30", "2024-03-10T06:00"),
        member("UTC", "2024-03-10T00:00", "2024-03-10T23:00"),
    ]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["overlap_start_utc"], "2024-03-10T07:00:00Z");
    assert_eq!(json["overlap_end_utc"], "2024-03-10T10:00:00Z");
}

// =========================================================
// Validation errors
// =========================================================

#[tokio::test]
async fn test_single_member_is_rejected() {
    let body = json!([member("UTC", "2024-06-10T09:00", "2024-06-10T10:00")]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "insufficient_members");
    assert!(json["detail"].as_str().unwrap().contains("at least 2"));
}

#[tokio::test]
async fn test_unknown_zone_is_rejected() {
    let body = json!([
        member("UTC", "2024-06-10T09:00", "2024-06-10T10:00"),
        member("Mars/Phobos", "2024-06-10T09:00", "2024-06-10T10:00"),
    ]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "unknown_zone");
    assert!(json["detail"].as_str().unwrap().contains("Mars/Phobos"));
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let body = json!([
        member("UTC", "2024-06-10T09:00", "2024-06-10T10:00"),
        {"timezone": "UTC", "start_local": "2024-06-10T09:00"},
    ]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "missing_field");
    assert_eq!(json["detail"], "Missing field: member 2 has no end_local");
}

#[tokio::test]
async fn test_inverted_window_is_rejected() {
    let body = json!([
        member("UTC", "2024-06-10T12:00", "2024-06-10T10:00"),
        member("UTC", "2024-06-10T09:00", "2024-06-10T10:00"),
    ]);
    let (status, json) = post_json(app(), body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "invalid_order");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, json) = post_json(app(), "{\"not\": \"an array\"}".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "malformed_request");
}

#[tokio::test]
async fn test_wrong_content_type_is_unsupported() {
    let body = json!([
        member("UTC", "2024-06-10T09:00", "2024-06-10T10:00"),
        member("UTC", "2024-06-10T09:30", "2024-06-10T11:00"),
    ]);
    let (status, json) = post(app(), "text/plain", body.to_string()).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["kind"], "unsupported_media_type");
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let small = create_router(&ServerConfig {
        max_body_bytes: 64,
        ..ServerConfig::default()
    });
    let body = json!([
        member("America/New_York", "2024-06-10T09:00", "2024-06-10T12:00"),
        member("Europe/London", "2024-06-10T15:00", "2024-06-10T18:00"),
    ]);
    let (status, json) = post_json(small, body.to_string()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["kind"], "payload_too_large");
}

#[tokio::test]
async fn test_body_within_limit_is_accepted() {
    let body = json!([
        member("UTC", "2024-06-10T09:00", "2024-06-10T10:00"),
        member("UTC", "2024-06-10T09:30", "2024-06-10T11:00"),
    ])
    .to_string();
    let exact = create_router(&ServerConfig {
        max_body_bytes: body.len(),
        ..ServerConfig::default()
    });
    let (status, json) = post_json(exact, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_overlap"], true);
}

// =========================================================
// Health
// =========================================================

#[tokio::test]
async fn test_health_reports_tzdb_version() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["tzdb_version"], overlap_engine::TZDB_VERSION);
}
