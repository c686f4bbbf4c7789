//! End-to-end tests for the API router against in-memory SQLite

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use sitesafe_core::Config;
use sitesafe_database::Database;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a fresh in-memory database, plus the temp dir keeping the
/// alerts directory alive
async fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    // In-memory SQLite gives every connection its own database
    config.database.max_connections = 1;
    config.database.min_connections = 1;
    config.storage.base_dir = temp_dir.path().to_path_buf();

    let db = Database::new(&config).await.expect("Failed to connect");
    db.migrate().await.expect("Migrations should succeed");

    let app = sitesafe_api::build_router(config, db.pool().clone())
        .expect("Router should build");

    (app, temp_dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Valid request")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Valid request")
}

async fn ingest(app: &Router, person: &str, violations: &[&str]) -> Value {
    let body = json!({
        "person_name": person,
        "violations": violations,
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/events", &body))
        .await
        .expect("Request should succeed");
    body_json(response).await
}

#[tokio::test]
async fn test_root_and_api_info() {
    let (app, _guard) = test_app().await;

    let response = app.clone().oneshot(get("/")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    let response = app.clone().oneshot(get("/api")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["endpoints"]["logs"], "/api/logs");
}

#[tokio::test]
async fn test_health_and_ready() {
    let (app, _guard) = test_app().await;

    let response = app.clone().oneshot(get("/health")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);

    let response = app.clone().oneshot(get("/ready")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let (app, _guard) = test_app().await;

    let response = app.oneshot(get("/api/nope")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn test_logs_empty_by_default() {
    let (app, _guard) = test_app().await;

    let response = app.oneshot(get("/api/logs")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_ingest_and_recent_logs() {
    let (app, _guard) = test_app().await;

    for i in 0..12 {
        let body = ingest(&app, &format!("Worker {i}"), &["Helmet"]).await;
        assert_eq!(body["throttled"], false);
        assert!(body["id"].as_i64().expect("id present") > 0);
    }

    // Default feed size is 10
    let response = app.clone().oneshot(get("/api/logs")).await.expect("ok");
    let body = body_json(response).await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 10);

    // Explicit limit respected
    let response = app.oneshot(get("/api/logs?limit=3")).await.expect("ok");
    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("array body").len(), 3);
}

#[tokio::test]
async fn test_ingest_throttles_repeat_events() {
    let (app, _guard) = test_app().await;

    let first = app
        .clone()
        .oneshot(post_json(
            "/api/events",
            &json!({"person_name": "Worker 1", "violations": ["Helmet"]}),
        ))
        .await
        .expect("ok");
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = body_json(first).await;
    assert_eq!(body["throttled"], false);

    let second = app
        .clone()
        .oneshot(post_json(
            "/api/events",
            &json!({"person_name": "Worker 1", "violations": ["Helmet"]}),
        ))
        .await
        .expect("ok");
    assert_eq!(second.status(), StatusCode::OK);
    let body = body_json(second).await;
    assert_eq!(body["throttled"], true);
    assert!(body["id"].is_null());

    // Another worker is unaffected
    let other = ingest(&app, "Worker 2", &["Vest"]).await;
    assert_eq!(other["throttled"], false);

    // Only the unthrottled events were stored
    let response = app.oneshot(get("/api/logs")).await.expect("ok");
    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("array body").len(), 2);
}

#[tokio::test]
async fn test_ingest_validation_errors() {
    let (app, _guard) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/events",
            &json!({"person_name": "", "violations": ["Helmet"]}),
        ))
        .await
        .expect("ok");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/events",
            &json!({"person_name": "Worker 1", "violations": []}),
        ))
        .await
        .expect("ok");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_event_by_id() {
    let (app, _guard) = test_app().await;

    let created = ingest(&app, "Worker 1", &["Helmet", "Vest"]).await;
    let id = created["id"].as_i64().expect("id present");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/events/{id}")))
        .await
        .expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["person_name"], "Worker 1");
    assert_eq!(body["violation_type"], "Helmet,Vest");

    let response = app.oneshot(get("/api/events/99999")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_ingest_derives_snapshot_path_when_omitted() {
    let (app, _guard) = test_app().await;

    let created = ingest(&app, "Worker 1", &["Helmet"]).await;
    let id = created["id"].as_i64().expect("id present");

    let response = app
        .oneshot(get(&format!("/api/events/{id}")))
        .await
        .expect("ok");
    let body = body_json(response).await;

    // Derived from the alerts directory, the sanitized worker name, and
    // the event time
    let path = body["snapshot_path"].as_str().expect("path stored");
    assert!(path.contains("alerts"));
    assert!(path.contains("Worker_1_"));
    assert!(path.ends_with(".jpg"));
}

#[tokio::test]
async fn test_ingest_keeps_explicit_snapshot_path() {
    let (app, _guard) = test_app().await;

    let request = json!({
        "person_name": "Worker 2",
        "violations": ["Vest"],
        "snapshot_path": "data/alerts/custom.jpg",
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/events", &request))
        .await
        .expect("ok");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().expect("id present");

    let response = app
        .oneshot(get(&format!("/api/events/{id}")))
        .await
        .expect("ok");
    let body = body_json(response).await;
    assert_eq!(body["snapshot_path"], "data/alerts/custom.jpg");
}

#[tokio::test]
async fn test_list_events_filtering_and_pagination() {
    let (app, _guard) = test_app().await;

    ingest(&app, "Worker 1", &["Helmet"]).await;
    ingest(&app, "Worker 2", &["Vest"]).await;
    ingest(&app, "Worker 3", &["Helmet", "Goggles"]).await;

    // Filter by worker
    let response = app
        .clone()
        .oneshot(get("/api/events?person_name=Worker%201"))
        .await
        .expect("ok");
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["events"][0]["person_name"], "Worker 1");

    // Filter by violation substring
    let response = app
        .clone()
        .oneshot(get("/api/events?violation_type=Helmet"))
        .await
        .expect("ok");
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], 2);

    // Pagination metadata
    let response = app
        .clone()
        .oneshot(get("/api/events?per_page=2&page=2"))
        .await
        .expect("ok");
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["per_page"], 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["events"].as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_list_events_rejects_inverted_range() {
    let (app, _guard) = test_app().await;

    let response = app
        .oneshot(get(
            "/api/events?from_date=2025-03-16T00:00:00Z&to_date=2025-03-15T00:00:00Z",
        ))
        .await
        .expect("ok");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_range");
}

#[tokio::test]
async fn test_global_stats() {
    let (app, _guard) = test_app().await;

    ingest(&app, "Worker 1", &["Helmet"]).await;
    ingest(&app, "Worker 2", &["Helmet"]).await;
    ingest(&app, "Worker 3", &["Vest"]).await;

    let response = app.oneshot(get("/api/stats/global")).await.expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["total_events"], 3);
    assert_eq!(body["events_today"], 3);
    assert_eq!(body["events_last_hour"], 3);
    assert_eq!(body["top_violations"][0]["violation_type"], "Helmet");
    assert_eq!(body["top_violations"][0]["count"], 2);
}

#[tokio::test]
async fn test_daily_stats() {
    let (app, _guard) = test_app().await;

    ingest(&app, "Worker 1", &["Helmet"]).await;
    ingest(&app, "Worker 2", &["Vest"]).await;

    let response = app
        .clone()
        .oneshot(get("/api/stats/daily?days=7"))
        .await
        .expect("ok");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["days"], 7);
    let counts = body["daily_counts"].as_array().expect("array");
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0]["count"], 2);

    // Out-of-range windows are clamped rather than rejected
    let response = app.oneshot(get("/api/stats/daily?days=9999")).await.expect("ok");
    let body = body_json(response).await;
    assert_eq!(body["days"], 365);
}
