//! API route definitions

use crate::{handlers, state::AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build API routes with the basic middleware stack
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Dashboard log feed
        .route("/api/logs", get(handlers::events::list_recent_logs))
        // Event management
        .route(
            "/api/events",
            get(handlers::events::list_events).post(handlers::events::ingest_event),
        )
        .route("/api/events/:id", get(handlers::events::get_event))
        // Statistics
        .route("/api/stats/global", get(handlers::stats::get_global_stats))
        .route("/api/stats/daily", get(handlers::stats::get_daily_stats))
        // Service info
        .route("/api", get(api_info))
        .route("/", get(root_endpoint))
        .layer(CompressionLayer::new())
}

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}

/// Root endpoint for basic connectivity
async fn root_endpoint() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "service": "SiteSafe Monitor API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

/// API info endpoint
async fn api_info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "api": "SiteSafe Monitor API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "logs": "/api/logs",
            "events": "/api/events",
            "global_stats": "/api/stats/global",
            "daily_stats": "/api/stats/daily",
            "health": "/health"
        }
    }))
}
