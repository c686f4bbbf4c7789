//! Route definitions for the web interface

use crate::{
    handlers::{api, pages},
    state::AppState,
};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Build the complete web application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // The dashboard shell
        .route("/", get(pages::shell))
        // API proxy routes
        .route("/api/logs", get(api::api_logs))
        .route("/api/stats/global", get(api::api_global_stats))
        .route("/api/stats/daily", get(api::api_daily_stats))
        // WebSocket for real-time updates
        .route("/ws", get(api::websocket_handler))
        // Health check
        .route("/health", get(api::health_check))
}
