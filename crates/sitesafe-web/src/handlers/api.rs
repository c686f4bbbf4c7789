//! API proxy handlers for communicating with the backend

use crate::api_client::{DailyStatsResponse, EventSummary, GlobalStatsResponse};
use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::http::StatusCode;
use axum::{
    extract::{Query, State, WebSocketUpgrade},
    response::{Json, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::{error, info};

/// Number of entries in each live feed push
const FEED_SIZE: i64 = 10;

/// Query parameters for the log feed proxy
#[derive(Debug, Clone, Deserialize)]
pub struct LogsQuery {
    /// Maximum number of entries to return
    pub limit: Option<i64>,
}

/// Recent violation events, proxied from the backend API
///
/// An unreachable backend degrades to an empty feed rather than an error
/// page: the dashboard keeps rendering.
pub async fn api_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogsQuery>,
) -> Json<Vec<EventSummary>> {
    let limit = params.limit.unwrap_or(FEED_SIZE);
    match state.api_client.get_recent_events(limit).await {
        Ok(events) => Json(events),
        Err(e) => {
            error!("Failed to fetch events from API: {}", e);
            Json(Vec::new())
        }
    }
}

/// Global statistics, proxied from the backend API
pub async fn api_global_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GlobalStatsResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.api_client.get_global_stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            error!("Failed to fetch global stats from API: {}", e);
            Err(upstream_error("Failed to fetch statistics", &e))
        }
    }
}

/// Query parameters for the daily stats proxy
#[derive(Debug, Clone, Deserialize)]
pub struct DailyQuery {
    /// Window size in days
    pub days: Option<i64>,
}

/// Daily violation counts, proxied from the backend API
pub async fn api_daily_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailyStatsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let days = params.days.unwrap_or(30);
    match state.api_client.get_daily_stats(days).await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            error!("Failed to fetch daily stats from API: {}", e);
            Err(upstream_error("Failed to fetch daily statistics", &e))
        }
    }
}

/// 502 response for a backend API that could not be reached or parsed
fn upstream_error(
    message: &str,
    err: &sitesafe_core::Error,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({
            "error": message,
            "message": err.to_string(),
        })),
    )
}

/// WebSocket handler for real-time updates
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| websocket_connection(socket, state))
}

/// Handle WebSocket connection for real-time updates
async fn websocket_connection(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    info!("WebSocket connection established");

    // Push the latest feed every few seconds, ping to keep the socket alive
    let mut update_interval = interval(Duration::from_secs(5));
    let mut ping_interval = interval(Duration::from_secs(30));

    loop {
        tokio::select! {
            _ = update_interval.tick() => {
                if let Ok(events) = state.api_client.get_recent_events(FEED_SIZE).await {
                    let update = serde_json::json!({
                        "type": "violations_update",
                        "data": events
                    });

                    if sender.send(Message::Text(update.to_string())).await.is_err() {
                        break;
                    }
                }
            }
            _ = ping_interval.tick() => {
                if sender.send(Message::Ping(vec![])).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(Message::Pong(_))) => continue,
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => continue,
                }
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
