//! Violation event endpoints: recent logs, filtered listings, and ingest

use crate::handlers::{ErrorResponse, error_response, map_core_error};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitesafe_core::types::ViolationEvent;
use sitesafe_core::utils::snapshot_path;
use sitesafe_database::{ViolationEventFilter, ViolationEventQueries, models::ViolationEventDb};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Default number of entries for the dashboard log feed
const DEFAULT_LOG_LIMIT: i64 = 10;

/// Hard cap on page sizes
const MAX_PAGE_SIZE: i64 = 100;

/// Violation event as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    /// Event ID
    pub id: i64,
    /// When the violation was observed
    pub timestamp: DateTime<Utc>,
    /// Worker the violation belongs to
    pub person_name: String,
    /// Comma-separated violation labels
    pub violation_type: String,
    /// Path to the alert snapshot, when one was captured
    pub snapshot_path: Option<String>,
}

impl From<ViolationEventDb> for EventSummary {
    fn from(event: ViolationEventDb) -> Self {
        Self {
            id: event.id,
            timestamp: event.timestamp,
            person_name: event.person_name,
            violation_type: event.violation_type,
            snapshot_path: event.snapshot_path,
        }
    }
}

/// Query parameters for the recent log feed
#[derive(Debug, Clone, Deserialize)]
pub struct RecentLogsQuery {
    /// Maximum number of entries to return
    pub limit: Option<i64>,
}

/// Latest violation events, newest first
///
/// Returns a bare array so the dashboard can render it directly.
pub async fn list_recent_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentLogsQuery>,
) -> Result<Json<Vec<EventSummary>>, (StatusCode, Json<ErrorResponse>)> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LOG_LIMIT)
        .clamp(1, MAX_PAGE_SIZE);

    let events = ViolationEventQueries::find_recent(&state.pool, limit)
        .await
        .map_err(|e| map_core_error(&e))?;

    Ok(Json(events.into_iter().map(EventSummary::from).collect()))
}

/// Query parameters for filtered event listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsQuery {
    /// Exact worker name match
    pub person_name: Option<String>,
    /// Substring match against the violation string
    pub violation_type: Option<String>,
    /// Earliest event time (inclusive)
    pub from_date: Option<DateTime<Utc>>,
    /// Latest event time (inclusive)
    pub to_date: Option<DateTime<Utc>>,
    /// Page number, starting at 1
    pub page: Option<i64>,
    /// Page size
    pub per_page: Option<i64>,
}

/// Pagination metadata for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Current page number
    pub page: i64,
    /// Page size
    pub per_page: i64,
    /// Total matching events
    pub total: i64,
    /// Total number of pages
    pub total_pages: i64,
}

/// Filtered event listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// Events on this page, newest first
    pub events: Vec<EventSummary>,
    /// Pagination metadata
    pub pagination: PaginationInfo,
}

/// Filtered, paginated event listing
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_LOG_LIMIT)
        .clamp(1, MAX_PAGE_SIZE);

    if let (Some(from), Some(to)) = (query.from_date, query.to_date)
        && from > to
    {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "invalid_range",
            "from_date must not be after to_date",
        ));
    }

    let filter = ViolationEventFilter {
        person_name: query.person_name,
        violation_type: query.violation_type,
        from_date: query.from_date,
        to_date: query.to_date,
        limit: per_page,
        offset: (page - 1) * per_page,
    };

    let events = ViolationEventQueries::find_filtered(&state.pool, &filter)
        .await
        .map_err(|e| map_core_error(&e))?;

    let total = ViolationEventQueries::count_filtered(&state.pool, &filter)
        .await
        .map_err(|e| map_core_error(&e))?;

    let total_pages = if total == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    };

    Ok(Json(ListEventsResponse {
        events: events.into_iter().map(EventSummary::from).collect(),
        pagination: PaginationInfo {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Fetch a single event by ID
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<EventSummary>, (StatusCode, Json<ErrorResponse>)> {
    let event = ViolationEventQueries::find_by_id(&state.pool, id)
        .await
        .map_err(|e| map_core_error(&e))?;

    Ok(Json(EventSummary::from(event)))
}

/// Request body for event ingest
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngestEventRequest {
    /// Worker the violation belongs to
    #[validate(length(min = 1, max = 255))]
    pub person_name: String,

    /// Violation labels, e.g. `["Helmet", "Vest"]`
    #[validate(length(min = 1))]
    pub violations: Vec<String>,

    /// When the violation was observed; defaults to now
    pub timestamp: Option<DateTime<Utc>>,

    /// Path to the alert snapshot; derived from the alerts directory and
    /// event time when omitted
    pub snapshot_path: Option<String>,
}

/// Response body for event ingest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestEventResponse {
    /// ID of the stored event, absent when throttled
    pub id: Option<i64>,
    /// Whether the event was suppressed by the per-worker throttle
    pub throttled: bool,
}

/// Ingest a violation event from the detection pipeline
///
/// Repeat events for the same worker inside the throttle window are
/// acknowledged but not persisted.
pub async fn ingest_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestEventRequest>,
) -> Result<(StatusCode, Json<IngestEventResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = request.validate() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            e.to_string(),
        ));
    }

    if !state.throttle.should_log(&request.person_name) {
        info!(
            "Throttled repeat event for {} ({})",
            request.person_name,
            request.violations.join(",")
        );
        return Ok((
            StatusCode::OK,
            Json(IngestEventResponse {
                id: None,
                throttled: true,
            }),
        ));
    }

    let mut event = ViolationEvent::from_labels(&request.person_name, &request.violations);
    if let Some(timestamp) = request.timestamp {
        event.timestamp = timestamp;
    }
    // The pipeline names snapshots after the worker and event time; when the
    // request omits the path, derive the same name it would have used
    let derived = snapshot_path(&state.alerts_dir, &event.person_name, &event.timestamp)
        .to_string_lossy()
        .into_owned();
    event.snapshot_path = request.snapshot_path.or(Some(derived));

    let id = ViolationEventQueries::insert(&state.pool, &event)
        .await
        .map_err(|e| {
            warn!("Failed to persist event for {}: {}", event.person_name, e);
            map_core_error(&e)
        })?;

    info!(
        "Recorded violation for {}: {}",
        event.person_name, event.violation_type
    );

    Ok((
        StatusCode::CREATED,
        Json(IngestEventResponse {
            id: Some(id),
            throttled: false,
        }),
    ))
}
