//! Aggregate statistics endpoints for the dashboard

use crate::handlers::{ErrorResponse, map_core_error};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sitesafe_database::ViolationEventQueries;
use sitesafe_database::models::{DailyViolationCount, ViolationTypeCount};
use std::sync::Arc;

/// Default window for the daily breakdown
const DEFAULT_DAILY_WINDOW: i64 = 30;

/// Hard cap on the daily breakdown window
const MAX_DAILY_WINDOW: i64 = 365;

/// Number of violation strings reported in the global stats
const TOP_VIOLATIONS_LIMIT: i64 = 5;

/// Global statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStatsResponse {
    /// Total events ever recorded
    pub total_events: i64,
    /// Events recorded since UTC midnight
    pub events_today: i64,
    /// Events recorded in the last hour
    pub events_last_hour: i64,
    /// Most frequent violation strings
    pub top_violations: Vec<ViolationTypeCount>,
    /// When these figures were computed
    pub generated_at: DateTime<Utc>,
}

/// Global violation statistics
pub async fn get_global_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GlobalStatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now();
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |dt| dt.and_utc());

    let total_events = ViolationEventQueries::count_all(&state.pool)
        .await
        .map_err(|e| map_core_error(&e))?;

    let events_today = ViolationEventQueries::count_since(&state.pool, midnight)
        .await
        .map_err(|e| map_core_error(&e))?;

    let events_last_hour = ViolationEventQueries::count_since(&state.pool, now - Duration::hours(1))
        .await
        .map_err(|e| map_core_error(&e))?;

    let top_violations = ViolationEventQueries::top_violation_types(&state.pool, TOP_VIOLATIONS_LIMIT)
        .await
        .map_err(|e| map_core_error(&e))?;

    Ok(Json(GlobalStatsResponse {
        total_events,
        events_today,
        events_last_hour,
        top_violations,
        generated_at: now,
    }))
}

/// Query parameters for the daily breakdown
#[derive(Debug, Clone, Deserialize)]
pub struct DailyStatsQuery {
    /// Number of days to include, counting back from today
    pub days: Option<i64>,
}

/// Daily breakdown response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStatsResponse {
    /// Window size in days
    pub days: i64,
    /// Per-day counts, oldest first; days without events are omitted
    pub daily_counts: Vec<DailyViolationCount>,
}

/// Violations per day over a trailing window
pub async fn get_daily_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DailyStatsQuery>,
) -> Result<Json<DailyStatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let days = query
        .days
        .unwrap_or(DEFAULT_DAILY_WINDOW)
        .clamp(1, MAX_DAILY_WINDOW);

    let cutoff = Utc::now() - Duration::days(days);
    let daily_counts = ViolationEventQueries::daily_counts(&state.pool, cutoff)
        .await
        .map_err(|e| map_core_error(&e))?;

    Ok(Json(DailyStatsResponse { days, daily_counts }))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_global_stats_serialization() {
        let stats = GlobalStatsResponse {
            total_events: 42,
            events_today: 7,
            events_last_hour: 2,
            top_violations: vec![ViolationTypeCount {
                violation_type: "Helmet".to_string(),
                count: 30,
            }],
            generated_at: Utc::now(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_events"], 42);
        assert_eq!(json["events_today"], 7);
        assert_eq!(json["events_last_hour"], 2);
        assert_eq!(json["top_violations"][0]["violation_type"], "Helmet");
    }

    #[test]
    fn test_daily_stats_serialization() {
        let response = DailyStatsResponse {
            days: 30,
            daily_counts: vec![DailyViolationCount {
                day: "2025-03-15".to_string(),
                count: 4,
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["days"], 30);
        assert_eq!(json["daily_counts"][0]["day"], "2025-03-15");
        assert_eq!(json["daily_counts"][0]["count"], 4);
    }

    #[test]
    fn test_daily_window_clamping() {
        // Mirrors the clamping in get_daily_stats
        for (requested, expected) in [(None, 30), (Some(0), 1), (Some(90), 90), (Some(5000), 365)]
        {
            let days = requested.unwrap_or(DEFAULT_DAILY_WINDOW).clamp(1, MAX_DAILY_WINDOW);
            assert_eq!(days, expected);
        }
    }

    #[test]
    fn test_midnight_cutoff_is_today() {
        let now = Utc::now();
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map_or(now, |dt| dt.and_utc());

        assert!(midnight <= now);
        assert_eq!(midnight.date_naive(), now.date_naive());
    }
}
