//! Database models for the `SiteSafe` monitor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Violation event as stored in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ViolationEventDb {
    /// Primary key
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

impl ViolationEventDb {
    /// Split the stored violation string back into labels
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.violation_type
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Violations aggregated per day
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DailyViolationCount {
    /// Calendar day in `YYYY-MM-DD` form
    pub day: String,

    /// Number of events recorded that day
    pub count: i64,
}

/// Violations aggregated per violation string
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ViolationTypeCount {
    /// The stored violation string
    pub violation_type: String,

    /// Number of events with that string
    pub count: i64,
}
