//! Database query operations for the `SiteSafe` monitor

use crate::models::{DailyViolationCount, ViolationEventDb, ViolationTypeCount};
use chrono::{DateTime, Utc};
use sitesafe_core::{Error, Result, types::ViolationEvent};
use sqlx::{QueryBuilder, Row, SqlitePool};

/// Filter for violation event listings
#[derive(Debug, Clone, Default)]
pub struct ViolationEventFilter {
    /// Exact worker name match
    pub person_name: Option<String>,

    /// Substring match against the stored violation string
    pub violation_type: Option<String>,

    /// Earliest event time (inclusive)
    pub from_date: Option<DateTime<Utc>>,

    /// Latest event time (inclusive)
    pub to_date: Option<DateTime<Utc>>,

    /// Page size
    pub limit: i64,

    /// Page offset
    pub offset: i64,
}

/// Violation event database operations
pub struct ViolationEventQueries;

impl ViolationEventQueries {
    /// Insert a new violation event
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn insert(pool: &SqlitePool, event: &ViolationEvent) -> Result<i64> {
        let query = r"
            INSERT INTO events (timestamp, person_name, violation_type, snapshot_path)
            VALUES (?, ?, ?, ?)
            RETURNING id
        ";

        let row = sqlx::query(query)
            .bind(event.timestamp)
            .bind(&event.person_name)
            .bind(&event.violation_type)
            .bind(&event.snapshot_path)
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let id: i64 = row.get("id");
        Ok(id)
    }

    /// Find a violation event by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the event is not found.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<ViolationEventDb> {
        let query = "SELECT * FROM events WHERE id = ?";

        sqlx::query_as::<_, ViolationEventDb>(query)
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => Error::NotFound {
                    resource: format!("ViolationEvent with ID {id}"),
                },
                _ => Error::Database(e.to_string()),
            })
    }

    /// Find the most recent violation events, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<ViolationEventDb>> {
        let query = r"
            SELECT * FROM events
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
        ";

        sqlx::query_as::<_, ViolationEventDb>(query)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Find violation events matching a filter, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_filtered(
        pool: &SqlitePool,
        filter: &ViolationEventFilter,
    ) -> Result<Vec<ViolationEventDb>> {
        let mut builder = QueryBuilder::<sqlx::Sqlite>::new("SELECT * FROM events WHERE 1=1");
        push_filter_clauses(&mut builder, filter);

        builder.push(" ORDER BY timestamp DESC, id DESC LIMIT ");
        builder.push_bind(filter.limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset);

        builder
            .build_query_as::<ViolationEventDb>()
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Count violation events matching a filter
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_filtered(pool: &SqlitePool, filter: &ViolationEventFilter) -> Result<i64> {
        let mut builder =
            QueryBuilder::<sqlx::Sqlite>::new("SELECT COUNT(*) as count FROM events WHERE 1=1");
        push_filter_clauses(&mut builder, filter);

        let row = builder
            .build()
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Count all violation events
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_all(pool: &SqlitePool) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM events")
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Count violation events at or after `cutoff`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_since(pool: &SqlitePool, cutoff: DateTime<Utc>) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM events WHERE timestamp >= ?")
            .bind(cutoff)
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Aggregate violation counts per calendar day since `cutoff`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn daily_counts(
        pool: &SqlitePool,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DailyViolationCount>> {
        let query = r"
            SELECT date(timestamp) as day, COUNT(*) as count
            FROM events
            WHERE timestamp >= ?
            GROUP BY date(timestamp)
            ORDER BY day ASC
        ";

        sqlx::query_as::<_, DailyViolationCount>(query)
            .bind(cutoff)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Most frequent violation strings, most common first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn top_violation_types(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<ViolationTypeCount>> {
        let query = r"
            SELECT violation_type, COUNT(*) as count
            FROM events
            GROUP BY violation_type
            ORDER BY count DESC, violation_type ASC
            LIMIT ?
        ";

        sqlx::query_as::<_, ViolationTypeCount>(query)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Delete events older than `cutoff`, returning the number removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete_older_than(pool: &SqlitePool, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM events WHERE timestamp < ?")
            .bind(cutoff)
            .execute(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

fn push_filter_clauses(
    builder: &mut QueryBuilder<'_, sqlx::Sqlite>,
    filter: &ViolationEventFilter,
) {
    if let Some(person_name) = &filter.person_name {
        builder.push(" AND person_name = ");
        builder.push_bind(person_name.clone());
    }

    if let Some(violation_type) = &filter.violation_type {
        builder.push(" AND violation_type LIKE ");
        builder.push_bind(format!("%{violation_type}%"));
    }

    if let Some(from_date) = filter.from_date {
        builder.push(" AND timestamp >= ");
        builder.push_bind(from_date);
    }

    if let Some(to_date) = filter.to_date {
        builder.push(" AND timestamp <= ");
        builder.push_bind(to_date);
    }
}

/// Insert a new violation event
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn insert_violation_event(pool: &SqlitePool, event: &ViolationEvent) -> Result<i64> {
    ViolationEventQueries::insert(pool, event).await
}

/// Get a violation event by ID
///
/// # Errors
///
/// Returns an error if the database query fails or the event is not found.
pub async fn get_violation_event(pool: &SqlitePool, id: i64) -> Result<ViolationEventDb> {
    ViolationEventQueries::find_by_id(pool, id).await
}

/// List the most recent violation events, newest first
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_recent_events(pool: &SqlitePool, limit: i64) -> Result<Vec<ViolationEventDb>> {
    ViolationEventQueries::find_recent(pool, limit).await
}

/// List violation events matching a filter
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_events_filtered(
    pool: &SqlitePool,
    filter: &ViolationEventFilter,
) -> Result<Vec<ViolationEventDb>> {
    ViolationEventQueries::find_filtered(pool, filter).await
}

/// Count violation events matching a filter
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn count_events_filtered(
    pool: &SqlitePool,
    filter: &ViolationEventFilter,
) -> Result<i64> {
    ViolationEventQueries::count_filtered(pool, filter).await
}

/// Count all violation events
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn count_events(pool: &SqlitePool) -> Result<i64> {
    ViolationEventQueries::count_all(pool).await
}

/// Count violation events at or after `cutoff`
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn count_events_since(pool: &SqlitePool, cutoff: DateTime<Utc>) -> Result<i64> {
    ViolationEventQueries::count_since(pool, cutoff).await
}

/// Aggregate violation counts per day since `cutoff`
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_daily_counts(
    pool: &SqlitePool,
    cutoff: DateTime<Utc>,
) -> Result<Vec<DailyViolationCount>> {
    ViolationEventQueries::daily_counts(pool, cutoff).await
}

/// Most frequent violation strings
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_top_violation_types(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ViolationTypeCount>> {
    ViolationEventQueries::top_violation_types(pool, limit).await
}
