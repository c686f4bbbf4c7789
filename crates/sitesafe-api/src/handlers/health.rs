//! Health check endpoints for monitoring and diagnostics

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Database connectivity status
    pub database: DatabaseHealth,
    /// System uptime in seconds
    pub uptime_seconds: u64,
}

/// Database health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// Database connection status
    pub connected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Readiness check response (simpler than health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service readiness status
    pub ready: bool,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Basic health check endpoint for monitoring systems
///
/// Returns HTTP 200 with health details if the service is healthy, or
/// HTTP 503 if database connectivity fails.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let start_time = std::time::Instant::now();

    let database = match check_database_health(&state).await {
        Ok(health) => health,
        Err(e) => {
            error!("Database health check failed: {}", e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    let response_time = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        database,
        uptime_seconds: get_uptime_seconds(),
    };

    info!("Health check completed in {}ms", response_time);
    Ok(Json(response))
}

/// Readiness check endpoint for Kubernetes-style health checks
///
/// Returns 200 OK if the service is ready to accept traffic
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => Ok(Json(ReadinessResponse {
            ready: true,
            timestamp: chrono::Utc::now(),
        })),
        Err(e) => {
            error!("Readiness check failed - database not accessible: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Check database health and gather timing
async fn check_database_health(state: &Arc<AppState>) -> Result<DatabaseHealth, sqlx::Error> {
    let start_time = std::time::Instant::now();

    sqlx::query("SELECT 1 as health_check")
        .fetch_one(&state.pool)
        .await?;

    let response_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

    Ok(DatabaseHealth {
        connected: true,
        response_time_ms,
    })
}

/// Get process uptime in seconds
fn get_uptime_seconds() -> u64 {
    static START_TIME: std::sync::LazyLock<std::time::Instant> =
        std::sync::LazyLock::new(std::time::Instant::now);
    START_TIME.elapsed().as_secs()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            database: DatabaseHealth {
                connected: true,
                response_time_ms: 15,
            },
            uptime_seconds: 3600,
        };

        let json = serde_json::to_string(&response).expect("Failed to serialize");
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
        assert!(json.contains("database"));

        let deserialized: HealthResponse =
            serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(deserialized.status, "healthy");
        assert_eq!(deserialized.uptime_seconds, 3600);
    }

    #[tokio::test]
    async fn test_readiness_response_serialization() {
        let response = ReadinessResponse {
            ready: true,
            timestamp: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).expect("Failed to serialize");
        assert!(json.contains("ready"));
        assert!(json.contains("true"));
    }

    #[test]
    fn test_get_uptime_seconds() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let uptime2 = get_uptime_seconds();

        assert!(uptime2 >= uptime1);
        assert!(uptime1 < 3600);
    }

    #[tokio::test]
    async fn test_health_check_with_memory_db() {
        use crate::state::AppState;
        use axum::extract::State;
        use sitesafe_core::Config;
        use sitesafe_database::Database;
        use std::sync::Arc;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.storage.base_dir = temp_dir.path().to_path_buf();

        let db = Database::new(&config).await.expect("Failed to connect");
        db.migrate().await.expect("Migration should succeed");

        let state = Arc::new(
            AppState::new(config, db.pool().clone()).expect("Failed to create state"),
        );

        let result = health_check(State(Arc::clone(&state))).await;
        let health = result.expect("Health check should succeed").0;
        assert_eq!(health.status, "healthy");
        assert!(health.database.connected);
        assert!(!health.version.is_empty());

        let readiness = readiness_check(State(state)).await;
        assert!(readiness.expect("Readiness should succeed").0.ready);
    }
}
