//! Application state management

use sitesafe_core::{Config, EventThrottle, context_error, context_error::Result};
use sitesafe_database::SqlitePool;
use std::path::PathBuf;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Database connection pool
    pub pool: SqlitePool,
    /// Directory alert snapshots are written to
    pub alerts_dir: PathBuf,
    /// Per-worker event throttle
    pub throttle: EventThrottle,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the alerts directory cannot be created.
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self> {
        let alerts_dir = config.storage.base_dir.join(&config.storage.alerts_dir);

        // Ensure alerts directory exists
        std::fs::create_dir_all(&alerts_dir)?;

        let throttle = EventThrottle::from_seconds(config.api.throttle_seconds);

        Ok(Self {
            config,
            pool,
            alerts_dir,
            throttle,
        })
    }

    /// Get the alerts directory
    #[must_use]
    pub const fn get_alerts_dir(&self) -> &PathBuf {
        &self.alerts_dir
    }

    /// Check if the application is properly configured
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<()> {
        if !self.alerts_dir.exists() {
            return Err(context_error!(
                "Alerts directory does not exist: {}",
                self.alerts_dir.display()
            ));
        }

        // Try to create a test file to verify write permissions
        let test_file = self.alerts_dir.join(".write_test");
        std::fs::write(&test_file, "test")?;
        std::fs::remove_file(&test_file)?;

        Ok(())
    }
}
