//! Utility functions for the `SiteSafe` monitor

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Per-worker event throttle
///
/// Suppresses repeat events for the same worker within a fixed window, so a
/// worker standing in front of the camera without a helmet produces one
/// persisted event every few seconds instead of one per frame.
#[derive(Debug, Clone)]
pub struct EventThrottle {
    window: Duration,
    last_seen: Arc<Mutex<HashMap<String, Instant>>>,
}

impl EventThrottle {
    /// Create a throttle with the given window
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a throttle from a window expressed in seconds
    #[must_use]
    pub fn from_seconds(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    /// Check whether an event for `key` should be logged now
    ///
    /// Returns `true` and records the key when the window has elapsed (or the
    /// key was never seen), `false` when the key is still throttled.
    #[must_use]
    pub fn should_log(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Check whether an event for `key` should be logged at `now`
    ///
    /// Split out from [`Self::should_log`] so callers can drive the clock.
    #[must_use]
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let Ok(mut last_seen) = self.last_seen.lock() else {
            // A poisoned lock means a panic elsewhere; logging one extra
            // event is the safer failure mode.
            return true;
        };

        match last_seen.get(key) {
            Some(&last) if now.duration_since(last) < self.window => false,
            _ => {
                last_seen.insert(key.to_string(), now);
                true
            }
        }
    }

    /// Number of workers currently tracked
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.last_seen.lock().map_or(0, |m| m.len())
    }
}

/// Sanitize a worker name for use in snapshot filenames
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            match c {
                // Keep alphanumeric, dots, underscores, and hyphens
                c if c.is_alphanumeric() || c == '.' || c == '_' || c == '-' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

/// Build a snapshot path for a violation event
///
/// Snapshots are named after the worker and the event time so a run of
/// events for the same worker never collides.
#[must_use]
pub fn snapshot_path(
    alerts_dir: &Path,
    person_name: &str,
    timestamp: &chrono::DateTime<chrono::Utc>,
) -> std::path::PathBuf {
    alerts_dir.join(format!(
        "{}_{}.jpg",
        sanitize_name(person_name),
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}
