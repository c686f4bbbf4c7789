//! HTTP client for communicating with the `SiteSafe` API

use reqwest::Client;
use serde::de::DeserializeOwned;
use sitesafe_core::Result;

// Response shapes come from the API crate
pub use sitesafe_api::handlers::events::EventSummary;
pub use sitesafe_api::handlers::stats::{DailyStatsResponse, GlobalStatsResponse};

/// API client for making HTTP requests to the `SiteSafe` API server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Get the most recent violation events
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_recent_events(&self, limit: i64) -> Result<Vec<EventSummary>> {
        let url = format!("{}/api/logs?limit={limit}", self.base_url);
        self.get_json(&url, "recent events").await
    }

    /// Get global violation statistics
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_global_stats(&self) -> Result<GlobalStatsResponse> {
        let url = format!("{}/api/stats/global", self.base_url);
        self.get_json(&url, "global stats").await
    }

    /// Get per-day violation counts over a trailing window
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_daily_stats(&self, days: i64) -> Result<DailyStatsResponse> {
        let url = format!("{}/api/stats/daily?days={days}", self.base_url);
        self.get_json(&url, "daily stats").await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| sitesafe_core::Error::Other(format!("Failed to fetch {what}: {e}")))?;

        if !response.status().is_success() {
            return Err(sitesafe_core::Error::Other(format!(
                "API returned error for {what}: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| sitesafe_core::Error::Other(format!("Failed to parse {what}: {e}")))
    }
}
