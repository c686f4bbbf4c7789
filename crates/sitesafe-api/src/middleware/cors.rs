//! CORS layer built from configuration

use axum::http::HeaderValue;
use sitesafe_core::config::ApiConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Build a CORS layer from the API configuration
///
/// Returns `None` when CORS is disabled. A wildcard origin produces a
/// permissive layer; otherwise only the configured origins are allowed.
#[must_use]
pub fn cors_layer(config: &ApiConfig) -> Option<CorsLayer> {
    if !config.enable_cors {
        return None;
    }

    if config.cors_origins.iter().any(|o| o == "*") {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().map_or_else(
                |_| {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                },
                Some,
            )
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
