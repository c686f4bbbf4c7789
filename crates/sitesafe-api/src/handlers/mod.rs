//! Request handlers for the `SiteSafe` API

pub mod events;
pub mod health;
pub mod stats;

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Error response body shared by all handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error label
    pub error: String,
    /// Human readable detail
    pub message: String,
}

/// Build an error response with the given status
#[must_use]
pub fn error_response(
    status: StatusCode,
    error: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        }),
    )
}

/// Map a core error onto an HTTP response
#[must_use]
pub fn map_core_error(err: &sitesafe_core::Error) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        sitesafe_core::Error::NotFound { resource } => {
            error_response(StatusCode::NOT_FOUND, "not_found", resource.clone())
        }
        sitesafe_core::Error::Validation { field, message } => error_response(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            format!("{field}: {message}"),
        ),
        other => {
            tracing::error!("Request failed: {}", other);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Request could not be processed",
            )
        }
    }
}
