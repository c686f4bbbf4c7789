//! `SiteSafe` API server library

#![forbid(unsafe_code)]

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use sitesafe_core::Config;
use sitesafe_core::context_error::Result;
use sitesafe_database::SqlitePool;
use std::sync::Arc;

/// Build the API router with all routes and middleware
///
/// # Errors
///
/// Returns an error if the application state validation fails.
pub fn build_router(config: Config, pool: SqlitePool) -> Result<Router> {
    let cors = middleware::cors::cors_layer(&config.api);

    let state = Arc::new(AppState::new(config, pool)?);
    state.validate()?;

    let mut app = routes::build_router().with_state(state);

    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    Ok(app)
}
