//! `SiteSafe` Web Interface
//!
//! Dashboard shell for the construction site safety monitor. A fixed sidebar
//! switches between three pages; the selection is in-memory only.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod app;
pub mod components;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;

// Re-export the main pieces
pub use app::{NAV_ITEMS, NavItem, Page, Shell, ShellState};
pub use server::build_app;
pub use state::AppState;

/// Mount the dashboard shell into the document body (client-side rendering)
#[cfg(feature = "csr")]
pub fn mount_shell() {
    leptos::mount::mount_to_body(Shell);
}
