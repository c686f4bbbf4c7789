//! Middleware for the `SiteSafe` API

pub mod cors;
