//! Request handlers for the dashboard web server

pub mod api;
pub mod pages;
