//! Reusable UI components

pub mod loading;
pub mod violation_list;
