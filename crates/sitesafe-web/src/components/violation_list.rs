//! Violation list component for the live feed

use chrono::{DateTime, Utc};
use leptos::prelude::*;

/// One entry in the violation feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationEntry {
    /// When the violation was observed
    pub timestamp: DateTime<Utc>,
    /// Worker the violation belongs to
    pub person_name: String,
    /// Comma-separated violation labels
    pub violation_type: String,
}

impl ViolationEntry {
    /// Feed-friendly timestamp, e.g. `14:25:30`
    #[must_use]
    pub fn time_display(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// Human readable violation summary, e.g. `Missing: Helmet, Vest`
    #[must_use]
    pub fn summary(&self) -> String {
        let labels = self
            .violation_type
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Missing: {labels}")
    }
}

/// Violation feed component
#[component]
pub fn ViolationList(
    /// Entries to display, newest first
    entries: Vec<ViolationEntry>,
) -> impl IntoView {
    view! {
        <div class="violation-list">
            <div class="violation-list-header">
                <div class="header-col">"Time"</div>
                <div class="header-col">"Worker"</div>
                <div class="header-col">"Violation"</div>
            </div>
            <div class="violation-list-body">
                {if entries.is_empty() {
                    view! {
                        <p class="empty-feed">"No violations recorded"</p>
                    }.into_any()
                } else {
                    entries.into_iter().map(|entry| {
                        view! {
                            <ViolationRow entry />
                        }
                    }).collect::<Vec<_>>().into_any()
                }}
            </div>
        </div>
    }
}

/// Individual violation row component
#[component]
fn ViolationRow(entry: ViolationEntry) -> impl IntoView {
    view! {
        <div class="violation-row">
            <div class="violation-col">{entry.time_display()}</div>
            <div class="violation-col">{entry.person_name.clone()}</div>
            <div class="violation-col">{entry.summary()}</div>
        </div>
    }
}
