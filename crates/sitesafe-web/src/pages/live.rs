//! Live command center page

use crate::components::loading::LoadingSpinner;
use crate::components::violation_list::{ViolationEntry, ViolationList};
use leptos::prelude::*;

/// Live monitoring page component
#[component]
pub fn LiveCommandCenter() -> impl IntoView {
    // Populated over the websocket feed once connected
    let entries: Vec<ViolationEntry> = Vec::new();

    view! {
        <div class="live-page">
            <h2>"Live Command Center"</h2>
            <div class="live-grid">
                <div class="live-card live-feed">
                    <h3>"Camera Feed"</h3>
                    <div class="feed-container">
                        <LoadingSpinner />
                    </div>
                </div>
                <div class="live-card">
                    <h3>"Recent Violations"</h3>
                    <ViolationList entries />
                </div>
            </div>
        </div>
    }
}
