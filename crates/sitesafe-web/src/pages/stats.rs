//! AI system statistics page

use leptos::prelude::*;

/// Model and detection statistics page component
#[component]
pub fn AISystemStats() -> impl IntoView {
    view! {
        <div class="stats-page">
            <h2>"AI System Stats"</h2>
            <div class="stats-grid">
                <div class="stats-card">
                    <h3>"Detection Volume"</h3>
                    <div class="chart-container">
                        <p>"Events per hour will appear here"</p>
                    </div>
                </div>
                <div class="stats-card">
                    <h3>"Top Violations"</h3>
                    <div class="top-list">
                        <p>"Most frequent violations will appear here"</p>
                    </div>
                </div>
                <div class="stats-card">
                    <h3>"Workers on Site"</h3>
                    <div class="chart-container">
                        <p>"Tracked worker counts will appear here"</p>
                    </div>
                </div>
                <div class="stats-card">
                    <h3>"Model Health"</h3>
                    <div class="chart-container">
                        <p>"Detector confidence trends will appear here"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
