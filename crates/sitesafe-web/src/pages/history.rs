//! 30-day historical analysis page

use leptos::prelude::*;

/// Violation history page component
#[component]
pub fn HistoricalAnalysis() -> impl IntoView {
    view! {
        <div class="history-page">
            <h2>"30-Day Analysis"</h2>
            <div class="history-grid">
                <div class="history-card">
                    <h3>"Daily Violations"</h3>
                    <div class="chart-container">
                        <p>"Daily violation counts will appear here"</p>
                    </div>
                </div>
                <div class="history-card">
                    <h3>"Violation Breakdown"</h3>
                    <div class="chart-container">
                        <p>"Breakdown by gear type will appear here"</p>
                    </div>
                </div>
                <div class="history-card">
                    <h3>"Repeat Offenders"</h3>
                    <div class="top-list">
                        <p>"Workers with the most violations will appear here"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
