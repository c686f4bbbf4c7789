//! Loading indicator component

use leptos::prelude::*;

/// Spinner shown while page data is loading
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading-spinner">
            <div class="spinner"></div>
            <p>"Loading..."</p>
        </div>
    }
}
