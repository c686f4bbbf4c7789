//! Page handlers for serving HTML templates

use axum::response::Html;

/// Dashboard shell page
pub async fn shell() -> Html<&'static str> {
    Html(include_str!("../../templates/shell.html"))
}
