//! Embedded browser front end
//!
//! The whole UI is one static page compiled into the binary; it talks to the
//! JSON API with same-origin fetches, so the session cookie rides along
//! automatically.

use axum::response::Html;

/// Serve the single-page UI
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
