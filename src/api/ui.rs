//! Web UI routes
//!
//! Serves the single-page client and its assets, embedded at compile time.

use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{http::StatusCode, Router};

use crate::AppState;

const APP_HTML: &str = include_str!("../../static/app.html");
const APP_JS: &str = include_str!("../../static/app.js");
const UI_CSS: &str = include_str!("../../static/recap-ui.css");

/// GET /
///
/// Single-page meeting summarizer UI
pub async fn root_page() -> impl IntoResponse {
    Html(APP_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        APP_JS,
    )
        .into_response()
}

/// GET /static/recap-ui.css
pub async fn serve_ui_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        UI_CSS,
    )
        .into_response()
}

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/static/app.js", get(serve_app_js))
        .route("/static/recap-ui.css", get(serve_ui_css))
}
