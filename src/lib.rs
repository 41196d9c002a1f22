//! recap library interface
//!
//! Exposes the application state and router for the binary and for
//! integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{Mailer, Summarizer};

/// Request bodies up to 50 MB: a pasted transcript close to the upload
/// cap still has to fit in the generate-summary JSON payload.
const MAX_REQUEST_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Completion-provider capability
    pub summarizer: Summarizer,
    /// Email-provider capability
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(db: SqlitePool, summarizer: Summarizer, mailer: Mailer) -> Self {
        Self {
            db,
            summarizer,
            mailer,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML page + assets)
        .merge(api::ui_routes())
        // API routes
        .merge(api::health_routes())
        .merge(api::transcript_routes())
        .merge(api::summary_routes())
        .merge(api::share_routes())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
