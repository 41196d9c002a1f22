//! HTTP API handlers for recap

pub mod health;
pub mod share;
pub mod summary;
pub mod transcript;
pub mod ui;

pub use health::health_routes;
pub use share::share_routes;
pub use summary::summary_routes;
pub use transcript::transcript_routes;
pub use ui::ui_routes;
