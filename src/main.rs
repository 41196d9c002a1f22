//! recap - Meeting Recap Service
//!
//! Accepts a meeting transcript plus free-form instructions, generates an
//! AI summary, persists it, and emails it to recipients on request.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use recap::config::Config;
use recap::services::{Mailer, Summarizer};
use recap::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting recap (Meeting Recap) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!("Database: {}", config.db_path.display());

    // Initialize database connection pool
    let db_pool = recap::db::init_database_pool(&config.db_path).await?;
    info!("Database connection established");

    // Resolve provider capabilities once; missing credentials degrade to
    // demo responses instead of failing startup
    let summarizer = Summarizer::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize summarizer: {}", e))?;
    let mailer = Mailer::from_config(config.email.as_ref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize mailer: {}", e))?;

    // Create application state
    let state = AppState::new(db_pool.clone(), summarizer, mailer);

    // Build router
    let app = recap::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Listening on http://0.0.0.0:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/api/health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Close the store handle before exiting
    db_pool.close().await;
    info!("Database connection closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
