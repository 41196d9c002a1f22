//! Share record operations
//!
//! One row per successful send. Rows are immutable and never deleted;
//! callers do not consume the generated identifier.

use chrono::Utc;
use sqlx::SqlitePool;

/// Record that a summary was sent to one recipient address
pub async fn record_share(
    pool: &SqlitePool,
    meeting_id: i64,
    recipient_email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO shared_summaries (meeting_id, recipient_email, shared_at) VALUES (?, ?, ?)",
    )
    .bind(meeting_id)
    .bind(recipient_email)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}
