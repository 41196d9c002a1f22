//! Meeting table operations

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Meeting, MeetingListEntry};

/// Insert a new meeting row, returning its identifier
pub async fn create_meeting(
    pool: &SqlitePool,
    transcript: &str,
    prompt: &str,
    summary: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO meetings (transcript, prompt, summary, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(transcript)
    .bind(prompt)
    .bind(summary)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load a meeting by identifier
pub async fn get_meeting(pool: &SqlitePool, id: i64) -> Result<Option<Meeting>, sqlx::Error> {
    sqlx::query_as::<_, Meeting>(
        "SELECT id, transcript, prompt, summary, created_at FROM meetings WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List all meetings, newest first. The id tiebreak keeps the ordering
/// stable for rows created within the same instant.
pub async fn list_meetings(pool: &SqlitePool) -> Result<Vec<MeetingListEntry>, sqlx::Error> {
    sqlx::query_as::<_, MeetingListEntry>(
        "SELECT id, prompt, created_at FROM meetings ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

/// Replace a meeting's summary. Returns false when no row matched the
/// identifier (nothing was changed).
pub async fn update_summary(
    pool: &SqlitePool,
    id: i64,
    summary: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE meetings SET summary = ? WHERE id = ?")
        .bind(summary)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
