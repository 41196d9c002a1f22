//! Data model for meetings and share records

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A persisted meeting: transcript, instructions, and generated summary
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meeting {
    /// Auto-incrementing identifier assigned on creation
    pub id: i64,
    /// Full transcript text as submitted
    pub transcript: String,
    /// The user's summarization instructions
    pub prompt: String,
    /// Null until generation succeeds, mutable thereafter
    pub summary: Option<String>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

/// List projection of a meeting. Transcript and summary are deliberately
/// excluded; the listing only needs the instructions and creation time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MeetingListEntry {
    pub id: i64,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}
