//! Transcript upload endpoint
//!
//! Accepts one multipart file, validates its declared type and size, and
//! returns the decoded text. The file itself is never persisted.

use axum::extract::Multipart;
use axum::{routing::post, Json, Router};
use serde::Serialize;
use tracing::info;

use crate::{ApiError, ApiResult, AppState};

/// Upload size cap, enforced on both client and server
pub const MAX_TRANSCRIPT_BYTES: usize = 10 * 1024 * 1024;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadTranscriptResponse {
    pub transcript: String,
    pub filename: String,
    pub message: String,
}

/// POST /api/upload-transcript
///
/// Multipart form with a file field named `transcript`. The file must
/// declare a `text/*` content type or carry a `.txt` filename, and must
/// not exceed 10 MiB.
pub async fn upload_transcript(
    mut multipart: Multipart,
) -> ApiResult<Json<UploadTranscriptResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some("transcript") {
            continue;
        }

        let filename = field.file_name().unwrap_or("transcript.txt").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();

        // Type check happens before the body is read
        if !content_type.starts_with("text/") && !filename.ends_with(".txt") {
            return Err(ApiError::BadRequest("Only text files are allowed".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid upload: {}", e)))?;

        if data.len() > MAX_TRANSCRIPT_BYTES {
            return Err(ApiError::BadRequest(
                "File size must be less than 10MB".to_string(),
            ));
        }

        let transcript = String::from_utf8_lossy(&data).into_owned();

        info!(filename = %filename, bytes = data.len(), "Transcript extracted from upload");

        return Ok(Json(UploadTranscriptResponse {
            transcript,
            filename,
            message: "Transcript uploaded successfully".to_string(),
        }));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

/// Build transcript upload routes
pub fn transcript_routes() -> Router<AppState> {
    Router::new().route("/api/upload-transcript", post(upload_transcript))
}
