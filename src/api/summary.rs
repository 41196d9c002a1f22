//! Summary generation and meeting CRUD endpoints

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::models::{Meeting, MeetingListEntry};
use crate::services::Summarizer;
use crate::{db, ApiError, ApiResult, AppState};

/// Request payload for summary generation
#[derive(Debug, Deserialize)]
pub struct GenerateSummaryRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Response payload for summary generation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummaryResponse {
    pub summary: String,
    pub meeting_id: i64,
    pub message: String,
}

/// Request payload for summary edits
#[derive(Debug, Deserialize)]
pub struct UpdateSummaryRequest {
    #[serde(default)]
    pub summary: Option<String>,
}

/// Response payload for summary edits
#[derive(Debug, Serialize)]
pub struct UpdateSummaryResponse {
    pub message: String,
}

/// POST /api/generate-summary
///
/// Builds the two-message prompt from the transcript and instructions,
/// invokes the completion provider, and persists a new meeting row with
/// the result. No row is written when validation or the provider call
/// fails.
pub async fn generate_summary(
    State(state): State<AppState>,
    Json(payload): Json<GenerateSummaryRequest>,
) -> ApiResult<Json<GenerateSummaryResponse>> {
    let transcript = payload.transcript.as_deref().unwrap_or("");
    let prompt = payload.prompt.as_deref().unwrap_or("");

    if transcript.trim().is_empty() || prompt.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Transcript and prompt are required".to_string(),
        ));
    }

    let client = match &state.summarizer {
        Summarizer::Configured(client) => client,
        Summarizer::Unconfigured => {
            return Err(ApiError::ServiceUnavailable(
                "AI service not available. Please configure RECAP_GROQ_API_KEY in your environment variables.".to_string(),
            ));
        }
    };

    let summary = client.summarize(transcript, prompt).await.map_err(|e| {
        error!("Completion provider call failed: {}", e);
        ApiError::Internal("Failed to generate summary".to_string())
    })?;

    // Transcript and prompt are stored exactly as received
    let meeting_id = db::meetings::create_meeting(&state.db, transcript, prompt, Some(&summary))
        .await
        .map_err(|e| {
            error!("Failed to save meeting: {}", e);
            ApiError::Internal("Failed to save meeting".to_string())
        })?;

    info!(meeting_id, "Summary generated and meeting saved");

    Ok(Json(GenerateSummaryResponse {
        summary,
        meeting_id,
        message: "Summary generated successfully".to_string(),
    }))
}

/// GET /api/meeting/:id
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Meeting>> {
    let meeting = db::meetings::get_meeting(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    Ok(Json(meeting))
}

/// PUT /api/meeting/:id/summary
pub async fn update_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSummaryRequest>,
) -> ApiResult<Json<UpdateSummaryResponse>> {
    let summary = match payload.summary.as_deref() {
        Some(summary) if !summary.trim().is_empty() => summary,
        _ => return Err(ApiError::BadRequest("Summary is required".to_string())),
    };

    let changed = db::meetings::update_summary(&state.db, id, summary).await?;
    if !changed {
        return Err(ApiError::NotFound("Meeting not found".to_string()));
    }

    info!(meeting_id = id, "Summary updated");

    Ok(Json(UpdateSummaryResponse {
        message: "Summary updated successfully".to_string(),
    }))
}

/// GET /api/meetings
///
/// Listing projection only: id, prompt, created_at. Transcript and
/// summary text stay out of the list payload.
pub async fn list_meetings(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MeetingListEntry>>> {
    let meetings = db::meetings::list_meetings(&state.db).await?;
    Ok(Json(meetings))
}

/// Build summary and meeting routes
pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/api/generate-summary", post(generate_summary))
        .route("/api/meeting/:id", get(get_meeting))
        .route("/api/meeting/:id/summary", put(update_summary))
        .route("/api/meetings", get(list_meetings))
}
