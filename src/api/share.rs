//! Summary sharing endpoint
//!
//! Sends the caller-supplied summary to each address in a comma-separated
//! recipient list and records every successful send. Each recipient is an
//! independent unit of work: a delivery failure for one address is
//! captured in that recipient's result instead of aborting the rest of
//! the list, and the response reports the per-recipient outcomes.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::services::Mailer;
use crate::{db, ApiError, ApiResult, AppState};

/// Request payload for sharing a summary
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSummaryRequest {
    #[serde(default)]
    pub meeting_id: Option<i64>,
    #[serde(default)]
    pub recipient_emails: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Outcome of one recipient's send attempt
#[derive(Debug, Serialize)]
pub struct RecipientResult {
    pub recipient: String,
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response payload for sharing a summary
#[derive(Debug, Serialize)]
pub struct ShareSummaryResponse {
    pub message: String,
    pub results: Vec<RecipientResult>,
}

/// POST /api/share-summary
pub async fn share_summary(
    State(state): State<AppState>,
    Json(payload): Json<ShareSummaryRequest>,
) -> ApiResult<Json<ShareSummaryResponse>> {
    let (meeting_id, recipient_emails, summary) = match (
        payload.meeting_id,
        payload.recipient_emails.as_deref(),
        payload.summary.as_deref(),
    ) {
        (Some(id), Some(emails), Some(summary))
            if !emails.trim().is_empty() && !summary.trim().is_empty() =>
        {
            (id, emails, summary)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Meeting ID, recipient emails, and summary are required".to_string(),
            ));
        }
    };

    let meeting = db::meetings::get_meeting(&state.db, meeting_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    let mailer = match &state.mailer {
        Mailer::Configured(mailer) => mailer,
        Mailer::Unconfigured => {
            return Err(ApiError::ServiceUnavailable(
                "Email service not configured. Please set RECAP_EMAIL_USER and RECAP_EMAIL_PASS in your environment variables.".to_string(),
            ));
        }
    };

    let recipients = split_recipients(recipient_emails);

    let mut results = Vec::with_capacity(recipients.len());
    for recipient in &recipients {
        match mailer.send_summary(recipient, &meeting.prompt, summary).await {
            Ok(()) => {
                // The share record is fire-and-forget: a failed insert
                // after a successful send is logged, not surfaced.
                if let Err(e) = db::shares::record_share(&state.db, meeting_id, recipient).await {
                    warn!(recipient = %recipient, "Failed to record share: {}", e);
                }
                results.push(RecipientResult {
                    recipient: recipient.clone(),
                    sent: true,
                    error: None,
                });
            }
            Err(e) => {
                warn!(recipient = %recipient, "Failed to send summary: {}", e);
                results.push(RecipientResult {
                    recipient: recipient.clone(),
                    sent: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let sent = results.iter().filter(|r| r.sent).count();
    info!(meeting_id, sent, total = results.len(), "Share request completed");

    Ok(Json(ShareSummaryResponse {
        message: format!("Summary shared with {} of {} recipients", sent, results.len()),
        results,
    }))
}

/// Split a comma-separated recipient list, trimming whitespace around each
/// address and dropping empty entries. No address-syntax validation here;
/// an unparseable address fails at send time like any other delivery error.
fn split_recipients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Build share routes
pub fn share_routes() -> Router<AppState> {
    Router::new().route("/api/share-summary", post(share_summary))
}
