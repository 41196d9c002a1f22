//! HTTP API integration tests
//!
//! Drives the full router with in-memory databases and unconfigured
//! provider capabilities, covering validation, not-found, demo-mode, and
//! projection behavior.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use recap::services::{Mailer, Summarizer};
use recap::{build_router, AppState};

/// Create test app state with in-memory database and no provider credentials
async fn test_app_state() -> AppState {
    let db_pool = SqlitePool::connect(":memory:").await.unwrap();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            transcript TEXT NOT NULL,
            prompt TEXT NOT NULL,
            summary TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(&db_pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shared_summaries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meeting_id INTEGER NOT NULL,
            recipient_email TEXT NOT NULL,
            shared_at TEXT NOT NULL
        )
        "#,
    )
    .execute(&db_pool)
    .await
    .unwrap();

    AppState::new(db_pool, Summarizer::Unconfigured, Mailer::Unconfigured)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Build a multipart request body with a single file field named `transcript`
fn multipart_request(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    multipart_request_with_field("transcript", filename, content_type, data)
}

fn multipart_request_with_field(
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "recap-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload-transcript")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health and UI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok_json() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "OK");
    assert_eq!(json["message"], "Server is running");
}

#[tokio::test]
async fn root_serves_html() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));
}

#[tokio::test]
async fn static_assets_are_served() {
    for (uri, expected_type) in [
        ("/static/app.js", "application/javascript"),
        ("/static/recap-ui.css", "text/css"),
    ] {
        let app = build_router(test_app_state().await);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri} should be served");
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type.to_str().unwrap(), expected_type);
    }
}

// ---------------------------------------------------------------------------
// Transcript upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_txt_file_returns_exact_content() {
    let app = build_router(test_app_state().await);
    let content = "Alice: hello\nBob: hi there\n";

    let response = app
        .oneshot(multipart_request("notes.txt", "text/plain", content.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["transcript"], content);
    assert_eq!(json["filename"], "notes.txt");
    assert_eq!(json["message"], "Transcript uploaded successfully");
}

#[tokio::test]
async fn upload_accepts_txt_name_with_generic_type() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(multipart_request("notes.txt", "application/octet-stream", b"minutes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upload_rejects_non_text_file() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(multipart_request("slides.pdf", "application/pdf", b"%PDF-1.4"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Only text files are allowed");
}

#[tokio::test]
async fn upload_rejects_oversized_file() {
    let app = build_router(test_app_state().await);
    let oversized = vec![b'a'; 10 * 1024 * 1024 + 1];

    let response = app
        .oneshot(multipart_request("big.txt", "text/plain", &oversized))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "File size must be less than 10MB");
}

#[tokio::test]
async fn upload_rejects_missing_file_field() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(multipart_request_with_field("attachment", "notes.txt", "text/plain", b"x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "No file uploaded");
}

// ---------------------------------------------------------------------------
// Summary generation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_rejects_blank_fields_without_creating_rows() {
    let state = test_app_state().await;
    let pool = state.db.clone();

    for body in [
        json!({}),
        json!({ "transcript": "something" }),
        json!({ "transcript": "something", "prompt": "   " }),
        json!({ "transcript": "", "prompt": "bullets" }),
    ] {
        let app = build_router(state.clone());
        let response = app
            .oneshot(json_request("POST", "/api/generate-summary", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Transcript and prompt are required");
    }

    assert_eq!(count_rows(&pool, "meetings").await, 0);
}

#[tokio::test]
async fn generate_unconfigured_returns_demo_503_without_creating_rows() {
    let state = test_app_state().await;
    let pool = state.db.clone();
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate-summary",
            json!({ "transcript": "Alice: hi", "prompt": "bullets" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert_eq!(json["demo"], true);
    assert!(json["error"].as_str().unwrap().contains("AI service not available"));

    assert_eq!(count_rows(&pool, "meetings").await, 0);
}

// ---------------------------------------------------------------------------
// Meeting retrieval and edits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_meeting_returns_404() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(Request::builder().uri("/api/meeting/42").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Meeting not found");
}

#[tokio::test]
async fn get_meeting_is_idempotent_between_writes() {
    let state = test_app_state().await;
    let id = recap::db::meetings::create_meeting(&state.db, "raw transcript", "bullets", Some("- a"))
        .await
        .unwrap();

    let uri = format!("/api/meeting/{id}");
    let first = build_router(state.clone())
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = build_router(state)
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    let first_json = response_json(first).await;
    let second_json = response_json(second).await;

    assert_eq!(first_json, second_json);
    assert_eq!(first_json["transcript"], "raw transcript");
    assert_eq!(first_json["prompt"], "bullets");
    assert_eq!(first_json["summary"], "- a");
}

#[tokio::test]
async fn update_summary_persists_new_text() {
    let state = test_app_state().await;
    let id = recap::db::meetings::create_meeting(&state.db, "t", "p", Some("old"))
        .await
        .unwrap();

    let response = build_router(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/meeting/{id}/summary"),
            json!({ "summary": "revised summary" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "Summary updated successfully");

    let fetched = build_router(state)
        .oneshot(Request::builder().uri(format!("/api/meeting/{id}")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let fetched_json = response_json(fetched).await;
    assert_eq!(fetched_json["summary"], "revised summary");
}

#[tokio::test]
async fn update_summary_unknown_id_returns_404_and_changes_nothing() {
    let state = test_app_state().await;
    let id = recap::db::meetings::create_meeting(&state.db, "t", "p", Some("kept"))
        .await
        .unwrap();

    let response = build_router(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/meeting/{}/summary", id + 100),
            json!({ "summary": "new" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let meeting = recap::db::meetings::get_meeting(&state.db, id).await.unwrap().unwrap();
    assert_eq!(meeting.summary.as_deref(), Some("kept"));
}

#[tokio::test]
async fn update_summary_requires_text() {
    let state = test_app_state().await;
    let id = recap::db::meetings::create_meeting(&state.db, "t", "p", Some("old"))
        .await
        .unwrap();

    let response = build_router(state)
        .oneshot(json_request(
            "PUT",
            &format!("/api/meeting/{id}/summary"),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Summary is required");
}

// ---------------------------------------------------------------------------
// Meeting list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_meetings_newest_first_excludes_transcript() {
    let state = test_app_state().await;
    for i in 1..=3 {
        recap::db::meetings::create_meeting(&state.db, &format!("t{i}"), &format!("p{i}"), None)
            .await
            .unwrap();
    }

    let response = build_router(state)
        .oneshot(Request::builder().uri("/api/meetings").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let entries = json.as_array().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["prompt"], "p3");
    assert_eq!(entries[2]["prompt"], "p1");
    for entry in entries {
        assert!(entry.get("transcript").is_none(), "list must not expose transcripts");
        assert!(entry.get("summary").is_none(), "list must not expose summaries");
        assert!(entry.get("created_at").is_some());
    }
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn share_rejects_missing_fields() {
    let state = test_app_state().await;

    for body in [
        json!({}),
        json!({ "meetingId": 1 }),
        json!({ "meetingId": 1, "recipientEmails": "a@x.com" }),
        json!({ "meetingId": 1, "recipientEmails": "  ", "summary": "s" }),
    ] {
        let app = build_router(state.clone());
        let response = app
            .oneshot(json_request("POST", "/api/share-summary", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Meeting ID, recipient emails, and summary are required");
    }
}

#[tokio::test]
async fn share_unknown_meeting_returns_404() {
    let app = build_router(test_app_state().await);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/share-summary",
            json!({ "meetingId": 99, "recipientEmails": "a@x.com", "summary": "s" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn share_unconfigured_returns_demo_503_without_records() {
    let state = test_app_state().await;
    let pool = state.db.clone();
    let id = recap::db::meetings::create_meeting(&state.db, "t", "p", Some("s"))
        .await
        .unwrap();

    let response = build_router(state)
        .oneshot(json_request(
            "POST",
            "/api/share-summary",
            json!({ "meetingId": id, "recipientEmails": "a@x.com, b@x.com", "summary": "s" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert_eq!(json["demo"], true);
    assert!(json["error"].as_str().unwrap().contains("Email service not configured"));

    assert_eq!(count_rows(&pool, "shared_summaries").await, 0);
}
