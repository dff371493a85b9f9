//! Axum route handlers for the Session API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::renderer::{render_response, DisplayBlock};
use crate::errors::AppError;
use crate::session::ConversationEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub role: &'static str,
    pub content: String,
    /// Rendered form of assistant turns; empty for human turns.
    pub blocks: Vec<DisplayBlock>,
}

impl From<ConversationEntry> for HistoryItem {
    fn from(entry: ConversationEntry) -> Self {
        match entry {
            ConversationEntry::Human(content) => HistoryItem {
                role: "human",
                content,
                blocks: Vec::new(),
            },
            ConversationEntry::Assistant(content) => HistoryItem {
                role: "assistant",
                blocks: render_response(&content),
                content,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id/history
///
/// Entries in the order they were recorded.
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let entries = state
        .sessions
        .history(session_id)
        .await?
        .into_iter()
        .map(HistoryItem::from)
        .collect();

    Ok(Json(HistoryResponse { entries }))
}

/// DELETE /api/v1/sessions/:id/history
pub async fn handle_clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.clear(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/report
///
/// The last analysis as a plain-text attachment.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = state
        .sessions
        .last_report(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No analysis to download yet".to_string()))?;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.response,
    ))
}
