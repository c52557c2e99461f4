//! Session history handlers

use axum::{extract::State, Json};

use diagnosis_pipeline::HistoryEntry;

use crate::error::{api_success_with_meta, ApiResponse, ApiResult, ResponseMetadata};
use crate::server::MedPipeServer;
use crate::session::SessionId;

/// List the caller's pipeline history in append order
///
/// History is volatile: it belongs to the session cookie and disappears when
/// the server restarts.
#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "history",
    responses(
        (status = 200, description = "All completed runs for this session, oldest first")
    )
)]
pub async fn list_history(
    State(server): State<MedPipeServer>,
    session: SessionId,
) -> ApiResult<Json<ApiResponse<Vec<HistoryEntry>>>> {
    let entries = server.sessions.entries(session.0);
    let metadata = ResponseMetadata {
        total_count: Some(entries.len()),
        processing_time_ms: None,
    };

    Ok(Json(api_success_with_meta(entries, metadata)))
}
