//! Download handlers for diagnosis JSON and PDF reports
//!
//! Both endpoints rebuild the artifact from the stored history entry on every
//! request; nothing is cached or written to disk.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use diagnosis_pipeline::HistoryEntry;
use report_engine::{DIAGNOSIS_JSON_FILENAME, REPORT_PDF_FILENAME};

use crate::error::{ApiError, ApiResult};
use crate::server::MedPipeServer;
use crate::session::SessionId;

/// Download the diagnosis of one history entry as pretty-printed JSON
#[utoipa::path(
    get,
    path = "/api/v1/history/{id}/diagnosis.json",
    tag = "history",
    params(
        ("id" = Uuid, Path, description = "History entry id")
    ),
    responses(
        (status = 200, description = "Diagnosis JSON as a file attachment"),
        (status = 404, description = "No such entry in this session")
    )
)]
pub async fn download_diagnosis(
    State(server): State<MedPipeServer>,
    session: SessionId,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let entry = lookup_entry(&server, session, id)?;
    let bytes = report_engine::diagnosis_json(&entry.diagnosis)?;

    Ok(attachment(bytes, "application/json", DIAGNOSIS_JSON_FILENAME))
}

/// Download the full report of one history entry as a paginated PDF
#[utoipa::path(
    get,
    path = "/api/v1/history/{id}/report.pdf",
    tag = "history",
    params(
        ("id" = Uuid, Path, description = "History entry id")
    ),
    responses(
        (status = 200, description = "PDF report as a file attachment"),
        (status = 404, description = "No such entry in this session")
    )
)]
pub async fn download_report(
    State(server): State<MedPipeServer>,
    session: SessionId,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let entry = lookup_entry(&server, session, id)?;
    let bytes =
        report_engine::render_report(&entry.input_text, &entry.extracted_data, &entry.diagnosis)?;

    Ok(attachment(bytes, "application/pdf", REPORT_PDF_FILENAME))
}

fn lookup_entry(server: &MedPipeServer, session: SessionId, id: Uuid) -> ApiResult<HistoryEntry> {
    server
        .sessions
        .entry(session.0, id)
        .ok_or_else(|| ApiError::not_found("History entry"))
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
