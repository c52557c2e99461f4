//! Pipeline handlers
//!
//! Each handler runs the full remote chain for one input mode, appends the
//! result to the caller's session history and returns the stored entry. On
//! any remote failure nothing is appended and the caller gets the generic
//! pipeline error.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use diagnosis_pipeline::HistoryEntry;

use crate::error::{api_success, ApiResponse, ApiResult};
use crate::server::MedPipeServer;
use crate::session::SessionId;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_required};

/// Free-text pipeline request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessTextRequest {
    /// Medical text to run through extraction and diagnosis
    #[schema(example = "Patient reports fever and a persistent cough since Monday")]
    pub text: String,
}

impl RequestValidation for ProcessTextRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        validate_required!(self.text, "Please enter some text before submitting");
        Ok(())
    }
}

/// Audio link pipeline request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessAudioUrlRequest {
    /// Publicly reachable link to an audio file
    #[schema(example = "https://storage.example.com/consultation.mp3")]
    pub audio_url: String,
}

impl RequestValidation for ProcessAudioUrlRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        validate_required!(self.audio_url, "Please enter an audio link before submitting");
        Ok(())
    }
}

/// Recorded audio pipeline request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessRecordingRequest {
    /// Base64-encoded audio captured in the browser
    pub audio_base64: String,
}

impl RequestValidation for ProcessRecordingRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        validate_required!(self.audio_base64, "Please record some audio before submitting");
        Ok(())
    }
}

/// Process free text through extraction and diagnosis
#[utoipa::path(
    post,
    path = "/api/v1/pipeline/text",
    tag = "pipeline",
    request_body = ProcessTextRequest,
    responses(
        (status = 200, description = "Pipeline completed; the stored history entry is returned"),
        (status = 400, description = "Empty or invalid input"),
        (status = 502, description = "A remote pipeline service failed")
    )
)]
pub async fn process_text(
    State(server): State<MedPipeServer>,
    session: SessionId,
    Json(request): Json<ProcessTextRequest>,
) -> ApiResult<Json<ApiResponse<HistoryEntry>>> {
    request.validate()?;

    let input_text = request.text.trim();
    info!(mode = "text", chars = input_text.len(), "Pipeline run started");

    let run = server.pipeline.run(input_text).await?;
    let entry = server.record_run(session, run);

    info!(mode = "text", entry_id = %entry.id, "Pipeline run recorded");
    Ok(Json(api_success(entry)))
}

/// Transcribe an audio link, then run extraction and diagnosis
#[utoipa::path(
    post,
    path = "/api/v1/pipeline/audio-url",
    tag = "pipeline",
    request_body = ProcessAudioUrlRequest,
    responses(
        (status = 200, description = "Pipeline completed; the stored history entry is returned"),
        (status = 400, description = "Empty or invalid input"),
        (status = 502, description = "A remote pipeline service failed")
    )
)]
pub async fn process_audio_url(
    State(server): State<MedPipeServer>,
    session: SessionId,
    Json(request): Json<ProcessAudioUrlRequest>,
) -> ApiResult<Json<ApiResponse<HistoryEntry>>> {
    request.validate()?;

    info!(mode = "audio_url", "Pipeline run started");

    let transcription = server.pipeline.transcribe_url(request.audio_url.trim()).await?;
    let run = server.pipeline.run(&transcription).await?;
    let entry = server.record_run(session, run);

    info!(mode = "audio_url", entry_id = %entry.id, "Pipeline run recorded");
    Ok(Json(api_success(entry)))
}

/// Transcribe a browser recording, then run extraction and diagnosis
#[utoipa::path(
    post,
    path = "/api/v1/pipeline/audio",
    tag = "pipeline",
    request_body = ProcessRecordingRequest,
    responses(
        (status = 200, description = "Pipeline completed; the stored history entry is returned"),
        (status = 400, description = "Empty or invalid input"),
        (status = 502, description = "A remote pipeline service failed")
    )
)]
pub async fn process_recording(
    State(server): State<MedPipeServer>,
    session: SessionId,
    Json(request): Json<ProcessRecordingRequest>,
) -> ApiResult<Json<ApiResponse<HistoryEntry>>> {
    request.validate()?;

    info!(
        mode = "recording",
        encoded_bytes = request.audio_base64.len(),
        "Pipeline run started"
    );

    let transcription = server
        .pipeline
        .transcribe_recording(request.audio_base64.trim())
        .await?;
    let run = server.pipeline.run(&transcription).await?;
    let entry = server.record_run(session, run);

    info!(mode = "recording", entry_id = %entry.id, "Pipeline run recorded");
    Ok(Json(api_success(entry)))
}
