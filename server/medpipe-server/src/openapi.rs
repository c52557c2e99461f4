//! OpenAPI documentation for the MedPipe API

use axum::Json;
use utoipa::OpenApi;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedPipe API",
        description = "Browser front end and REST API for a three-stage medical pipeline: \
                       audio transcription, medical information extraction and diagnosis \
                       generation, each backed by a remote LLM service.",
        contact(name = "MedPipe Team", email = "team@medpipe.dev")
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,
        crate::handlers::pipeline::process_text,
        crate::handlers::pipeline::process_audio_url,
        crate::handlers::pipeline::process_recording,
        crate::handlers::history::list_history,
        crate::handlers::reports::download_diagnosis,
        crate::handlers::reports::download_report,
    ),
    components(schemas(
        crate::handlers::health::HealthResponse,
        crate::handlers::health::VersionResponse,
        crate::handlers::pipeline::ProcessTextRequest,
        crate::handlers::pipeline::ProcessAudioUrlRequest,
        crate::handlers::pipeline::ProcessRecordingRequest,
    )),
    tags(
        (name = "health", description = "Health and version endpoints"),
        (name = "pipeline", description = "Run the transcription, extraction and diagnosis chain"),
        (name = "history", description = "Session history and report downloads")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
