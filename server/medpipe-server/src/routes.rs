//! API route definitions and router setup

pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, history, pipeline, reports, ui},
    openapi,
    server::MedPipeServer,
};

/// Create health check routes
pub fn health_routes() -> Router<MedPipeServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

/// Create pipeline routes
pub fn pipeline_routes() -> Router<MedPipeServer> {
    Router::new()
        .route(paths::pipeline::TEXT, post(pipeline::process_text))
        .route(paths::pipeline::AUDIO_URL, post(pipeline::process_audio_url))
        .route(paths::pipeline::AUDIO, post(pipeline::process_recording))
}

/// Create history and download routes
pub fn history_routes() -> Router<MedPipeServer> {
    Router::new()
        .route(paths::history::HISTORY, get(history::list_history))
        .route(
            paths::history::DIAGNOSIS_JSON,
            get(reports::download_diagnosis),
        )
        .route(paths::history::REPORT_PDF, get(reports::download_report))
}

/// Create versioned API routes
pub fn api_v1_routes() -> Router<MedPipeServer> {
    Router::new()
        .merge(pipeline_routes())
        .merge(history_routes())
        .route(paths::OPENAPI_JSON, get(openapi::openapi_json))
}

/// Create all application routes
pub fn create_routes() -> Router<MedPipeServer> {
    Router::new()
        .route(paths::ui::INDEX, get(ui::index))
        .merge(health_routes())
        .nest(paths::API_V1, api_v1_routes())
}
