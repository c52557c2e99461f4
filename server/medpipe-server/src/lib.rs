//! MedPipe HTTP Server
//!
//! Serves the embedded browser front end and the JSON API around the
//! three-stage medical pipeline (transcription, extraction, diagnosis).
//! State is held in memory only: each browser session gets a cookie-scoped
//! history of completed runs, and every artifact (diagnosis JSON, PDF
//! report) is rebuilt from that history on download.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod session;
pub mod validation;

pub use error::{api_success, ApiError, ApiResponse, ApiResult};
pub use server::{MedPipeServer, ServerConfig};

use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: MedPipeServer) -> Router {
    let max_upload_bytes = server.config.max_upload_bytes;

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(from_fn(session::session_middleware))
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(server)
}
