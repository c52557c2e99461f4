//! Health check and version handlers

use std::collections::HashMap;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{api_success, ApiResponse, ApiResult};
use crate::server::MedPipeServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status
    #[schema(example = "healthy")]
    pub status: String,
    /// Timestamp of the check
    pub timestamp: DateTime<Utc>,
    /// Server version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Status of individual components
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    /// Server name
    #[schema(example = "MedPipe")]
    pub name: String,
    /// Server version
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Health check endpoint
///
/// Reports whether the server is up and which remote endpoints it is
/// configured against. No remote call is made; a health probe should never
/// spend an LLM invocation.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<MedPipeServer>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let mut checks = HashMap::new();
    checks.insert(
        "transcription_endpoint".to_string(),
        endpoint_status(&server.config.pipeline.transcribe_url),
    );
    checks.insert(
        "extraction_endpoint".to_string(),
        endpoint_status(&server.config.pipeline.extract_url),
    );
    checks.insert(
        "diagnosis_endpoint".to_string(),
        endpoint_status(&server.config.pipeline.diagnosis_url),
    );
    checks.insert(
        "session_store".to_string(),
        format!("{} active sessions", server.sessions.session_count()),
    );

    let health = HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    Ok(Json(api_success(health)))
}

/// Version information endpoint
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Server name and version", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<MedPipeServer>,
) -> ApiResult<Json<ApiResponse<VersionResponse>>> {
    let version = VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(Json(api_success(version)))
}

fn endpoint_status(url: &str) -> String {
    if url.trim().is_empty() {
        "not configured".to_string()
    } else {
        "configured".to_string()
    }
}
