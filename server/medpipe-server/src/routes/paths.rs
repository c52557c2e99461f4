//! Centralized API route path constants
//!
//! Paths under [`API_V1`] are written relative to the version prefix; the
//! `#[utoipa::path]` annotations on the handlers repeat the full path as a
//! string literal, so keep the two in sync when a route moves.

/// Version prefix for the JSON API
pub const API_V1: &str = "/api/v1";

/// OpenAPI document, relative to `/api/v1`
pub const OPENAPI_JSON: &str = "/openapi.json";

/// Browser UI paths
pub mod ui {
    /// Embedded single-page front end
    pub const INDEX: &str = "/";
}

/// Health and version paths, served unversioned
pub mod health {
    /// Liveness check
    pub const HEALTH: &str = "/health";
    /// Build name and version
    pub const VERSION: &str = "/version";
}

/// Pipeline paths, relative to `/api/v1`
pub mod pipeline {
    /// Free-text input
    pub const TEXT: &str = "/pipeline/text";
    /// Audio link input
    pub const AUDIO_URL: &str = "/pipeline/audio-url";
    /// Base64-encoded recording input
    pub const AUDIO: &str = "/pipeline/audio";
}

/// History paths, relative to `/api/v1`
pub mod history {
    /// Session history listing
    pub const HISTORY: &str = "/history";
    /// Diagnosis JSON download for one entry
    pub const DIAGNOSIS_JSON: &str = "/history/:id/diagnosis.json";
    /// PDF report download for one entry
    pub const REPORT_PDF: &str = "/history/:id/report.pdf";
}
