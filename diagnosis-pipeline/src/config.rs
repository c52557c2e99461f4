use serde::{Deserialize, Serialize};

/// Deployed endpoints of the remote cloud functions.
const DEFAULT_TRANSCRIBE_URL: &str = "https://transcribeaudio-c5n2v3ikiq-uc.a.run.app";
const DEFAULT_EXTRACT_URL: &str = "https://extractmedicalinfo-c5n2v3ikiq-uc.a.run.app";
const DEFAULT_DIAGNOSIS_URL: &str = "https://generatediagnosis-c5n2v3ikiq-uc.a.run.app";

/// The remote functions abort execution after 300 seconds, so waiting longer
/// than that client-side never pays off.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Endpoints and HTTP timeout for the remote medical services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Transcription service endpoint
    pub transcribe_url: String,
    /// Medical extraction service endpoint
    pub extract_url: String,
    /// Diagnosis generation service endpoint
    pub diagnosis_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl PipelineConfig {
    /// Build the configuration from environment variables, falling back to
    /// the deployed service endpoints.
    pub fn from_env() -> Self {
        let transcribe_url = std::env::var("MEDPIPE_TRANSCRIBE_URL")
            .unwrap_or_else(|_| DEFAULT_TRANSCRIBE_URL.to_string());

        let extract_url = std::env::var("MEDPIPE_EXTRACT_URL")
            .unwrap_or_else(|_| DEFAULT_EXTRACT_URL.to_string());

        let diagnosis_url = std::env::var("MEDPIPE_DIAGNOSIS_URL")
            .unwrap_or_else(|_| DEFAULT_DIAGNOSIS_URL.to_string());

        let timeout_secs = std::env::var("MEDPIPE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            transcribe_url,
            extract_url,
            diagnosis_url,
            timeout_secs,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            transcribe_url: DEFAULT_TRANSCRIBE_URL.to_string(),
            extract_url: DEFAULT_EXTRACT_URL.to_string(),
            diagnosis_url: DEFAULT_DIAGNOSIS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
