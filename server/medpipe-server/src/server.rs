//! Core server state shared across all handlers

use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use diagnosis_pipeline::{HistoryEntry, PipelineClient, PipelineConfig, PipelineRun, SessionStore};

use crate::session::SessionId;

/// Default request body limit. Recordings arrive base64-encoded, so this has
/// to sit well above the raw audio size.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Remote service endpoints and HTTP timeout
    pub pipeline: PipelineConfig,
    /// Upper bound for incoming request bodies
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("MEDPIPE_SERVER_NAME").unwrap_or_else(|_| "MedPipe".to_string()),
            pipeline: PipelineConfig::from_env(),
            max_upload_bytes: std::env::var("MEDPIPE_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "MedPipe".to_string(),
            pipeline: PipelineConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Main server state, cloned into every handler
#[derive(Clone)]
pub struct MedPipeServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Client for the remote transcription, extraction and diagnosis services
    pub pipeline: Arc<PipelineClient>,
    /// Volatile per-session pipeline history
    pub sessions: Arc<SessionStore>,
}

impl MedPipeServer {
    /// Create a new server instance from the environment
    pub fn new() -> Result<Self> {
        Self::with_config(ServerConfig::from_env())
    }

    /// Create a server instance with explicit configuration. Useful for
    /// testing against mock endpoints.
    pub fn with_config(config: ServerConfig) -> Result<Self> {
        let pipeline = PipelineClient::new(config.pipeline.clone())?;

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
            sessions: Arc::new(SessionStore::new()),
        })
    }

    /// Append a completed pipeline run to the session's history and return
    /// the stored entry.
    pub fn record_run(&self, session: SessionId, run: PipelineRun) -> HistoryEntry {
        let entry = HistoryEntry::from_run(run);
        self.sessions.append(session.0, entry.clone());
        entry
    }
}

impl fmt::Debug for MedPipeServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MedPipeServer")
            .field("config", &self.config)
            .field("sessions", &self.sessions.session_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.name, "MedPipe");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.pipeline.timeout_secs, 300);
    }

    #[test]
    fn test_record_run_appends_to_the_session() {
        let server = MedPipeServer::with_config(ServerConfig::default())
            .expect("server should build from defaults");
        let session = SessionId(Uuid::new_v4());

        let entry = server.record_run(
            session,
            PipelineRun {
                input_text: "patient text".to_string(),
                extracted_data: json!({"sintomas": ["fiebre"]}),
                diagnosis: json!({"diagnostico": "gripe"}),
            },
        );

        let stored = server.sessions.entries(session.0);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().map(|e| e.id), Some(entry.id));
    }
}
