//! Sequential client for the remote medical LLM services.
//!
//! Three HTTP/JSON endpoints are consumed as black boxes:
//!
//! | Service | Request body | Response used |
//! |---|---|---|
//! | Transcription | `{"audioUrl"}` or `{"audioBase64"}` | `transcription` string |
//! | Medical extraction | `{"text"}` | entire JSON body |
//! | Diagnosis generation | entire extraction body | entire JSON body |
//!
//! A pipeline run is strictly sequential (transcription, then extraction,
//! then diagnosis) with no retries and no backoff; the first failure aborts
//! the run. Extraction and diagnosis payloads are opaque JSON whose schemas
//! belong to the remote services. Completed runs are recorded in a volatile
//! per-session [`SessionStore`] that lives only as long as the process.
//!
//! # Example
//!
//! ```rust,no_run
//! use diagnosis_pipeline::{PipelineClient, PipelineConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PipelineClient::new(PipelineConfig::from_env())?;
//! let run = client.run("patient reports chest pain and dizziness").await?;
//! println!("{}", run.diagnosis);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod history;

pub use client::*;
pub use config::*;
pub use error::*;
pub use history::*;
