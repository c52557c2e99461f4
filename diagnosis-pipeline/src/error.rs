use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transcription service returned no usable text")]
    EmptyTranscription,

    #[error("Extraction service returned no medical information")]
    EmptyExtraction,

    #[error("Diagnosis service returned no diagnosis")]
    EmptyDiagnosis,
}

pub type PipelineResult<T> = Result<T, PipelineError>;
