use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF rendering error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
