//! API error handling and response envelopes
//!
//! Every handler returns [`ApiResult`], and every failure is rendered as a
//! structured [`ApiErrorResponse`] with a unique error id that also appears in
//! the server log. Remote pipeline failures are deliberately collapsed into a
//! single generic message so that callers never see upstream internals.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use diagnosis_pipeline::PipelineError;
use report_engine::ReportError;

/// Main API error type for the MedPipe server
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: Vec<FieldError>,
    },

    /// Malformed or unusable request
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Resource not found errors
    #[error("{resource_type} not found")]
    NotFound { resource_type: String },

    /// Any failure inside the remote transcription, extraction or diagnosis
    /// calls. The display string is the only text a caller ever sees.
    #[error("Medical pipeline failed. Please try again.")]
    Pipeline { detail: String },

    /// Internal server errors
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Field-specific validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field that failed validation
    pub field: String,
    /// Validation error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
}

/// Standardized error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Unique error identifier for tracking
    pub error_id: Uuid,
    /// Error type/category
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details, when safe to expose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Field-specific errors (for validation failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
    /// Correlation id supplied by the client, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Suggested actions for the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Pipeline { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for categorization
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Pipeline { .. } => "pipeline_error",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    /// Get suggested actions for resolving this error
    pub fn suggestions(&self) -> Option<Vec<String>> {
        match self {
            ApiError::Validation { .. } => Some(vec![
                "Check the request data for missing or invalid fields".to_string(),
            ]),
            ApiError::NotFound { .. } => Some(vec![
                "Verify the entry id against your session history".to_string(),
            ]),
            ApiError::Pipeline { .. } => Some(vec![
                "Try the request again in a few moments".to_string(),
                "Check that audio links are publicly reachable".to_string(),
            ]),
            _ => None,
        }
    }

    /// Create a validation error with a simple message
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Create a validation error with field-specific errors
    pub fn validation_with_fields(
        message: impl Into<String>,
        field_errors: Vec<FieldError>,
    ) -> Self {
        ApiError::Validation {
            message: message.into(),
            field_errors,
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status_code = self.status_code();

        // The upstream cause never reaches the response body; it is only
        // visible in the server log next to the error id.
        let detail = match &self {
            ApiError::Pipeline { detail } => detail.as_str(),
            _ => "",
        };

        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            status_code = %status_code.as_u16(),
            error = %self,
            detail = detail,
            "API error occurred"
        );

        let field_errors = match &self {
            ApiError::Validation { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors.clone())
            }
            _ => None,
        };

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            details: None,
            field_errors,
            timestamp: Utc::now(),
            request_id: None,
            suggestions: self.suggestions(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        ApiError::Pipeline {
            detail: error.to_string(),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        ApiError::Internal {
            message: format!("Report generation failed: {}", error),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid JSON: {}", error),
        }
    }
}

/// Convenience type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data
    pub data: T,
    /// Optional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

/// Response metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Total count for list endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    /// Request processing time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

/// Create a success response
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: None,
    }
}

/// Create a success response with metadata
pub fn api_success_with_meta<T>(data: T, metadata: ResponseMetadata) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: Some(metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("history entry").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_errors_collapse_to_one_message() {
        let network: ApiError = PipelineError::EmptyTranscription.into();
        let empty: ApiError = PipelineError::EmptyDiagnosis.into();

        assert_eq!(network.to_string(), "Medical pipeline failed. Please try again.");
        assert_eq!(empty.to_string(), network.to_string());
        assert_eq!(network.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(network.error_type(), "pipeline_error");
    }

    #[test]
    fn test_pipeline_error_keeps_detail_out_of_display() {
        let error: ApiError = PipelineError::EmptyExtraction.into();

        match &error {
            ApiError::Pipeline { detail } => {
                assert!(detail.contains("no medical information"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(!error.to_string().contains("medical information"));
    }

    #[test]
    fn test_validation_error_with_fields() {
        let field_errors = vec![FieldError {
            field: "text".to_string(),
            message: "Text is required".to_string(),
            code: "required".to_string(),
        }];
        let error = ApiError::validation_with_fields("Validation failed", field_errors);

        assert_eq!(error.error_type(), "validation_error");
        match error {
            ApiError::Validation { field_errors, .. } => assert_eq!(field_errors.len(), 1),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_api_success_response() {
        let response = api_success("payload");

        assert!(response.success);
        assert_eq!(response.data, "payload");
        assert!(response.metadata.is_none());
    }
}
