//! Request validation utilities
//!
//! Validation runs before any remote service is contacted, so an empty
//! request never costs a pipeline call.

use crate::error::ApiError;

/// Trait for validating incoming request payloads
pub trait RequestValidation {
    /// Validate the request, returning a validation error if invalid
    fn validate(&self) -> Result<(), ApiError>;
}

/// Validate that a condition holds for a field
#[macro_export]
macro_rules! validate_field {
    ($condition:expr, $message:expr) => {
        if !$condition {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Validate that a required string field is present and non-blank
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        validate_field!(!$field.trim().is_empty(), $message)
    };
}
