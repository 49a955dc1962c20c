//! Error types for the domain layer.
//!
//! Store operations never panic and never partially apply: an invariant
//! violation is reported as an `Err(DomainError)` with state untouched, so
//! callers detect rejection from the return value alone.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    QuestionNotFound,
    EvidenceNotFound,
    ActionNotFound,

    // Invariant rejections
    DuplicateId,
    EmptyValueCompletion,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::QuestionNotFound => "QUESTION_NOT_FOUND",
            ErrorCode::EvidenceNotFound => "EVIDENCE_NOT_FOUND",
            ErrorCode::ActionNotFound => "ACTION_NOT_FOUND",
            ErrorCode::DuplicateId => "DUPLICATE_ID",
            ErrorCode::EmptyValueCompletion => "EMPTY_VALUE_COMPLETION",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a question-not-found error.
    pub fn question_not_found(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::QuestionNotFound,
            format!("Question not found: {}", id),
        )
    }

    /// Creates an evidence-not-found error.
    pub fn evidence_not_found(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EvidenceNotFound,
            format!("Evidence not found: {}", id),
        )
    }

    /// Creates an action-not-found error.
    pub fn action_not_found(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ActionNotFound,
            format!("Action not found: {}", id),
        )
    }

    /// Creates a duplicate-id error.
    pub fn duplicate_id(id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DuplicateId, format!("Id already in use: {}", id))
    }

    /// Creates the rejection for completing a question without a value.
    pub fn empty_value_completion(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EmptyValueCompletion,
            format!("Question {} has no value and cannot be marked complete", id),
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
