//! Typed errors for the students domain.

use thiserror::Error;

use crate::kernel::StoreError;

/// Reasons a submitted record (or part of one) is refused before persistence.
///
/// The `Display` text is the human-readable reason shown to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be UTF-8 text")]
    NotText { field: &'static str },

    #[error("name must not be empty")]
    EmptyName,

    #[error("gender must be one of {allowed} (got '{value}')")]
    InvalidGender { value: String, allowed: String },

    #[error("branch must be one of {allowed} (got '{value}')")]
    InvalidBranch { value: String, allowed: String },

    #[error("year must be an integer (got '{value}')")]
    InvalidYear { value: String },

    #[error("year must be between {min} and {max} (got {year})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("image must not be empty")]
    EmptyImage,

    #[error("image could not be decoded: {0}")]
    UndecodableImage(String),

    #[error("No face detected in the image. Please upload a different image.")]
    NoFaceDetected,

    #[error("face detection failed: {0}")]
    FaceDetectionFailed(String),
}

/// Errors returned by student operations.
#[derive(Debug, Error)]
pub enum StudentError {
    /// The submission failed validation; nothing was written.
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    #[error("Student not found")]
    NotFound { id: i64 },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for student operations.
pub type Result<T> = std::result::Result<T, StudentError>;
