//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"detail": "<reason>"}` so the admin
//! UI can show the reason verbatim.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domains::students::StudentError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Student(#[from] StudentError),

    /// Path segment that can never name a stored record.
    #[error("Student not found")]
    UnknownId,

    #[error("Malformed multipart body: {reason}")]
    Multipart { status: StatusCode, reason: String },

    #[error("Upload exceeds the {limit}-byte limit")]
    PayloadTooLarge { limit: usize },
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart {
            status: err.status(),
            reason: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Multipart {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl ApiError {
    /// Name the configured limit when the body stream hit it.
    pub fn with_upload_limit(self, limit: usize) -> Self {
        match self {
            ApiError::Multipart { status, .. } if status == StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::PayloadTooLarge { limit }
            }
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Student(StudentError::Rejected(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Student(StudentError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Student(StudentError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnknownId => StatusCode::NOT_FOUND,
            ApiError::Multipart { status, .. } => *status,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            // Store failures are logged, never echoed
            ApiError::Student(StudentError::Store(e)) => {
                tracing::error!(error = %e, "Student store failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
