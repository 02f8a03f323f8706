//! Typed errors for kernel infrastructure (stores and detectors).

use thiserror::Error;

/// Errors raised by a student store.
///
/// These are never retried; they surface to the caller as generic failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row holds a value the domain types cannot represent.
    #[error("corrupt row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

    #[error("unsupported database URL: {0}")]
    UnsupportedUrl(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Errors raised while looking for faces in an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaceDetectionError {
    /// The bytes are not an image the detector can read.
    #[error("undecodable image: {0}")]
    Undecodable(String),

    /// The detector itself failed (model missing, worker panicked, ...).
    #[error("detector error: {0}")]
    Detector(String),
}
