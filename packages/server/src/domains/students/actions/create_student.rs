//! Create student action

use tracing::{info, warn};

use crate::domains::students::errors::Result;
use crate::domains::students::models::Student;
use crate::domains::students::validation::{check_image, StudentSubmission};
use crate::kernel::ServerDeps;

/// Validate a complete submission and persist it as a new record.
///
/// Returns the stored record with its freshly assigned id.
pub async fn create_student(submission: StudentSubmission, deps: &ServerDeps) -> Result<Student> {
    let fields = deps.rules.validate_create(submission).map_err(|e| {
        warn!("Rejected new student: {}", e);
        e
    })?;

    check_image(&fields.image, deps.face_detector()).await.map_err(|e| {
        warn!("Rejected image for new student '{}': {}", fields.name, e);
        e
    })?;

    let student = deps.store.insert(&fields).await?;

    info!(
        "Student created: {} ({}, {}, {})",
        student.id, student.name, student.branch, student.year
    );

    Ok(student)
}
