//! Update student action

use tracing::{debug, info, warn};

use crate::domains::students::errors::{Result, StudentError};
use crate::domains::students::models::Student;
use crate::domains::students::validation::{check_image, StudentSubmission};
use crate::kernel::ServerDeps;

/// Apply a partial update to an existing record.
///
/// Only supplied fields are validated and applied; everything else keeps its
/// stored value. Any invalid supplied field aborts the whole update before
/// anything is written.
pub async fn update_student(
    id: i64,
    submission: StudentSubmission,
    deps: &ServerDeps,
) -> Result<Student> {
    let patch = deps.rules.validate_patch(submission).map_err(|e| {
        warn!("Rejected update for student {}: {}", id, e);
        e
    })?;

    let existing = deps
        .store
        .find_by_id(id)
        .await?
        .ok_or(StudentError::NotFound { id })?;

    // Images are only checked against a record that exists
    if let Some(image) = patch.image.as_set() {
        check_image(image, deps.face_detector()).await.map_err(|e| {
            warn!("Rejected image update for student {}: {}", id, e);
            e
        })?;
    }

    if patch.is_empty() {
        debug!("Empty update for student {}, nothing to write", id);
        return Ok(existing);
    }

    let (_, mut fields) = existing.into_fields();
    patch.apply(&mut fields);

    // The row can vanish between the read and the write; that is a miss too.
    let updated = deps
        .store
        .replace(id, &fields)
        .await?
        .ok_or(StudentError::NotFound { id })?;

    info!("Student updated: {}", updated.id);

    Ok(updated)
}
