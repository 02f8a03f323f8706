//! Delete student action

use tracing::info;

use crate::domains::students::errors::{Result, StudentError};
use crate::domains::students::models::Student;
use crate::kernel::ServerDeps;

/// Hard-delete a record, returning the value it held just before deletion.
pub async fn delete_student(id: i64, deps: &ServerDeps) -> Result<Student> {
    let deleted = deps
        .store
        .delete(id)
        .await?
        .ok_or(StudentError::NotFound { id })?;

    info!("Student deleted: {} ({})", deleted.id, deleted.name);

    Ok(deleted)
}
