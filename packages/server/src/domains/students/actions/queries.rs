//! Read-only student queries

use tracing::debug;

use crate::domains::students::data::StudentImage;
use crate::domains::students::errors::{Result, StudentError};
use crate::domains::students::models::Student;
use crate::kernel::ServerDeps;

pub async fn get_student(id: i64, deps: &ServerDeps) -> Result<Student> {
    debug!("Fetching student {}", id);

    deps.store
        .find_by_id(id)
        .await?
        .ok_or(StudentError::NotFound { id })
}

/// All records in insertion order.
pub async fn list_students(deps: &ServerDeps) -> Result<Vec<Student>> {
    let students = deps.store.find_all().await?;
    debug!("Listed {} students", students.len());
    Ok(students)
}

pub async fn get_student_image(id: i64, deps: &ServerDeps) -> Result<StudentImage> {
    get_student(id, deps).await.map(StudentImage::from)
}
