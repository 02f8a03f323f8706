//! Student record routes.
//!
//! Create and update take `multipart/form-data` with the parts `name`,
//! `gender`, `branch`, `year` and `image`. Reads answer with record JSON;
//! image bytes are only ever served from the dedicated image route.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Extension, Multipart, Path};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domains::students::actions;
use crate::domains::students::{
    StudentData, StudentError, StudentFormOptions, StudentSubmission, ValidationError,
};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};

/// POST /students/
pub async fn create_student_handler(
    Extension(state): Extension<AxumAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<StudentData>> {
    let submission = read_submission(multipart?, state.max_upload_bytes).await?;
    let student = actions::create_student(submission, &state.deps).await?;
    Ok(Json(student.into()))
}

/// GET /studentlist/
pub async fn list_students_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<StudentData>>> {
    let students = actions::list_students(&state.deps).await?;
    Ok(Json(students.into_iter().map(StudentData::from).collect()))
}

/// GET /studentoptions/
pub async fn student_options_handler(
    Extension(state): Extension<AxumAppState>,
) -> Json<StudentFormOptions> {
    Json(StudentFormOptions::from(&state.deps.rules))
}

/// GET /students/:id
pub async fn get_student_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentData>> {
    let id = parse_id(&id)?;
    let student = actions::get_student(id, &state.deps).await?;
    Ok(Json(student.into()))
}

/// GET /students/:id/image
pub async fn get_student_image_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    let image = actions::get_student_image(id, &state.deps).await?;
    Ok(([(header::CONTENT_TYPE, image.media_type)], image.bytes).into_response())
}

/// PUT /students/:id
pub async fn update_student_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<StudentData>> {
    let id = parse_id(&id)?;
    let submission = read_submission(multipart?, state.max_upload_bytes).await?;
    let student = actions::update_student(id, submission, &state.deps).await?;
    Ok(Json(student.into()))
}

/// DELETE /studentdelete/:id
pub async fn delete_student_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentData>> {
    let id = parse_id(&id)?;
    let student = actions::delete_student(id, &state.deps).await?;
    Ok(Json(student.into()))
}

/// Ids are store-assigned integers; anything else names no record.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| ApiError::UnknownId)
}

async fn read_submission(multipart: Multipart, limit: usize) -> ApiResult<StudentSubmission> {
    read_parts(multipart)
        .await
        .map_err(|e| e.with_upload_limit(limit))
}

/// Collect the known parts of a student form. Unknown parts are skipped.
async fn read_parts(mut multipart: Multipart) -> ApiResult<StudentSubmission> {
    let mut submission = StudentSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(part) = field.name().map(str::to_owned) else {
            continue;
        };

        match part.as_str() {
            "image" => {
                // Browsers send an empty, unnamed file part when no file was picked
                let picked = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field.bytes().await?;
                if bytes.is_empty() && !picked {
                    continue;
                }
                submission.image = Some(bytes.to_vec());
            }
            "name" => submission.name = Some(text_part(field, "name").await?),
            "gender" => submission.gender = Some(text_part(field, "gender").await?),
            "branch" => submission.branch = Some(text_part(field, "branch").await?),
            "year" => submission.year = Some(text_part(field, "year").await?),
            other => tracing::debug!(part = other, "Ignoring unknown form part"),
        }
    }

    Ok(submission)
}

async fn text_part(
    field: axum::extract::multipart::Field<'_>,
    name: &'static str,
) -> ApiResult<String> {
    let bytes = field.bytes().await?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ApiError::from(StudentError::from(ValidationError::NotText { field: name })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-1").unwrap(), -1);
        assert!(matches!(parse_id("abc"), Err(ApiError::UnknownId)));
        assert!(matches!(parse_id("1.5"), Err(ApiError::UnknownId)));
        assert!(matches!(parse_id("99999999999999999999"), Err(ApiError::UnknownId)));
    }
}
