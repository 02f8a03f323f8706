//! Test fixtures for building student submissions and multipart bodies.

use axum::body::Body;
use axum::http::{header, Request};
use students_core::domains::students::{Branch, Gender, StudentFields, StudentSubmission};

/// Stand-in photo bytes. The mock detector keys on exact bytes, so distinct
/// tags give distinct images.
pub fn photo(tag: &str) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

/// A complete, valid submission.
pub fn submission(name: &str) -> StudentSubmission {
    StudentSubmission {
        name: Some(name.to_string()),
        gender: Some("Female".to_string()),
        branch: Some("CSE".to_string()),
        year: Some("2024".to_string()),
        image: Some(photo(name)),
    }
}

/// Validated fields, for driving stores directly.
pub fn fields(name: &str) -> StudentFields {
    StudentFields {
        name: name.to_string(),
        gender: Gender::Female,
        branch: Branch::Cse,
        year: 2024,
        image: photo(name),
    }
}

const BOUNDARY: &str = "student-form-boundary";

/// Minimal `multipart/form-data` body builder.
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete, valid create form.
    pub fn student(name: &str) -> Self {
        Self::new()
            .text("name", name)
            .text("gender", "Female")
            .text("branch", "CSE")
            .text("year", "2024")
            .file("image", "photo.png", &photo(name))
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.raw(name, value.as_bytes())
    }

    /// A part without a filename, carrying arbitrary bytes.
    pub fn raw(mut self, name: &str, value: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(value);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_body(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }

    pub fn into_request(self, method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.into_body()))
            .unwrap()
    }
}
