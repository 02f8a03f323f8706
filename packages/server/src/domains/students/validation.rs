//! Validation layer for student submissions.
//!
//! Raw wire input arrives as a `StudentSubmission` (every part optional, all
//! text). Creation turns it into complete `StudentFields`; updates turn it
//! into a `StudentPatch`. Either every supplied part is valid or the whole
//! submission is rejected, so nothing half-validated ever reaches a store.

use tracing::debug;

use super::errors::ValidationError;
use super::models::{Branch, Gender, StudentFields};
use crate::common::Change;
use crate::kernel::{BaseFaceDetector, FaceDetectionError};

pub const DEFAULT_MIN_YEAR: i32 = 1995;
pub const DEFAULT_MAX_YEAR: i32 = 2028;

/// Field constraints that vary per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRules {
    pub min_year: i32,
    pub max_year: i32,
    /// Branches accepted on create/update, a subset of `Branch::ALL`.
    pub allowed_branches: Vec<Branch>,
}

impl Default for StudentRules {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            allowed_branches: Branch::ALL.to_vec(),
        }
    }
}

/// Unvalidated student input as it came off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSubmission {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Change<String>,
    pub gender: Change<Gender>,
    pub branch: Change<Branch>,
    pub year: Change<i32>,
    pub image: Change<Vec<u8>>,
}

impl StudentPatch {
    /// True when the patch would leave every field as stored.
    pub fn is_empty(&self) -> bool {
        self.name.is_keep()
            && self.gender.is_keep()
            && self.branch.is_keep()
            && self.year.is_keep()
            && self.image.is_keep()
    }

    /// Apply the patch on top of the stored fields.
    pub fn apply(self, fields: &mut StudentFields) {
        self.name.apply(&mut fields.name);
        self.gender.apply(&mut fields.gender);
        self.branch.apply(&mut fields.branch);
        self.year.apply(&mut fields.year);
        self.image.apply(&mut fields.image);
    }
}

impl StudentRules {
    /// Blank names are refused; anything else is stored as given.
    pub fn validate_name(&self, raw: &str) -> Result<String, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(raw.to_string())
    }

    pub fn validate_gender(&self, raw: &str) -> Result<Gender, ValidationError> {
        raw.parse().map_err(|_| ValidationError::InvalidGender {
            value: raw.to_string(),
            allowed: join_wire(Gender::ALL.iter().map(Gender::as_str)),
        })
    }

    pub fn validate_branch(&self, raw: &str) -> Result<Branch, ValidationError> {
        raw.parse::<Branch>()
            .ok()
            .filter(|branch| self.allowed_branches.contains(branch))
            .ok_or_else(|| ValidationError::InvalidBranch {
                value: raw.to_string(),
                allowed: join_wire(self.allowed_branches.iter().map(Branch::as_str)),
            })
    }

    /// Parse a year from form text and check it against the configured range.
    pub fn validate_year(&self, raw: &str) -> Result<i32, ValidationError> {
        let year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidYear {
                value: raw.to_string(),
            })?;
        self.check_year(year)
    }

    pub fn check_year(&self, year: i32) -> Result<i32, ValidationError> {
        if year < self.min_year || year > self.max_year {
            return Err(ValidationError::YearOutOfRange {
                year,
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(year)
    }

    /// Validate a complete submission for creation.
    ///
    /// Every field and the image are required. The face check is separate
    /// (see [`check_image`]) because it is async and may be disabled.
    pub fn validate_create(
        &self,
        submission: StudentSubmission,
    ) -> Result<StudentFields, ValidationError> {
        let name = required(submission.name, "name")?;
        let gender = required(submission.gender, "gender")?;
        let branch = required(submission.branch, "branch")?;
        let year = required(submission.year, "year")?;
        let image = required(submission.image, "image")?;

        Ok(StudentFields {
            name: self.validate_name(&name)?,
            gender: self.validate_gender(&gender)?,
            branch: self.validate_branch(&branch)?,
            year: self.validate_year(&year)?,
            image,
        })
    }

    /// Validate a partial submission for update. Absent parts stay `Keep`.
    pub fn validate_patch(
        &self,
        submission: StudentSubmission,
    ) -> Result<StudentPatch, ValidationError> {
        Ok(StudentPatch {
            name: submission
                .name
                .map(|raw| self.validate_name(&raw))
                .transpose()?
                .into(),
            gender: submission
                .gender
                .map(|raw| self.validate_gender(&raw))
                .transpose()?
                .into(),
            branch: submission
                .branch
                .map(|raw| self.validate_branch(&raw))
                .transpose()?
                .into(),
            year: submission
                .year
                .map(|raw| self.validate_year(&raw))
                .transpose()?
                .into(),
            image: submission.image.into(),
        })
    }
}

/// Check image bytes before they are accepted.
///
/// Empty payloads are always refused. With a detector configured the bytes
/// must decode and contain at least one face; zero faces is a rejection, the
/// caller has to submit a different image.
pub async fn check_image(
    image: &[u8],
    detector: Option<&dyn BaseFaceDetector>,
) -> Result<(), ValidationError> {
    if image.is_empty() {
        return Err(ValidationError::EmptyImage);
    }

    let Some(detector) = detector else {
        return Ok(());
    };

    match detector.count_faces(image).await {
        Ok(0) => Err(ValidationError::NoFaceDetected),
        Ok(faces) => {
            debug!(faces, bytes = image.len(), "Face check passed");
            Ok(())
        }
        Err(FaceDetectionError::Undecodable(reason)) => {
            Err(ValidationError::UndecodableImage(reason))
        }
        Err(FaceDetectionError::Detector(reason)) => {
            Err(ValidationError::FaceDetectionFailed(reason))
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

fn join_wire<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
