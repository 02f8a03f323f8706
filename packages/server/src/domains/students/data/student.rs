use serde::{Deserialize, Serialize};

use crate::domains::students::models::{Branch, Gender, Student};
use crate::domains::students::validation::StudentRules;

/// Media type declared for every stored photo.
pub const IMAGE_MEDIA_TYPE: &str = "image/png";

/// Student API data type
///
/// Public representation of a student record. The photo is never inlined;
/// clients fetch it from the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentData {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub branch: Branch,
    pub year: i32,
}

impl From<Student> for StudentData {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            gender: student.gender,
            branch: student.branch,
            year: student.year,
        }
    }
}

/// A stored photo with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentImage {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

impl From<Student> for StudentImage {
    fn from(student: Student) -> Self {
        Self {
            bytes: student.image,
            media_type: IMAGE_MEDIA_TYPE,
        }
    }
}

/// Choices the admin form offers, taken from the deployment's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentFormOptions {
    pub genders: Vec<Gender>,
    pub branches: Vec<Branch>,
    pub min_year: i32,
    pub max_year: i32,
}

impl From<&StudentRules> for StudentFormOptions {
    fn from(rules: &StudentRules) -> Self {
        Self {
            genders: Gender::ALL.to_vec(),
            branches: rules.allowed_branches.clone(),
            min_year: rules.min_year,
            max_year: rules.max_year,
        }
    }
}
