//! Students domain - validation and persistence of student records
//!
//! Architecture:
//!   HTTP route → actions (validate → persist) → BaseStudentStore

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use data::{StudentData, StudentFormOptions, StudentImage};
pub use errors::{StudentError, ValidationError};
pub use models::{Branch, Gender, Student, StudentFields};
pub use validation::{StudentPatch, StudentRules, StudentSubmission};
