//! Student domain actions - the record service.
//!
//! Each action validates first and only then touches the store, so a
//! rejected request never leaves a row behind. Actions hold no state of
//! their own; everything they need comes in through `ServerDeps`.

mod create_student;
mod delete_student;
mod queries;
mod update_student;

pub use create_student::create_student;
pub use delete_student::delete_student;
pub use queries::{get_student, get_student_image, list_students};
pub use update_student::update_student;
