pub mod student;

pub use student::{Branch, Gender, Student, StudentFields, UnknownVariant};
