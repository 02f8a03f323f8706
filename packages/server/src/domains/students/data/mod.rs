pub mod student;

pub use student::{StudentData, StudentFormOptions, StudentImage, IMAGE_MEDIA_TYPE};
