//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod error;
pub mod face_detector;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use error::{FaceDetectionError, StoreError};
pub use face_detector::create_face_detector;
pub use stores::{open_store, MemoryStudentStore, PostgresStudentStore, SqliteStudentStore};
pub use test_dependencies::{MockFaceDetector, TestDependencies};
pub use traits::*;
