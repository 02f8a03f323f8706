// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Validation and merge rules live in the students domain and call these.
//
// Naming convention: Base* for trait names (e.g., BaseStudentStore)

use async_trait::async_trait;

use crate::domains::students::models::{Student, StudentFields};
use crate::kernel::error::{FaceDetectionError, StoreError};

// =============================================================================
// Student Store Trait (Infrastructure)
// =============================================================================

/// Durable table of student records keyed by a store-assigned integer id.
///
/// Every method is a single store statement. Ids are assigned on insert and
/// never reused, even after the record is deleted.
#[async_trait]
pub trait BaseStudentStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Cheap round trip proving the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, fields: &StudentFields) -> Result<Student, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StoreError>;

    /// Every record, ordered by id (insertion order).
    async fn find_all(&self) -> Result<Vec<Student>, StoreError>;

    /// Overwrite all fields of an existing record. `None` if the id is absent.
    async fn replace(&self, id: i64, fields: &StudentFields)
        -> Result<Option<Student>, StoreError>;

    /// Remove a record, returning what was stored. `None` if the id is absent.
    async fn delete(&self, id: i64) -> Result<Option<Student>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

// =============================================================================
// Face Detector Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseFaceDetector: Send + Sync {
    /// Number of face regions found in the encoded image.
    async fn count_faces(&self, image: &[u8]) -> Result<usize, FaceDetectionError>;
}
