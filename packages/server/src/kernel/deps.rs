//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by the student
//! actions. The store and the face detector are trait objects so tests can
//! swap in in-memory and mock implementations.

use std::sync::Arc;

use crate::domains::students::StudentRules;
use crate::kernel::{BaseFaceDetector, BaseStudentStore};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Record store, constructed once at startup and shared by every request
    pub store: Arc<dyn BaseStudentStore>,
    /// Face gate for uploaded images; `None` accepts any non-empty image
    pub face_detector: Option<Arc<dyn BaseFaceDetector>>,
    /// Field constraints (year range, accepted branches)
    pub rules: StudentRules,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        store: Arc<dyn BaseStudentStore>,
        face_detector: Option<Arc<dyn BaseFaceDetector>>,
        rules: StudentRules,
    ) -> Self {
        Self {
            store,
            face_detector,
            rules,
        }
    }

    pub fn face_detector(&self) -> Option<&dyn BaseFaceDetector> {
        self.face_detector.as_deref()
    }
}
