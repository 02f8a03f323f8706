// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    BaseFaceDetector, BaseStudentStore, FaceDetectionError, MemoryStudentStore, ServerDeps,
};
use crate::domains::students::StudentRules;

// =============================================================================
// Mock Face Detector
// =============================================================================

/// Face detector with scripted answers keyed by the exact image bytes.
///
/// Images without a scripted answer report `default_faces`.
pub struct MockFaceDetector {
    default_faces: usize,
    responses: Arc<Mutex<HashMap<Vec<u8>, Result<usize, FaceDetectionError>>>>,
    calls: Arc<Mutex<Vec<usize>>>,
}

impl MockFaceDetector {
    pub fn new(default_faces: usize) -> Self {
        Self {
            default_faces,
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Report `faces` faces for this exact image.
    pub fn with_faces(self, image: impl Into<Vec<u8>>, faces: usize) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(image.into(), Ok(faces));
        self
    }

    /// Treat this exact image as undecodable.
    pub fn with_undecodable(self, image: impl Into<Vec<u8>>) -> Self {
        self.responses.lock().unwrap().insert(
            image.into(),
            Err(FaceDetectionError::Undecodable(
                "unrecognized image format".to_string(),
            )),
        );
        self
    }

    /// Make the detector itself fail on this exact image.
    pub fn with_detector_error(self, image: impl Into<Vec<u8>>) -> Self {
        self.responses.lock().unwrap().insert(
            image.into(),
            Err(FaceDetectionError::Detector(
                "face model unavailable".to_string(),
            )),
        );
        self
    }

    /// Number of images inspected so far
    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Byte length of every inspected image, in call order
    pub fn inspected_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockFaceDetector {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl BaseFaceDetector for MockFaceDetector {
    async fn count_faces(&self, image: &[u8]) -> Result<usize, FaceDetectionError> {
        self.calls.lock().unwrap().push(image.len());

        self.responses
            .lock()
            .unwrap()
            .get(image)
            .cloned()
            .unwrap_or(Ok(self.default_faces))
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub store: Arc<MemoryStudentStore>,
    pub face_detector: Option<Arc<MockFaceDetector>>,
    pub rules: StudentRules,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStudentStore::new()),
            face_detector: None,
            rules: StudentRules::default(),
        }
    }

    /// Enable the face gate with a mock detector
    pub fn mock_faces(mut self, detector: MockFaceDetector) -> Self {
        self.face_detector = Some(Arc::new(detector));
        self
    }

    /// Override the validation rules
    pub fn rules(mut self, rules: StudentRules) -> Self {
        self.rules = rules;
        self
    }

    /// Build ServerDeps that share this builder's store and detector
    pub fn into_server_deps(self) -> ServerDeps {
        let store: Arc<dyn BaseStudentStore> = self.store;
        let face_detector = self
            .face_detector
            .map(|detector| detector as Arc<dyn BaseFaceDetector>);
        ServerDeps::new(store, face_detector, self.rules)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
