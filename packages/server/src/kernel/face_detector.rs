// Face Detector Implementations
//
// The production detector wraps the SeetaFace frontal model (via `rustface`)
// and is only compiled with the `face-detection` feature.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::kernel::BaseFaceDetector;

/// Build the face gate from configuration.
///
/// No model path means no gate. A model path in a build without the
/// `face-detection` feature is a configuration error rather than a silently
/// disabled gate.
pub fn create_face_detector(model_path: Option<&Path>) -> Result<Option<Arc<dyn BaseFaceDetector>>> {
    let Some(model_path) = model_path else {
        tracing::info!("Face detection disabled (FACE_MODEL_PATH not set)");
        return Ok(None);
    };

    #[cfg(feature = "face-detection")]
    {
        let detector = seeta::SeetaFaceDetector::new(model_path)?;
        tracing::info!("Face detection enabled with model {}", model_path.display());
        Ok(Some(Arc::new(detector)))
    }

    #[cfg(not(feature = "face-detection"))]
    {
        anyhow::bail!(
            "FACE_MODEL_PATH is set to {} but this build lacks the `face-detection` feature",
            model_path.display()
        )
    }
}

#[cfg(feature = "face-detection")]
pub use seeta::SeetaFaceDetector;

#[cfg(feature = "face-detection")]
mod seeta {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use anyhow::{Context, Result};
    use async_trait::async_trait;
    use rustface::model::{read_model, Model};
    use rustface::ImageData;

    use crate::kernel::{BaseFaceDetector, FaceDetectionError};

    const MIN_FACE_SIZE: u32 = 20;
    const SCORE_THRESHOLD: f64 = 2.0;
    const PYRAMID_SCALE_FACTOR: f32 = 0.8;
    const SLIDE_WINDOW_STEP: u32 = 4;

    /// SeetaFace frontal face detector.
    ///
    /// The model is read once; each detection builds its own detector from a
    /// copy inside a blocking task, since rustface detectors are stateful.
    pub struct SeetaFaceDetector {
        model: Model,
    }

    impl SeetaFaceDetector {
        pub fn new(model_path: &Path) -> Result<Self> {
            let file = File::open(model_path)
                .with_context(|| format!("face model not found at {}", model_path.display()))?;
            let model = read_model(BufReader::new(file)).map_err(|e| {
                anyhow::anyhow!("failed to read face model {}: {}", model_path.display(), e)
            })?;

            Ok(Self { model })
        }
    }

    #[async_trait]
    impl BaseFaceDetector for SeetaFaceDetector {
        async fn count_faces(&self, image: &[u8]) -> Result<usize, FaceDetectionError> {
            let model = self.model.clone();
            let bytes = image.to_vec();

            tokio::task::spawn_blocking(move || detect(model, &bytes))
                .await
                .map_err(|e| FaceDetectionError::Detector(e.to_string()))?
        }
    }

    fn detect(model: Model, bytes: &[u8]) -> Result<usize, FaceDetectionError> {
        let gray = image::load_from_memory(bytes)
            .map_err(|e| FaceDetectionError::Undecodable(e.to_string()))?
            .to_luma8();
        let (width, height) = gray.dimensions();

        let mut detector = rustface::create_detector_with_model(model);
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
        detector.set_slide_window_step(SLIDE_WINDOW_STEP, SLIDE_WINDOW_STEP);

        let mut image = ImageData::new(gray.as_raw(), width, height);
        let faces = detector.detect(&mut image);

        tracing::debug!(faces = faces.len(), width, height, "Face detection finished");
        Ok(faces.len())
    }
}
