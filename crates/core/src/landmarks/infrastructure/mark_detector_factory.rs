use std::path::PathBuf;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::infrastructure::onnx_ssd_detector::OnnxSsdDetector;
use crate::landmarks::domain::landmark_backend::InputNormalization;
use crate::landmarks::domain::mark_detector::MarkDetector;
use crate::shared::constants::{DEFAULT_DETECTOR_MODEL, DEFAULT_LANDMARK_MODEL};
use crate::shared::model_error::ModelLoadError;

use super::landmark_model::LandmarkModel;

/// Locations of the model files a [`MarkDetector`] is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelPaths {
    /// Face detector weights (ONNX).
    pub detector_weights: PathBuf,
    /// Architecture descriptor that shipped with the Caffe weights.
    pub detector_descriptor: Option<PathBuf>,
    /// Landmark regressor, `.pb` or `.onnx`.
    pub landmark_model: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            detector_weights: PathBuf::from(DEFAULT_DETECTOR_MODEL),
            detector_descriptor: None,
            landmark_model: PathBuf::from(DEFAULT_LANDMARK_MODEL),
        }
    }
}

/// Load both models and wire them into a [`MarkDetector`].
///
/// Fails on the first model that cannot be loaded.
pub fn create_mark_detector(
    paths: &ModelPaths,
    normalization: InputNormalization,
) -> Result<MarkDetector, ModelLoadError> {
    let detector =
        OnnxSsdDetector::load(&paths.detector_weights, paths.detector_descriptor.as_deref())?;
    let landmarks = LandmarkModel::load(&paths.landmark_model)?;
    log::info!("Landmark model format: {:?}", landmarks.format());

    Ok(MarkDetector::new(
        FaceDetector::new(Box::new(detector)),
        Box::new(landmarks),
        normalization,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths_point_into_assets() {
        let paths = ModelPaths::default();
        assert_eq!(paths.detector_weights, Path::new("assets/face_detector.onnx"));
        assert_eq!(paths.landmark_model, Path::new("assets/face_landmark.onnx"));
        assert!(paths.detector_descriptor.is_none());
    }

    #[test]
    fn test_missing_detector_fails_construction() {
        let paths = ModelPaths {
            detector_weights: PathBuf::from("/nonexistent/face_detector.onnx"),
            detector_descriptor: None,
            landmark_model: PathBuf::from("/nonexistent/face_landmark.onnx"),
        };
        let err = create_mark_detector(&paths, InputNormalization::default())
            .err()
            .unwrap();
        match err {
            ModelLoadError::NotFound { path } => {
                assert_eq!(path, Path::new("/nonexistent/face_detector.onnx"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
