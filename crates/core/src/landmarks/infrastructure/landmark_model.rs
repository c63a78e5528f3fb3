use std::path::Path;

use ndarray::Array4;

use crate::landmarks::domain::landmark_backend::LandmarkBackend;
use crate::shared::model_error::ModelLoadError;

use super::frozen_graph_backend::FrozenGraphBackend;
use super::packaged_model_backend::PackagedModelBackend;

/// On-disk format of a landmark model, keyed on file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFormat {
    /// `.pb` frozen TensorFlow graph.
    FrozenGraph,
    /// `.onnx` packaged model.
    Packaged,
}

impl ModelFormat {
    /// Pick the format from the extension.
    ///
    /// Keras archives have no Rust runtime and must be exported to ONNX
    /// first; unknown extensions are rejected rather than guessed.
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pb" => Ok(Self::FrozenGraph),
            "onnx" => Ok(Self::Packaged),
            "h5" | "hdf5" | "keras" => Err(ModelLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                hint: "export the Keras model to ONNX (e.g. with tf2onnx) and load the .onnx file"
                    .to_string(),
            }),
            _ => Err(ModelLoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                hint: "expected a .pb frozen graph or an .onnx model".to_string(),
            }),
        }
    }
}

/// A loaded landmark regressor, one variant per supported format.
pub enum LandmarkModel {
    FrozenGraph(FrozenGraphBackend),
    Packaged(PackagedModelBackend),
}

impl LandmarkModel {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        match ModelFormat::from_path(path)? {
            ModelFormat::FrozenGraph => Ok(Self::FrozenGraph(FrozenGraphBackend::load(path)?)),
            ModelFormat::Packaged => Ok(Self::Packaged(PackagedModelBackend::load(path)?)),
        }
    }

    pub fn format(&self) -> ModelFormat {
        match self {
            Self::FrozenGraph(_) => ModelFormat::FrozenGraph,
            Self::Packaged(_) => ModelFormat::Packaged,
        }
    }
}

impl LandmarkBackend for LandmarkModel {
    fn input_size(&self) -> u32 {
        match self {
            Self::FrozenGraph(b) => b.input_size(),
            Self::Packaged(b) => b.input_size(),
        }
    }

    fn predict(&mut self, input: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        match self {
            Self::FrozenGraph(b) => b.predict(input),
            Self::Packaged(b) => b.predict(input),
        }
    }
}
