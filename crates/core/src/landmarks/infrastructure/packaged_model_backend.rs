//! Landmark regressor from a packaged (ONNX-exported) model, run with `ort`.

use std::path::Path;

use ndarray::Array4;

use crate::landmarks::domain::landmark_backend::LandmarkBackend;
use crate::shared::constants::{KERAS_CUSTOM_OBJECTS, LANDMARK_INPUT_SIZE};
use crate::shared::model_error::{InferenceError, ModelLoadError};
use crate::shared::onnx_session::{extract_f32, open_session};

/// Whole-model regressor doing batched prediction on a one-image batch.
pub struct PackagedModelBackend {
    session: ort::session::Session,
    input_size: u32,
}

impl PackagedModelBackend {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let session = open_session(path).map_err(|e| match e {
            ModelLoadError::Runtime { path, message } => ModelLoadError::Runtime {
                path,
                message: format!(
                    "{message} (the export must inline the custom objects {})",
                    KERAS_CUSTOM_OBJECTS.join(", ")
                ),
            },
            other => other,
        })?;
        log::info!("Loaded packaged landmark model from {}", path.display());
        Ok(Self {
            session,
            input_size: LANDMARK_INPUT_SIZE,
        })
    }
}

impl LandmarkBackend for PackagedModelBackend {
    fn input_size(&self) -> u32 {
        self.input_size
    }

    fn predict(&mut self, input: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(input.clone())?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err(InferenceError::EmptyOutput.into());
        }
        let (_shape, flat) = extract_f32(&outputs[0])?;
        Ok(flat)
    }
}
