//! Landmark regressor from a frozen TensorFlow graph, run with tract.

use std::path::Path;

use ndarray::Array4;
use tract_tensorflow::prelude::*;

use crate::landmarks::domain::landmark_backend::LandmarkBackend;
use crate::shared::constants::{FROZEN_GRAPH_INPUT, FROZEN_GRAPH_OUTPUT, LANDMARK_INPUT_SIZE};
use crate::shared::model_error::{ensure_exists, ModelLoadError};

type Plan = TypedRunnableModel<TypedModel>;

/// Frozen graph bound to its fixed input and output node names.
pub struct FrozenGraphBackend {
    plan: Plan,
    input_size: u32,
}

impl FrozenGraphBackend {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        ensure_exists(path)?;
        let input_size = LANDMARK_INPUT_SIZE;
        let plan = build_plan(path, input_size).map_err(|e| ModelLoadError::runtime(path, e))?;
        log::info!(
            "Loaded frozen landmark graph from {} ({FROZEN_GRAPH_INPUT} -> {FROZEN_GRAPH_OUTPUT})",
            path.display()
        );
        Ok(Self { plan, input_size })
    }
}

fn build_plan(path: &Path, input_size: u32) -> TractResult<Plan> {
    let side = input_size as usize;
    tract_tensorflow::tensorflow()
        .model_for_path(path)?
        .with_input_names([FROZEN_GRAPH_INPUT])?
        .with_output_names([FROZEN_GRAPH_OUTPUT])?
        .with_input_fact(0, f32::fact([1, side, side, 3]).into())?
        .into_optimized()?
        .into_runnable()
}

impl LandmarkBackend for FrozenGraphBackend {
    fn input_size(&self) -> u32 {
        self.input_size
    }

    fn predict(&mut self, input: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let data = input
            .as_slice()
            .ok_or("landmark input must be in standard layout")?;
        let tensor = Tensor::from_shape(input.shape(), data)?;
        let outputs = self.plan.run(tvec!(tensor.into()))?;
        let output = outputs.first().ok_or("frozen graph produced no outputs")?;
        Ok(output.to_array_view::<f32>()?.iter().copied().collect())
    }
}
