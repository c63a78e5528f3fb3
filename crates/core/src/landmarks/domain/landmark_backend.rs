use ndarray::Array4;

use crate::shared::frame::Frame;

/// Inference seam for landmark regressors.
///
/// Takes an NHWC `[1, size, size, 3]` crop and returns the raw output,
/// flattened in row-major order.
pub trait LandmarkBackend: Send {
    /// Side of the square crop the model expects.
    fn input_size(&self) -> u32;

    fn predict(&mut self, input: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}

/// How crop pixels become regressor input values.
///
/// The convention belongs to the trained weights, so it is configurable:
/// each channel is multiplied by `scale`, and `swap_rb` feeds B, G, R
/// instead of R, G, B.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputNormalization {
    pub scale: f32,
    pub swap_rb: bool,
}

impl Default for InputNormalization {
    fn default() -> Self {
        Self {
            scale: 1.0,
            swap_rb: false,
        }
    }
}

impl InputNormalization {
    /// Lay a square crop out as a single-image NHWC batch.
    pub fn to_tensor(&self, crop: &Frame) -> Array4<f32> {
        let src = crop.as_ndarray();
        let (h, w) = (crop.height() as usize, crop.width() as usize);
        Array4::from_shape_fn((1, h, w, 3), |(_, y, x, c)| {
            let channel = if self.swap_rb { 2 - c } else { c };
            src[[y, x, channel]] as f32 * self.scale
        })
    }
}
