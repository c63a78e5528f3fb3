//! ResNet-10 SSD face detector using ONNX Runtime via `ort`.
//!
//! Handles blob preprocessing (resize, BGR plane order, mean subtraction)
//! and decoding of the `[1, 1, N, 7]` detection output.
use std::path::Path;

use ndarray::Array4;

use crate::detection::domain::face_detector::{DetectionBackend, RawDetection};
use crate::shared::constants::{DETECTOR_INPUT_SIZE, DETECTOR_MEAN_BGR, SSD_RECORD_LEN};
use crate::shared::frame::Frame;
use crate::shared::model_error::{ensure_exists, InferenceError, ModelLoadError};
use crate::shared::onnx_session::{extract_f32, open_session};

/// Offset of the confidence within a detection record.
const CONFIDENCE_OFFSET: usize = 2;

/// Offset of the first normalized coordinate (x1) within a detection record.
const BOX_OFFSET: usize = 3;

/// SSD face detector backed by an ONNX Runtime session.
pub struct OnnxSsdDetector {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxSsdDetector {
    /// Load the detector weights.
    ///
    /// `descriptor` is the network architecture file that accompanied the
    /// Caffe weights. ONNX embeds the graph, so the file is only
    /// checked for existence.
    pub fn load(weights: &Path, descriptor: Option<&Path>) -> Result<Self, ModelLoadError> {
        if let Some(descriptor) = descriptor {
            ensure_exists(descriptor)?;
            log::warn!(
                "Ignoring architecture descriptor {}: ONNX weights carry their own graph",
                descriptor.display()
            );
        }
        let session = open_session(weights)?;
        log::info!("Loaded face detector from {}", weights.display());
        Ok(Self {
            session,
            input_size: DETECTOR_INPUT_SIZE,
        })
    }
}

impl DetectionBackend for OnnxSsdDetector {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, Box<dyn std::error::Error>> {
        let blob = blob_from_frame(frame, self.input_size, DETECTOR_MEAN_BGR);

        let input_value = ort::value::Tensor::from_array(blob)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err(InferenceError::EmptyOutput.into());
        }
        let (shape, data) = extract_f32(&outputs[0])?;

        Ok(parse_detections(&shape, &data)?)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Resize a frame to `size` × `size` and lay it out as an NCHW float blob.
///
/// Planes are ordered B, G, R (the order the Caffe weights were trained
/// on), each with its mean subtracted and no further scaling.
fn blob_from_frame(frame: &Frame, size: u32, mean_bgr: [f32; 3]) -> Array4<f32> {
    let resized = frame.resized(size, size);
    let src = resized.as_ndarray(); // [H, W, RGB]
    let size = size as usize;

    Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
        src[[y, x, 2 - c]] as f32 - mean_bgr[c]
    })
}

// ---------------------------------------------------------------------------
// Output decoding
// ---------------------------------------------------------------------------

/// Decode `(image_id, class_id, confidence, x1, y1, x2, y2)` records.
///
/// Any rank-2+ tensor whose innermost dimension holds one record is
/// accepted, so squeezed exports (`[N, 7]`, `[1, N, 7]`) decode too.
/// Records carrying NaN or infinite values are skipped.
fn parse_detections(shape: &[usize], data: &[f32]) -> Result<Vec<RawDetection>, InferenceError> {
    if shape.len() < 2 || shape[shape.len() - 1] != SSD_RECORD_LEN {
        return Err(InferenceError::UnexpectedOutputShape(shape.to_vec()));
    }

    Ok(data
        .chunks_exact(SSD_RECORD_LEN)
        .filter(|record| {
            let finite = record[CONFIDENCE_OFFSET..].iter().all(|v| v.is_finite());
            if !finite {
                log::warn!("Skipping detection record with non-finite values: {record:?}");
            }
            finite
        })
        .map(|record| RawDetection {
            confidence: record[CONFIDENCE_OFFSET],
            x1: record[BOX_OFFSET],
            y1: record[BOX_OFFSET + 1],
            x2: record[BOX_OFFSET + 2],
            y2: record[BOX_OFFSET + 3],
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
