use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

use super::detection_result::DetectionResult;

/// One detection slot as produced by the network, before thresholding.
///
/// Coordinates are normalized to `[0, 1]` of the input image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawDetection {
    pub confidence: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl RawDetection {
    /// Scale to pixel coordinates, truncating toward zero.
    pub fn denormalize(&self, cols: i32, rows: i32) -> BoundingBox {
        BoundingBox::new(
            (self.x1 * cols as f32) as i32,
            (self.y1 * rows as f32) as i32,
            (self.x2 * cols as f32) as i32,
            (self.y2 * rows as f32) as i32,
        )
    }
}

/// Inference seam for face detection engines.
///
/// Implementations own their preprocessing and return every detection
/// slot in network order, unfiltered.
pub trait DetectionBackend: Send {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, Box<dyn std::error::Error>>;
}

/// Locates candidate faces and converts them to pixel boxes.
pub struct FaceDetector {
    backend: Box<dyn DetectionBackend>,
}

impl FaceDetector {
    pub fn new(backend: Box<dyn DetectionBackend>) -> Self {
        Self { backend }
    }

    /// Detect faces with confidence strictly above `threshold`.
    ///
    /// Boxes keep the backend's slot order. An image without faces yields
    /// an empty result.
    pub fn get_faceboxes(
        &mut self,
        frame: &Frame,
        threshold: f32,
    ) -> Result<DetectionResult, Box<dyn std::error::Error>> {
        let (cols, rows) = (frame.cols(), frame.rows());
        let raw = self.backend.infer(frame)?;

        let result: DetectionResult = raw
            .iter()
            .filter(|d| d.confidence > threshold)
            .map(|d| (d.denormalize(cols, rows), d.confidence))
            .collect();

        log::debug!(
            "{} of {} detections above {threshold}",
            result.len(),
            raw.len()
        );
        Ok(result)
    }
}
