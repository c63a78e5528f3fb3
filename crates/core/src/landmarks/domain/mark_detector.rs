use crate::detection::domain::detection_result::DetectionResult;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::facebox::{faceboxes_from, FaceBox};
use crate::shared::constants::DEFAULT_CONFIDENCE;
use crate::shared::frame::Frame;

use super::landmark_backend::{InputNormalization, LandmarkBackend};
use super::landmark_set::{FaceMarks, LandmarkSet};

/// Everything one pass over a frame produced.
///
/// `detections` is the unfiltered detector output, kept for drawing;
/// `faces` holds the faceboxes that survived squaring and clipping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameMarks {
    pub detections: DetectionResult,
    pub faces: Vec<FaceMarks>,
}

/// Facial landmark detection: face detector, facebox normalization, and
/// landmark regression on each crop.
pub struct MarkDetector {
    face_detector: FaceDetector,
    backend: Box<dyn LandmarkBackend>,
    normalization: InputNormalization,
    confidence: f32,
}

impl MarkDetector {
    pub fn new(
        face_detector: FaceDetector,
        backend: Box<dyn LandmarkBackend>,
        normalization: InputNormalization,
    ) -> Self {
        Self {
            face_detector,
            backend,
            normalization,
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    /// Override the detection threshold used for faceboxes.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Detect faces and turn each into a square, in-image facebox.
    pub fn extract_cnn_facebox(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let detections = self.face_detector.get_faceboxes(frame, self.confidence)?;
        Ok(faceboxes_from(detections.boxes(), frame.cols(), frame.rows()))
    }

    /// Regress landmarks from a face crop.
    ///
    /// Crops not already at the backend's input size are resized first.
    pub fn detect_marks(&mut self, crop: &Frame) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
        let size = self.backend.input_size();
        let input = self.normalization.to_tensor(&crop.resized(size, size));
        let flat = self.backend.predict(&input)?;
        Ok(LandmarkSet::from_flat(&flat)?)
    }

    /// Full per-frame pass: detect, normalize faceboxes, regress landmarks.
    pub fn detect(&mut self, frame: &Frame) -> Result<FrameMarks, Box<dyn std::error::Error>> {
        let detections = self.face_detector.get_faceboxes(frame, self.confidence)?;
        let faceboxes = faceboxes_from(detections.boxes(), frame.cols(), frame.rows());
        log::debug!(
            "{} of {} detections produced usable faceboxes",
            faceboxes.len(),
            detections.len()
        );

        let mut faces = Vec::with_capacity(faceboxes.len());
        for facebox in faceboxes {
            let crop = frame.crop(facebox.bbox());
            let marks = self.detect_marks(&crop)?;
            faces.push(FaceMarks { facebox, marks });
        }

        Ok(FrameMarks { detections, faces })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detector::tests::{raw, StubBackend};
    use crate::detection::domain::facebox::box_in_image;
    use crate::shared::bounding_box::BoundingBox;
    use ndarray::Array4;
    use std::sync::{Arc, Mutex};

    /// Records input shapes and returns a fixed flat vector.
    struct StubRegressor {
        output: Vec<f32>,
        seen_shapes: Arc<Mutex<Vec<Vec<usize>>>>,
    }

    impl StubRegressor {
        fn new(output: Vec<f32>) -> Self {
            Self {
                output,
                seen_shapes: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl LandmarkBackend for StubRegressor {
        fn input_size(&self) -> u32 {
            64
        }

        fn predict(
            &mut self,
            input: &Array4<f32>,
        ) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            self.seen_shapes.lock().unwrap().push(input.shape().to_vec());
            Ok(self.output.clone())
        }
    }

    fn mark_detector(
        detections: Vec<crate::detection::domain::face_detector::RawDetection>,
        regressor: StubRegressor,
    ) -> MarkDetector {
        MarkDetector::new(
            FaceDetector::new(Box::new(StubBackend { detections })),
            Box::new(regressor),
            InputNormalization::default(),
        )
    }

    fn frame() -> Frame {
        Frame::filled(640, 480, [90, 90, 90])
    }

    #[test]
    fn test_extract_cnn_facebox_squares_and_shifts() {
        // 64x96 px at (128, 96): offset 16 down, widened by 16 each side
        let mut md = mark_detector(
            vec![raw(0.9, 0.2, 0.2, 0.3, 0.4)],
            StubRegressor::new(vec![]),
        );
        let boxes = md.extract_cnn_facebox(&frame()).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(*boxes[0].bbox(), BoundingBox::new(112, 112, 208, 208));
    }

    #[test]
    fn test_extract_cnn_facebox_drops_low_confidence_and_out_of_bounds() {
        let mut md = mark_detector(
            vec![
                raw(0.3, 0.2, 0.2, 0.3, 0.4),   // below 0.5
                raw(0.9, 0.0, 0.0, 0.02, 0.3),  // squares past the left edge
                raw(0.8, 0.5, 0.5, 0.6, 0.7),
            ],
            StubRegressor::new(vec![]),
        );
        let boxes = md.extract_cnn_facebox(&frame()).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].left(), 304);
    }

    #[test]
    fn test_extract_cnn_facebox_never_out_of_image() {
        let detections = (0..20)
            .map(|i| {
                let t = i as f32 / 20.0;
                raw(0.9, t - 0.1, 1.0 - t, t + 0.05, 1.1 - t)
            })
            .collect();
        let mut md = mark_detector(detections, StubRegressor::new(vec![]));
        let f = frame();
        for facebox in md.extract_cnn_facebox(&f).unwrap() {
            assert!(box_in_image(facebox.bbox(), &f));
        }
    }

    #[test]
    fn test_detect_marks_resizes_to_input_size() {
        let regressor = StubRegressor::new(vec![1.0, 2.0, 3.0, 4.0]);
        let shapes = regressor.seen_shapes.clone();
        let mut md = mark_detector(vec![], regressor);

        let marks = md.detect_marks(&Frame::filled(96, 96, [0, 0, 0])).unwrap();

        assert_eq!(shapes.lock().unwrap()[0], vec![1, 64, 64, 3]);
        assert_eq!(marks.len(), 2);
        assert_eq!((marks.points()[1].x, marks.points()[1].y), (3.0, 4.0));
    }

    #[test]
    fn test_detect_marks_odd_output_is_error() {
        let mut md = mark_detector(vec![], StubRegressor::new(vec![1.0, 2.0, 3.0]));
        let err = md.detect_marks(&Frame::filled(64, 64, [0, 0, 0])).unwrap_err();
        assert!(err.to_string().contains("odd length 3"));
    }

    #[test]
    fn test_detect_returns_marks_per_facebox_in_order() {
        let regressor = StubRegressor::new(vec![0.5; 136]);
        let shapes = regressor.seen_shapes.clone();
        let mut md = mark_detector(
            vec![
                raw(0.8, 0.5, 0.5, 0.6, 0.7),
                raw(0.4, 0.1, 0.1, 0.2, 0.2),
                raw(0.9, 0.2, 0.2, 0.3, 0.4),
            ],
            regressor,
        );

        let result = md.detect(&frame()).unwrap();

        assert_eq!(result.detections.len(), 2);
        assert_eq!(result.faces.len(), 2);
        assert_eq!(result.faces[0].facebox.left(), 304);
        assert_eq!(result.faces[1].facebox.left(), 112);
        assert!(result.faces.iter().all(|f| f.marks.len() == 68));
        assert_eq!(shapes.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_detect_without_faces_is_empty() {
        let mut md = mark_detector(vec![], StubRegressor::new(vec![0.0; 4]));
        let result = md.detect(&frame()).unwrap();
        assert!(result.detections.is_empty());
        assert!(result.faces.is_empty());
    }

    #[test]
    fn test_with_confidence_lowers_threshold() {
        let mut md = mark_detector(
            vec![raw(0.4, 0.2, 0.2, 0.3, 0.4)],
            StubRegressor::new(vec![]),
        );
        assert!(md.extract_cnn_facebox(&frame()).unwrap().is_empty());

        let mut md = md.with_confidence(0.3);
        assert_eq!(md.confidence(), 0.3);
        assert_eq!(md.extract_cnn_facebox(&frame()).unwrap().len(), 1);
    }

    #[test]
    fn test_degenerate_detections_never_reach_the_regressor() {
        let regressor = StubRegressor::new(vec![0.5; 4]);
        let shapes = regressor.seen_shapes.clone();
        let detections = vec![
            raw(0.9, 0.5, 0.5, 0.4, 0.4), // inverted
            raw(0.9, 0.5, 0.5, 0.5, 0.5), // zero area
            raw(0.9, 0.3, 0.2, 0.3, 0.4), // zero width
        ];
        let mut md = mark_detector(detections, regressor);

        assert!(md.extract_cnn_facebox(&frame()).unwrap().is_empty());

        let result = md.detect(&frame()).unwrap();
        assert_eq!(result.detections.len(), 3);
        assert!(result.faces.is_empty());
        assert!(shapes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_extreme_coordinates_are_dropped_without_panic() {
        let mut md = mark_detector(
            vec![
                raw(0.9, -1e12, 0.1, 1e12, 0.2),
                raw(0.9, 0.1, -1e12, 0.2, 0.3),
                raw(0.9, 0.1, 0.1, 0.2, 1e12),
            ],
            StubRegressor::new(vec![0.5; 4]),
        );
        let result = md.detect(&frame()).unwrap();
        assert!(result.faces.is_empty());
    }
}
