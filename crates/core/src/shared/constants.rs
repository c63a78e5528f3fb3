/// Detections at or below this confidence are discarded.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// Side of the square blob fed to the SSD face detector.
pub const DETECTOR_INPUT_SIZE: u32 = 150;

/// Per-channel mean subtracted from the detector blob, in B, G, R order.
pub const DETECTOR_MEAN_BGR: [f32; 3] = [104.0, 177.0, 123.0];

/// Values per SSD detection record: image id, class id, confidence, x1, y1, x2, y2.
pub const SSD_RECORD_LEN: usize = 7;

/// Side of the square face crop fed to the landmark regressor.
pub const LANDMARK_INPUT_SIZE: u32 = 64;

/// Input node of the frozen landmark graph.
pub const FROZEN_GRAPH_INPUT: &str = "input_2";

/// Output node of the frozen landmark graph.
pub const FROZEN_GRAPH_OUTPUT: &str = "Identity";

/// Custom layers and losses the Keras landmark model was trained with.
/// An ONNX export has to inline all of them.
pub const KERAS_CUSTOM_OBJECTS: &[&str] = &["smoothL1", "relu6", "DepthwiseConv2D", "mask_weights"];

pub const DEFAULT_DETECTOR_MODEL: &str = "assets/face_detector.onnx";
pub const DEFAULT_LANDMARK_MODEL: &str = "assets/face_landmark.onnx";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
