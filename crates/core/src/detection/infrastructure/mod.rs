pub mod onnx_ssd_detector;
