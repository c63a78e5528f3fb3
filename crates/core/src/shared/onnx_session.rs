use std::path::Path;

use ort::session::Session;

use super::model_error::{ensure_exists, ModelLoadError};

/// Return the preferred ONNX execution providers for the current platform.
///
/// ONNX Runtime falls back to CPU if the platform-specific provider is
/// unavailable.
pub fn preferred_execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

/// Open an ONNX model as an inference session.
pub fn open_session(model_path: &Path) -> Result<Session, ModelLoadError> {
    ensure_exists(model_path)?;
    build_session(model_path).map_err(|e| ModelLoadError::runtime(model_path, e))
}

fn build_session(model_path: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::builder()?
        .with_execution_providers(preferred_execution_providers())?
        .commit_from_file(model_path)?;
    Ok(session)
}

/// Copy an `f32` tensor output out of the session, in row-major order.
pub fn extract_f32(
    value: &ort::value::DynValue,
) -> Result<(Vec<usize>, Vec<f32>), Box<dyn std::error::Error>> {
    let array = value.try_extract_array::<f32>()?;
    let shape = array.shape().to_vec();
    Ok((shape, array.iter().copied().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_session_missing_file() {
        let err = open_session(Path::new("/nonexistent/face_detector.onnx")).err().unwrap();
        assert!(matches!(err, ModelLoadError::NotFound { .. }));
    }

    #[test]
    fn test_open_session_rejects_garbage() {
        let file = tempfile::Builder::new().suffix(".onnx").tempfile().unwrap();
        std::fs::write(file.path(), b"not a protobuf").unwrap();
        let err = open_session(file.path()).err().unwrap();
        assert!(matches!(err, ModelLoadError::Runtime { .. }));
    }
}
