use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to bring a model into memory. Always fatal to construction.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("model file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("unsupported model format for {}: {hint}", path.display())]
    UnsupportedFormat { path: PathBuf, hint: String },
    #[error("failed to load model {}: {message}", path.display())]
    Runtime { path: PathBuf, message: String },
}

impl ModelLoadError {
    pub fn runtime(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Runtime {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Errors raised when an inference backend returns something unusable.
#[derive(Error, Debug, PartialEq)]
pub enum InferenceError {
    #[error("model produced no outputs")]
    EmptyOutput,
    #[error("unexpected output shape: {0:?}")]
    UnexpectedOutputShape(Vec<usize>),
    #[error("landmark vector has odd length {0}, cannot form (x, y) pairs")]
    OddLandmarkVector(usize),
}

/// Fails with [`ModelLoadError::NotFound`] unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<(), ModelLoadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ModelLoadError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_exists_missing_file() {
        let err = ensure_exists(Path::new("/nonexistent/model.onnx")).unwrap_err();
        assert!(matches!(err, ModelLoadError::NotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/model.onnx"));
    }

    #[test]
    fn test_ensure_exists_present_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_exists(file.path()).is_ok());
    }

    #[test]
    fn test_runtime_error_message_includes_cause() {
        let err = ModelLoadError::runtime(Path::new("m.onnx"), "bad protobuf");
        assert_eq!(err.to_string(), "failed to load model m.onnx: bad protobuf");
    }
}
