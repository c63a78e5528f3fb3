use std::path::{Path, PathBuf};

use thiserror::Error;

use super::constants::IMAGE_EXTENSIONS;
use super::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decode an image file of any supported format into an RGB frame.
pub fn read_frame(path: &Path) -> Result<Frame, ImageIoError> {
    let image = image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Frame::from_rgb_image(image.to_rgb8()))
}

/// Encode a frame to `path`, choosing the format from its extension.
pub fn write_frame(path: &Path, frame: &Frame) -> Result<(), ImageIoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ImageIoError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    frame
        .to_rgb_image()
        .save(path)
        .map_err(|source| ImageIoError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
