use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use thiserror::Error;

/// Glyph height used for detection labels.
pub const LABEL_SCALE: f32 = 14.0;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("failed to read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font {}", path.display())]
    Font { path: PathBuf },
}

/// A TrueType/OpenType font used to render label text.
pub struct LabelFont {
    font: FontVec,
    scale: PxScale,
}

impl LabelFont {
    pub fn load(path: &Path) -> Result<Self, AnnotationError> {
        let bytes = std::fs::read(path).map_err(|source| AnnotationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(bytes).map_err(|_| AnnotationError::Font {
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            font,
            scale: PxScale::from(LABEL_SCALE),
        })
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Rendered `(width, height)` of `text` in pixels.
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        imageproc::drawing::text_size(self.scale, &self.font, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_measures_text() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");
        let font = LabelFont::load(&path).unwrap();
        let (short_w, h) = font.text_size("face");
        let (long_w, _) = font.text_size("face: 0.9876");
        assert!(h > 0);
        assert!(long_w > short_w);
    }

    #[test]
    fn test_load_missing_font() {
        let err = LabelFont::load(Path::new("/nonexistent/font.ttf")).err().unwrap();
        assert!(matches!(err, AnnotationError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_font() {
        let file = tempfile::Builder::new().suffix(".ttf").tempfile().unwrap();
        std::fs::write(file.path(), b"definitely not a font").unwrap();
        let err = LabelFont::load(file.path()).err().unwrap();
        assert!(matches!(err, AnnotationError::Font { .. }));
    }
}
