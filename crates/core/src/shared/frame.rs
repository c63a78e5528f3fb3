use image::imageops::FilterType;
use image::RgbImage;
use ndarray::{ArrayView3, ArrayViewMut3};

use super::bounding_box::BoundingBox;

/// Number of interleaved channels in every frame (R, G, B).
pub const CHANNELS: usize = 3;

/// A single image: contiguous RGB bytes in row-major order.
///
/// Decoding and encoding happen at I/O boundaries only; detection,
/// cropping and annotation all operate on this buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// A frame filled with a single colour.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * CHANNELS)
            .collect();
        Self::new(data, width, height)
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Frame data length must match dimensions")
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row count, the `rows` of an OpenCV-style `(rows, cols)` shape.
    pub fn rows(&self) -> i32 {
        self.height as i32
    }

    /// Column count.
    pub fn cols(&self) -> i32 {
        self.width as i32
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copy out the pixels covered by `bbox`.
    ///
    /// The box must lie inside the frame; callers pass faceboxes, which
    /// are in-bounds by construction.
    pub fn crop(&self, bbox: &BoundingBox) -> Frame {
        assert!(
            bbox.left >= 0 && bbox.top >= 0 && bbox.right <= self.cols() && bbox.bottom <= self.rows(),
            "crop box {bbox:?} exceeds {}x{} frame",
            self.width,
            self.height
        );
        let x = bbox.left as usize;
        let y = bbox.top as usize;
        let w = bbox.width().max(0) as usize;
        let h = bbox.height().max(0) as usize;
        let fw = self.width as usize;

        let mut data = Vec::with_capacity(w * h * CHANNELS);
        for row in y..y + h {
            let start = (row * fw + x) * CHANNELS;
            data.extend_from_slice(&self.data[start..start + w * CHANNELS]);
        }
        Frame::new(data, w as u32, h as u32)
    }

    /// Bilinear resize to `width` × `height`.
    pub fn resized(&self, width: u32, height: u32) -> Frame {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let resized = image::imageops::resize(
            &self.to_rgb_image(),
            width,
            height,
            FilterType::Triangle,
        );
        Frame::from_rgb_image(resized)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}
