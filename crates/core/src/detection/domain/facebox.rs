//! Square, in-bounds face crops derived from raw detector boxes.
//!
//! SSD face boxes are usually taller than wide and sit high on the face.
//! The box is shifted down by half the height/width difference, then
//! widened (or heightened) into a square, and dropped if that pushes it
//! past the image edge.

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// A square [`BoundingBox`] fully inside its source image.
///
/// Only [`FaceBox::from_detection`] creates one, so the invariants hold
/// for every value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceBox(BoundingBox);

impl FaceBox {
    /// Recentre `raw` vertically, square it, and keep it if it fits a
    /// `cols` × `rows` image.
    ///
    /// Boxes without positive width and height are dropped up front, as are
    /// boxes whose left, right, or bottom edge is already outside the image
    /// (shifting down and squaring only push those edges further out) or
    /// whose top lies more than a frame height above it.
    pub fn from_detection(raw: &BoundingBox, cols: i32, rows: i32) -> Option<FaceBox> {
        if !raw.has_area() {
            log::trace!("Dropping degenerate detection {raw:?}");
            return None;
        }
        if raw.left < 0 || raw.right > cols || raw.bottom > rows || raw.top < -rows {
            log::trace!("Dropping detection {raw:?} outside {cols}x{rows} image");
            return None;
        }

        let diff = raw.height() - raw.width();
        let offset_y = diff.abs() / 2;
        let facebox = get_square_box(&move_box(raw, (0, offset_y)));

        if fits(&facebox, cols, rows) {
            Some(FaceBox(facebox))
        } else {
            log::trace!("Dropping facebox {facebox:?} outside {cols}x{rows} image");
            None
        }
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.0
    }

    /// Side length in pixels.
    pub fn size(&self) -> i32 {
        self.0.width()
    }

    pub fn left(&self) -> i32 {
        self.0.left
    }

    pub fn top(&self) -> i32 {
        self.0.top
    }
}

impl AsRef<BoundingBox> for FaceBox {
    fn as_ref(&self) -> &BoundingBox {
        &self.0
    }
}

impl From<FaceBox> for BoundingBox {
    fn from(facebox: FaceBox) -> Self {
        facebox.0
    }
}

/// Convert every raw detection into a facebox, keeping detector order and
/// silently dropping those that end up outside the image.
pub fn faceboxes_from<'a>(
    raw_boxes: impl IntoIterator<Item = &'a BoundingBox>,
    cols: i32,
    rows: i32,
) -> Vec<FaceBox> {
    raw_boxes
        .into_iter()
        .filter_map(|raw| FaceBox::from_detection(raw, cols, rows))
        .collect()
}

/// Translate all four edges by `(dx, dy)`.
pub fn move_box(bbox: &BoundingBox, offset: (i32, i32)) -> BoundingBox {
    let (dx, dy) = offset;
    BoundingBox::new(
        bbox.left + dx,
        bbox.top + dy,
        bbox.right + dx,
        bbox.bottom + dy,
    )
}

/// Expand a box into a square along its shorter side.
///
/// The expansion is split evenly between both edges; an odd difference
/// puts the extra pixel on the right (slim boxes) or bottom (short boxes).
pub fn get_square_box(bbox: &BoundingBox) -> BoundingBox {
    let mut squared = *bbox;
    let diff = bbox.height() - bbox.width();
    let delta = diff.abs() / 2;
    let odd = diff % 2 != 0;

    if diff == 0 {
        return squared;
    } else if diff > 0 {
        squared.left -= delta;
        squared.right += delta;
        if odd {
            squared.right += 1;
        }
    } else {
        squared.top -= delta;
        squared.bottom += delta;
        if odd {
            squared.bottom += 1;
        }
    }

    assert_eq!(squared.width(), squared.height(), "Box is not square.");
    squared
}

/// Whether the box lies within `[0, cols] × [0, rows]` of the frame.
pub fn box_in_image(bbox: &BoundingBox, frame: &Frame) -> bool {
    fits(bbox, frame.cols(), frame.rows())
}

fn fits(bbox: &BoundingBox, cols: i32, rows: i32) -> bool {
    bbox.left >= 0 && bbox.top >= 0 && bbox.right <= cols && bbox.bottom <= rows
}
