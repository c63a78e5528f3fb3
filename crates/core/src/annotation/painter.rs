//! Visualization helpers that draw in place on a [`Frame`].
//!
//! Coordinates follow the detector convention: boxes are inclusive of
//! both corner pixels when outlined, and shapes falling partly outside
//! the frame are clipped.

use image::{ImageBuffer, Rgb};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut,
};
use imageproc::rect::Rect;

use crate::detection::domain::detection_result::DetectionResult;
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

use super::label_font::LabelFont;

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Label box size used when no font is loaded, roughly a 14px sans face.
const FALLBACK_CHAR_WIDTH: u32 = 8;
const FALLBACK_TEXT_HEIGHT: u32 = 12;

/// Space kept below the label text baseline.
const LABEL_BASELINE: i32 = 5;

type Canvas<'a> = ImageBuffer<Rgb<u8>, &'a mut [u8]>;

fn canvas(frame: &mut Frame) -> Canvas<'_> {
    let (width, height) = (frame.width(), frame.height());
    ImageBuffer::from_raw(width, height, frame.data_mut())
        .expect("Frame data length must match dimensions")
}

/// Rectangle covering both corners inclusively, or `None` if inverted.
fn outline_rect(left: i32, top: i32, right: i32, bottom: i32) -> Option<Rect> {
    if right < left || bottom < top {
        return None;
    }
    Some(Rect::at(left, top).of_size((right - left + 1) as u32, (bottom - top + 1) as u32))
}

/// Outline each box.
pub fn draw_box<B: AsRef<BoundingBox>>(
    frame: &mut Frame,
    boxes: impl IntoIterator<Item = B>,
    color: [u8; 3],
) {
    let mut canvas = canvas(frame);
    for bbox in boxes {
        let b = bbox.as_ref();
        if let Some(rect) = outline_rect(b.left, b.top, b.right, b.bottom) {
            draw_hollow_rect_mut(&mut canvas, rect, Rgb(color));
        }
    }
}

/// Draw each landmark as a filled dot of radius `thick`.
pub fn draw_marks(frame: &mut Frame, marks: &LandmarkSet, color: [u8; 3], thick: i32) {
    let mut canvas = canvas(frame);
    for mark in marks {
        draw_filled_circle_mut(
            &mut canvas,
            (mark.x as i32, mark.y as i32),
            thick,
            Rgb(color),
        );
    }
}

/// Label text for one detection.
pub fn detection_label(confidence: f32) -> String {
    format!("face: {confidence:.4}")
}

/// Draw every detection as a green box with a filled confidence label.
///
/// The label sits on the box's top edge. Without a font only the label
/// background is drawn.
pub fn draw_all_result(frame: &mut Frame, result: &DetectionResult, font: Option<&LabelFont>) {
    let mut canvas = canvas(frame);
    for (bbox, confidence) in result.iter() {
        if let Some(rect) = outline_rect(bbox.left, bbox.top, bbox.right, bbox.bottom) {
            draw_hollow_rect_mut(&mut canvas, rect, Rgb(GREEN));
        }

        let label = detection_label(confidence);
        let (label_w, label_h) = match font {
            Some(f) => f.text_size(&label),
            None => (
                FALLBACK_CHAR_WIDTH * label.chars().count() as u32,
                FALLBACK_TEXT_HEIGHT,
            ),
        };
        let text_top = bbox.top - label_h as i32;

        if let Some(rect) = outline_rect(
            bbox.left,
            text_top,
            bbox.left + label_w as i32,
            bbox.top + LABEL_BASELINE,
        ) {
            draw_filled_rect_mut(&mut canvas, rect, Rgb(GREEN));
        }
        if let Some(f) = font {
            draw_text_mut(
                &mut canvas,
                Rgb(BLACK),
                bbox.left,
                text_top,
                f.scale(),
                f.font(),
                &label,
            );
        }
    }
}
