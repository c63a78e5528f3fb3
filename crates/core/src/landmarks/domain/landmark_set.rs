//! Facial landmark points regressed from a face crop.

use crate::detection::domain::facebox::FaceBox;
use crate::shared::model_error::InferenceError;

/// A 2D point in the coordinate space of the regressor's input crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// Landmarks in the regressor's fixed output order. Never re-sorted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    /// Reshape a flat `[x0, y0, x1, y1, ...]` vector into points.
    pub fn from_flat(values: &[f32]) -> Result<Self, InferenceError> {
        if values.len() % 2 != 0 {
            return Err(InferenceError::OddLandmarkVector(values.len()));
        }
        let points = values
            .chunks_exact(2)
            .map(|pair| Landmark {
                x: pair[0],
                y: pair[1],
            })
            .collect();
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> + '_ {
        self.points.iter()
    }

    /// Map marks normalized to `[0, 1]` of the crop onto the facebox, in
    /// source-image pixels.
    ///
    /// The pipeline returns crop-local marks untouched; this is for callers
    /// whose model emits normalized coordinates.
    pub fn to_image_space(&self, facebox: &FaceBox) -> LandmarkSet {
        let size = facebox.size() as f32;
        let (left, top) = (facebox.left() as f32, facebox.top() as f32);
        LandmarkSet {
            points: self
                .points
                .iter()
                .map(|p| Landmark {
                    x: p.x * size + left,
                    y: p.y * size + top,
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LandmarkSet {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One accepted face: its facebox and the landmarks regressed from it.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceMarks {
    pub facebox: FaceBox,
    pub marks: LandmarkSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bounding_box::BoundingBox;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_from_flat_pairs_in_order() {
        let values: Vec<f32> = (0..136).map(|i| i as f32).collect();
        let set = LandmarkSet::from_flat(&values).unwrap();

        assert_eq!(set.len(), 68);
        for (i, p) in set.iter().enumerate() {
            assert_relative_eq!(p.x, values[2 * i]);
            assert_relative_eq!(p.y, values[2 * i + 1]);
        }
    }

    #[test]
    fn test_from_flat_empty() {
        let set = LandmarkSet::from_flat(&[]).unwrap();
        assert!(set.is_empty());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(135)]
    fn test_from_flat_odd_length_is_error(#[case] len: usize) {
        let err = LandmarkSet::from_flat(&vec![0.0; len]).unwrap_err();
        assert_eq!(err, InferenceError::OddLandmarkVector(len));
    }

    #[test]
    fn test_to_image_space_scales_and_offsets() {
        // 40 wide, 60 tall at (100, 100) -> facebox (90, 110, 150, 170)
        let facebox = FaceBox::from_detection(&BoundingBox::new(100, 100, 140, 160), 640, 480)
            .unwrap();
        let set = LandmarkSet::from_flat(&[0.0, 0.0, 0.5, 0.25, 1.0, 1.0]).unwrap();

        let mapped = set.to_image_space(&facebox);

        assert_eq!(
            mapped.points(),
            &[
                Landmark { x: 90.0, y: 110.0 },
                Landmark { x: 120.0, y: 125.0 },
                Landmark { x: 150.0, y: 170.0 },
            ]
        );
    }
}
