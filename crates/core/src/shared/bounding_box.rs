/// Axis-aligned box in integer pixel coordinates, `(left, top, right, bottom)`.
///
/// `right` and `bottom` are exclusive edges, so `width = right - left`.
/// A usable box has positive width and height. Detector output is not
/// guaranteed to, so [`BoundingBox::has_area`] is checked before a box is
/// turned into a facebox.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Saturates instead of overflowing on extreme edges.
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Whether `right > left` and `bottom > top`.
    pub fn has_area(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    /// `[left, top, right, bottom]`, the layout detectors emit.
    pub fn to_array(&self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl AsRef<BoundingBox> for BoundingBox {
    fn as_ref(&self) -> &BoundingBox {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::landscape(BoundingBox::new(0, 0, 40, 30), 40, 30)]
    #[case::portrait(BoundingBox::new(10, 10, 11, 40), 1, 30)]
    #[case::degenerate(BoundingBox::new(10, 10, 10, 40), 0, 30)]
    #[case::negative_origin(BoundingBox::new(-5, -5, 5, 5), 10, 10)]
    fn test_dimensions(#[case] bbox: BoundingBox, #[case] w: i32, #[case] h: i32) {
        assert_eq!(bbox.width(), w);
        assert_eq!(bbox.height(), h);
    }

    #[test]
    fn test_extreme_edges_saturate() {
        let bbox = BoundingBox::new(i32::MIN, i32::MIN, i32::MAX, 10);
        assert_eq!(bbox.width(), i32::MAX);
        assert_eq!(bbox.height(), i32::MAX);
        assert_eq!(BoundingBox::new(i32::MAX, 0, i32::MIN, 0).width(), i32::MIN);
    }

    #[rstest]
    #[case::positive(BoundingBox::new(0, 0, 40, 30), true)]
    #[case::zero_width(BoundingBox::new(10, 10, 10, 40), false)]
    #[case::zero_height(BoundingBox::new(10, 10, 40, 10), false)]
    #[case::inverted(BoundingBox::new(320, 240, 256, 192), false)]
    fn test_has_area(#[case] bbox: BoundingBox, #[case] expected: bool) {
        assert_eq!(bbox.has_area(), expected);
    }

    #[test]
    fn test_is_square() {
        assert!(BoundingBox::new(0, 0, 10, 10).is_square());
        assert!(!BoundingBox::new(0, 0, 10, 11).is_square());
    }

    #[test]
    fn test_array_conversion_keeps_order() {
        let bbox = BoundingBox::from([1, 2, 3, 4]);
        assert_eq!(bbox, BoundingBox::new(1, 2, 3, 4));
        assert_eq!(bbox.to_array(), [1, 2, 3, 4]);
    }
}
