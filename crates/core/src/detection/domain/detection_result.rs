use crate::shared::bounding_box::BoundingBox;

/// Face boxes and their confidences for one image, in detector order.
///
/// Boxes and confidences are index-aligned; [`DetectionResult::push`] is
/// the only way to add entries, so the two never drift apart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    boxes: Vec<BoundingBox>,
    confidences: Vec<f32>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bbox: BoundingBox, confidence: f32) {
        self.boxes.push(bbox);
        self.confidences.push(confidence);
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn confidences(&self) -> &[f32] {
        &self.confidences
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoundingBox, f32)> + '_ {
        self.boxes.iter().zip(self.confidences.iter().copied())
    }
}

impl FromIterator<(BoundingBox, f32)> for DetectionResult {
    fn from_iter<I: IntoIterator<Item = (BoundingBox, f32)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (bbox, confidence) in iter {
            result.push(bbox, confidence);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = DetectionResult::new();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.iter().count(), 0);
    }

    #[test]
    fn test_push_keeps_boxes_and_confidences_aligned() {
        let mut result = DetectionResult::new();
        result.push(BoundingBox::new(0, 0, 10, 10), 0.9);
        result.push(BoundingBox::new(5, 5, 20, 30), 0.6);

        assert_eq!(result.len(), 2);
        assert_eq!(result.confidences(), &[0.9, 0.6]);
        let pairs: Vec<_> = result.iter().map(|(b, c)| (b.left, c)).collect();
        assert_eq!(pairs, vec![(0, 0.9), (5, 0.6)]);
    }

    #[test]
    fn test_collect_preserves_order() {
        let result: DetectionResult = vec![
            (BoundingBox::new(3, 0, 4, 1), 0.7),
            (BoundingBox::new(1, 0, 2, 1), 0.8),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.boxes()[0].left, 3);
        assert_eq!(result.boxes()[1].left, 1);
    }
}
