//! Shared math utilities for detection infrastructure.
//!
//! Provides bounding-box IoU and greedy non-maximum suppression used by
//! both ONNX detector backends.

/// Candidate box in frame coordinates with its detector score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub score: f64,
}

impl ScoredBox {
    pub fn corners(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// IoU between two bounding boxes represented as `[x1, y1, x2, y2]`.
pub fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

/// Greedy NMS: sort by score descending, suppress boxes overlapping a
/// kept box by more than `iou_thresh`.
///
/// The sort is stable, so equal scores keep their input order and the
/// output is deterministic.
pub fn nms(mut boxes: Vec<ScoredBox>, iou_thresh: f64) -> Vec<ScoredBox> {
    boxes.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<ScoredBox> = Vec::new();
    for candidate in boxes {
        let overlaps = keep
            .iter()
            .any(|k| bbox_iou(&k.corners(), &candidate.corners()) > iou_thresh);
        if !overlaps {
            keep.push(candidate);
        }
    }
    keep
}

/// Orders boxes top-to-bottom, then left-to-right.
///
/// Gives downstream consumers a reading-order detection sequence that
/// does not depend on score ties.
pub fn sort_reading_order(boxes: &mut [ScoredBox]) {
    boxes.sort_by(|a, b| {
        a.y1.partial_cmp(&b.y1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x1.partial_cmp(&b.x1).unwrap_or(std::cmp::Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(x1: f64, y1: f64, x2: f64, y2: f64, score: f64) -> ScoredBox {
        ScoredBox {
            x1,
            y1,
            x2,
            y2,
            score,
        }
    }

    #[test]
    fn test_bbox_iou_no_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [20.0, 20.0, 30.0, 30.0];
        assert_eq!(bbox_iou(&a, &b), 0.0);
    }

    #[test]
    fn test_bbox_iou_perfect_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        assert!((bbox_iou(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_iou_partial_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [5.0, 5.0, 15.0, 15.0];
        let expected = 25.0 / 175.0;
        assert!((bbox_iou(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let kept = nms(
            vec![
                scored(0.0, 0.0, 100.0, 100.0, 0.9),
                scored(5.0, 5.0, 105.0, 105.0, 0.8),
            ],
            0.3,
        );
        assert_eq!(kept.len(), 1);
        assert!((kept[0].score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_keeps_non_overlapping() {
        let kept = nms(
            vec![
                scored(0.0, 0.0, 50.0, 50.0, 0.9),
                scored(200.0, 200.0, 250.0, 250.0, 0.8),
            ],
            0.3,
        );
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_nms_higher_score_wins() {
        let kept = nms(
            vec![
                scored(0.0, 0.0, 100.0, 100.0, 0.5),
                scored(2.0, 2.0, 102.0, 102.0, 0.9),
            ],
            0.3,
        );
        assert_eq!(kept.len(), 1);
        assert!((kept[0].score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_empty_input() {
        assert!(nms(Vec::new(), 0.3).is_empty());
    }

    #[test]
    fn test_sort_reading_order() {
        let mut boxes = vec![
            scored(50.0, 10.0, 60.0, 20.0, 0.9),
            scored(0.0, 40.0, 10.0, 50.0, 0.9),
            scored(5.0, 10.0, 15.0, 20.0, 0.5),
        ];
        sort_reading_order(&mut boxes);
        assert_eq!(boxes[0].x1, 5.0);
        assert_eq!(boxes[1].x1, 50.0);
        assert_eq!(boxes[2].y1, 40.0);
    }
}
