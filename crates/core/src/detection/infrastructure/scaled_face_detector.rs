use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Decorator that runs detection on a downscaled copy of each frame.
///
/// Regions are mapped back to the original frame's coordinates, so
/// callers never see the scaled geometry. Smaller frames detect faster
/// at the cost of missing small faces.
///
/// Mapped regions are not clamped here: the inner detector already trims
/// boxes to the frame it saw, and pixel consumers (`Frame::crop`, the
/// thumbnail padding) clamp after their own geometry is applied.
pub struct ScaledFaceDetector {
    inner: Box<dyn FaceDetector>,
    scale: f64,
}

impl ScaledFaceDetector {
    pub fn new(inner: Box<dyn FaceDetector>, scale: f64) -> Result<Self, &'static str> {
        if !(scale > 0.0 && scale <= 1.0) {
            return Err("scale must be in (0, 1]");
        }
        Ok(Self { inner, scale })
    }
}

impl FaceDetector for ScaledFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        if (self.scale - 1.0).abs() < f64::EPSILON {
            return self.inner.detect(frame);
        }
        let small = frame.scaled(self.scale);
        let regions = self.inner.detect(&small)?;
        Ok(regions
            .iter()
            .map(|r| r.unscaled(self.scale))
            .filter(|r| !r.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingDetector {
        seen_sizes: Arc<Mutex<Vec<(u32, u32)>>>,
        result: Vec<Region>,
    }

    impl FaceDetector for RecordingDetector {
        fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            self.seen_sizes
                .lock()
                .unwrap()
                .push((frame.width(), frame.height()));
            Ok(self.result.clone())
        }
    }

    fn frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![0u8; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region {
            x,
            y,
            width: w,
            height: h,
        }
    }

    fn detector(result: Vec<Region>, scale: f64) -> (ScaledFaceDetector, Arc<Mutex<Vec<(u32, u32)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner = RecordingDetector {
            seen_sizes: seen.clone(),
            result,
        };
        (ScaledFaceDetector::new(Box::new(inner), scale).unwrap(), seen)
    }

    #[test]
    fn test_inner_sees_downscaled_frame() {
        let (mut det, seen) = detector(vec![], 0.5);
        det.detect(&frame(200, 100)).unwrap();
        assert_eq!(seen.lock().unwrap()[0], (100, 50));
    }

    #[test]
    fn test_regions_mapped_back_to_original() {
        let (mut det, _) = detector(vec![region(10, 20, 30, 15)], 0.5);
        let regions = det.detect(&frame(200, 100)).unwrap();
        assert_eq!(regions, vec![region(20, 40, 60, 30)]);
    }

    #[test]
    fn test_full_scale_passes_frame_through() {
        let (mut det, seen) = detector(vec![region(1, 2, 3, 4)], 1.0);
        let regions = det.detect(&frame(64, 48)).unwrap();
        assert_eq!(seen.lock().unwrap()[0], (64, 48));
        assert_eq!(regions, vec![region(1, 2, 3, 4)]);
    }

    #[test]
    fn test_edge_regions_keep_full_extent() {
        // Face cut off at the right edge of a 100x50 scaled frame
        let (mut det, _) = detector(vec![region(90, 40, 20, 20)], 0.5);
        let regions = det.detect(&frame(200, 100)).unwrap();
        assert_eq!(regions, vec![region(180, 80, 40, 40)]);
    }

    #[test]
    fn test_edge_region_thumbnail_pads_before_clamping() {
        use crate::report::domain::thumbnail_generator::ThumbnailGenerator;
        use crate::report::infrastructure::jpeg_thumbnail_generator::JpegThumbnailGenerator;

        let (mut det, _) = detector(vec![region(90, 30, 20, 20)], 0.5);
        let original = frame(200, 100);
        let regions = det.detect(&original).unwrap();
        // Padding uses the full 40x40 box: x from 160 (180 - 20), clamped at 200
        let padded = regions[0].padded(0.5).clamped(200, 100).unwrap();
        assert_eq!(padded, region(160, 40, 40, 60));
        assert!(JpegThumbnailGenerator::default()
            .crop_and_encode(&original, &regions[0])
            .is_some());
    }

    #[test]
    fn test_empty_regions_dropped() {
        let (mut det, _) = detector(vec![region(10, 10, 0, 5), region(1, 1, 2, 2)], 0.5);
        let regions = det.detect(&frame(200, 100)).unwrap();
        assert_eq!(regions, vec![region(2, 2, 4, 4)]);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        for scale in [0.0, -0.5, 1.5, f64::NAN] {
            let inner = RecordingDetector {
                seen_sizes: Arc::new(Mutex::new(Vec::new())),
                result: vec![],
            };
            assert!(ScaledFaceDetector::new(Box::new(inner), scale).is_err());
        }
    }
}
