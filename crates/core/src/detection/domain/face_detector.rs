use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for face localization.
///
/// Regions are returned in detection order, in pixel coordinates of the
/// frame that was passed in. Implementations may keep state between
/// calls, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
