use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::shared::thumbnail::Thumbnail;

/// Produces the representative image of a new identity.
///
/// `None` means the crop was unusable (empty or failed to encode); the
/// caller then drops the detection instead of creating an identity.
pub trait ThumbnailGenerator: Send {
    fn crop_and_encode(&self, frame: &Frame, region: &Region) -> Option<Thumbnail>;
}
