use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// One detected face: where it is in the original frame and what it
/// looks like to the embedding model.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDetection {
    pub region: Region,
    pub embedding: Embedding,
}

/// Embedding source consumed by the gallery pipeline.
///
/// Yields zero or more detections per frame, in a deterministic order.
/// Regions are always in the coordinates of the frame passed in, even if
/// the implementation works on a downscaled copy internally.
pub trait FaceEmbedder: Send {
    fn detect_and_embed(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>>;
}
