use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_embedder::{FaceDetection, FaceEmbedder};
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::shared::frame::Frame;

/// Embedding source built from a detector and a crop encoder.
///
/// Each detected region is expanded to a square (the encoder expects
/// square input), cropped from the full-resolution frame and encoded.
/// Detections whose crop falls outside the frame are skipped.
pub struct DetectingFaceEmbedder {
    detector: Box<dyn FaceDetector>,
    encoder: Box<dyn FaceEncoder>,
}

impl DetectingFaceEmbedder {
    pub fn new(detector: Box<dyn FaceDetector>, encoder: Box<dyn FaceEncoder>) -> Self {
        Self { detector, encoder }
    }
}

impl FaceEmbedder for DetectingFaceEmbedder {
    fn detect_and_embed(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>> {
        let regions = self.detector.detect(frame)?;
        let mut detections = Vec::with_capacity(regions.len());
        for region in regions {
            let Some(crop) = frame.crop(&region.squared()) else {
                log::debug!("Skipping detection outside frame: {region:?}");
                continue;
            };
            let embedding = self.encoder.encode(&crop)?;
            detections.push(FaceDetection { region, embedding });
        }
        Ok(detections)
    }
}
