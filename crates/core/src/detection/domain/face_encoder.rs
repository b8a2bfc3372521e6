use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

/// Domain interface for turning a face crop into an embedding.
pub trait FaceEncoder: Send {
    fn encode(&mut self, face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>>;
}
