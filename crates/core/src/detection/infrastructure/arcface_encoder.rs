//! ArcFace face encoder using ONNX Runtime.
//!
//! Embeddings are L2-normalized and then scaled by [`distance_scale`], so
//! that two faces at the same-person cosine boundary
//! ([`SAME_PERSON_COSINE`]) sit exactly at the matcher's default tolerance.
//! For unit vectors the Euclidean distance is `sqrt(2 - 2 cos)`; without the
//! scale a 0.6 tolerance would only accept pairs with cos >= 0.82.

use std::path::Path;

use crate::detection::domain::face_encoder::FaceEncoder;
use crate::identity::domain::matcher::DEFAULT_TOLERANCE;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

use super::execution_provider::load_session;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

/// Cosine similarity at which two ArcFace embeddings are the same person.
pub const SAME_PERSON_COSINE: f64 = 0.4;

/// Factor applied to unit embeddings so the same-person boundary lands at
/// `DEFAULT_TOLERANCE`.
pub fn distance_scale() -> f32 {
    (DEFAULT_TOLERANCE / (2.0 * (1.0 - SAME_PERSON_COSINE)).sqrt()) as f32
}

pub struct ArcFaceEncoder {
    session: ort::session::Session,
}

impl ArcFaceEncoder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: load_session(model_path)?,
        })
    }
}

impl FaceEncoder for ArcFaceEncoder {
    fn encode(&mut self, face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>> {
        if face.width() == 0 || face.height() == 0 {
            return Err("Cannot encode an empty face crop".into());
        }
        let tensor = preprocess(face.data(), face.width(), face.height());
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;

        let mut values = embedding_slice.to_vec();
        l2_normalize(&mut values);
        let scale = distance_scale();
        values.iter_mut().for_each(|v| *v *= scale);
        Ok(Embedding::new(values))
    }
}

/// Resize crop to 112x112, normalize, NCHW layout.
fn preprocess(rgb_data: &[u8], width: u32, height: u32) -> ndarray::Array4<f32> {
    let src_w = width as usize;
    let src_h = height as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            let offset = (src_y * src_w + src_x) * 3;
            if offset + 2 < rgb_data.len() {
                for c in 0..3 {
                    tensor[[0, c, y, x]] = (rgb_data[offset + c] as f32 - NORM_MEAN) / NORM_STD;
                }
            }
        }
    }

    tensor
}

pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
