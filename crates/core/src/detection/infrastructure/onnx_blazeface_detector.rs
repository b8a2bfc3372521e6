//! BlazeFace face detector using ONNX Runtime via `ort`.
//!
//! A lightweight short-range detector that trades recall on small or
//! distant faces for speed. Selected with `DetectionModel::Blazeface`.

use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::execution_provider::load_session;
use super::math::{nms, sort_reading_order, ScoredBox};

/// BlazeFace model input resolution.
const INPUT_SIZE: u32 = 128;

/// Default confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.3;

/// Number of BlazeFace anchors (short-range model).
const NUM_ANCHORS: usize = 896;

/// Values per anchor in the regressor output (box + 6 keypoints).
const REGRESSOR_STRIDE: usize = 16;

pub struct OnnxBlazefaceDetector {
    session: ort::session::Session,
    confidence: f64,
    anchors: Vec<[f32; 2]>,
}

impl OnnxBlazefaceDetector {
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        Ok(Self {
            session,
            confidence,
            anchors: generate_anchors(),
        })
    }
}

impl FaceDetector for OnnxBlazefaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let fw = frame.width();
        let fh = frame.height();

        let input_tensor = preprocess(frame, INPUT_SIZE);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // regressors: [1, 896, 16], classificators: [1, 896, 1]
        if outputs.len() < 2 {
            return Err(
                format!("BlazeFace model expected 2 outputs, got {}", outputs.len()).into(),
            );
        }
        let regressors = outputs[0].try_extract_array::<f32>()?;
        let scores = outputs[1].try_extract_array::<f32>()?;
        let reg_data = regressors.as_slice().ok_or("Cannot get regressor slice")?;
        let score_data = scores.as_slice().ok_or("Cannot get score slice")?;

        let boxes = decode_anchors(
            reg_data,
            score_data,
            &self.anchors,
            self.confidence,
            fw as f32,
            fh as f32,
        );
        let mut kept = nms(boxes, NMS_IOU_THRESH);
        sort_reading_order(&mut kept);

        Ok(kept
            .iter()
            .filter_map(|b| Region::from_corners(b.x1, b.y1, b.x2, b.y2).clamped(fw, fh))
            .collect())
    }
}

/// Resize frame to `size x size` and normalize to [0,1] NCHW float32.
fn preprocess(frame: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

/// Decodes anchor-relative boxes above `confidence` into frame space.
fn decode_anchors(
    reg_data: &[f32],
    score_data: &[f32],
    anchors: &[[f32; 2]],
    confidence: f64,
    fw: f32,
    fh: f32,
) -> Vec<ScoredBox> {
    let num_anchors = anchors.len().min(NUM_ANCHORS);
    let mut boxes = Vec::new();

    for (i, &raw_score) in score_data.iter().enumerate().take(num_anchors) {
        let score = sigmoid(raw_score);
        if (score as f64) < confidence {
            continue;
        }
        let offset = i * REGRESSOR_STRIDE;
        if offset + 4 > reg_data.len() {
            break;
        }

        let anchor = anchors[i];
        let cx = anchor[0] + reg_data[offset] / INPUT_SIZE as f32;
        let cy = anchor[1] + reg_data[offset + 1] / INPUT_SIZE as f32;
        let w = reg_data[offset + 2] / INPUT_SIZE as f32;
        let h = reg_data[offset + 3] / INPUT_SIZE as f32;

        boxes.push(ScoredBox {
            x1: ((cx - w / 2.0) * fw).max(0.0) as f64,
            y1: ((cy - h / 2.0) * fh).max(0.0) as f64,
            x2: ((cx + w / 2.0) * fw).min(fw) as f64,
            y2: ((cy + h / 2.0) * fh).min(fh) as f64,
            score: score as f64,
        });
    }
    boxes
}

/// Short-range anchors: a 16x16 grid with 2 anchors per cell followed by
/// an 8x8 grid with 6 per cell.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)];
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, num) in &strides {
        let grid_size = INPUT_SIZE as usize / stride;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let cx = (x as f32 + 0.5) / grid_size as f32;
                let cy = (y as f32 + 0.5) / grid_size as f32;
                for _ in 0..num {
                    anchors.push([cx, cy]);
                }
            }
        }
    }

    anchors
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
