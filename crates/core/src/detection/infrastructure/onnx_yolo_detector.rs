//! YOLO face detector using ONNX Runtime via `ort`.
//!
//! Handles letterbox preprocessing, inference and NMS post-processing.
//! This is the accurate backend; `OnnxBlazefaceDetector` is the fast one.

use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::execution_provider::load_session;
use super::math::{nms, sort_reading_order, ScoredBox};

/// Fallback YOLO model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// Values before the keypoints in each output row: cx, cy, w, h, conf.
const BOX_VALUES: usize = 5;

/// YOLO face detector backed by an ONNX Runtime session.
pub struct OnnxYoloDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLO ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxYoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let (input_tensor, letterbox) = letterbox(frame, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        if shape.len() != 3 {
            return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
        }
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        let boxes = decode_output(data, &shape, self.confidence, &letterbox);
        let mut kept = nms(boxes, NMS_IOU_THRESH);
        sort_reading_order(&mut kept);

        let fw = frame.width();
        let fh = frame.height();
        Ok(kept
            .iter()
            .filter_map(|b| Region::from_corners(b.x1, b.y1, b.x2, b.y2).clamped(fw, fh))
            .collect())
    }
}

/// Geometry of a letterbox transform, used to map boxes back.
#[derive(Clone, Copy, Debug)]
struct Letterbox {
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

impl Letterbox {
    fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.pad_x as f64) / self.scale,
            (y - self.pad_y as f64) / self.scale,
        )
    }
}

/// Letterbox-resize a frame to `target_size` x `target_size`, NCHW float32.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, Letterbox) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = (fw * scale).round() as u32;
    let new_h = (fh * scale).round() as u32;
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    // Padded area is 114/255 gray, the YOLO convention
    let gray = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target_size as usize, target_size as usize), gray);

    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        Letterbox {
            scale,
            pad_x,
            pad_y,
        },
    )
}

/// Parses raw YOLO output into frame-space boxes above `confidence`.
///
/// Accepts both `[1, features, detections]` and `[1, detections, features]`
/// layouts; the smaller of the last two axes is the feature axis.
fn decode_output(
    data: &[f32],
    shape: &[usize],
    confidence: f64,
    letterbox: &Letterbox,
) -> Vec<ScoredBox> {
    let transposed = shape[1] < shape[2];
    let (num_dets, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if num_feats < BOX_VALUES {
        return Vec::new();
    }

    let value = |det: usize, feat: usize| -> f64 {
        if transposed {
            data[feat * num_dets + det] as f64
        } else {
            data[det * num_feats + feat] as f64
        }
    };

    let mut boxes = Vec::new();
    for i in 0..num_dets {
        let conf = value(i, 4);
        if conf < confidence {
            continue;
        }
        let (cx, cy, w, h) = (value(i, 0), value(i, 1), value(i, 2), value(i, 3));
        let (x1, y1) = letterbox.to_frame(cx - w / 2.0, cy - h / 2.0);
        let (x2, y2) = letterbox.to_frame(cx + w / 2.0, cy + h / 2.0);
        boxes.push(ScoredBox {
            x1,
            y1,
            x2,
            y2,
            score: conf,
        });
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 frame -> scale 3.2, new 640x320, pad_y 160
        let frame = Frame::new(vec![128u8; 200 * 100 * 3], 200, 100, 3, 0);
        let (tensor, lb) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((lb.scale - 3.2).abs() < 0.01);
        assert_eq!(lb.pad_x, 0);
        assert_eq!(lb.pad_y, 160);
    }

    #[test]
    fn test_letterbox_values_normalized() {
        let frame = Frame::new(vec![255u8; 100 * 50 * 3], 100, 50, 3, 0);
        let (tensor, lb) = letterbox(&frame, 640);

        let y = lb.pad_y as usize + 1;
        let x = lb.pad_x as usize + 1;
        assert!((tensor[[0, 0, y, x]] - 1.0).abs() < 0.01);
        assert!((tensor[[0, 0, 0, 0]] - 114.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn test_letterbox_maps_back_to_frame() {
        let lb = Letterbox {
            scale: 2.0,
            pad_x: 0,
            pad_y: 100,
        };
        assert_eq!(lb.to_frame(40.0, 140.0), (20.0, 20.0));
    }

    #[test]
    fn test_decode_row_major_layout() {
        // [1, 6 detections, 5 features]; rows past the second are empty
        let mut data = vec![0.0f32; 6 * 5];
        data[..5].copy_from_slice(&[50.0, 50.0, 20.0, 20.0, 0.9]);
        data[5..10].copy_from_slice(&[10.0, 10.0, 4.0, 4.0, 0.1]);
        let lb = Letterbox {
            scale: 1.0,
            pad_x: 0,
            pad_y: 0,
        };
        let boxes = decode_output(&data, &[1, 6, 5], 0.5, &lb);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].corners(), [40.0, 40.0, 60.0, 60.0]);
    }

    #[test]
    fn test_decode_transposed_layout() {
        // [1, 5 features, 8 detections]; only detection 3 is confident
        let num_dets = 8;
        let mut data = vec![0.0f32; 5 * num_dets];
        data[3] = 100.0; // cx
        data[num_dets + 3] = 80.0; // cy
        data[2 * num_dets + 3] = 10.0; // w
        data[3 * num_dets + 3] = 20.0; // h
        data[4 * num_dets + 3] = 0.8; // conf
        let lb = Letterbox {
            scale: 2.0,
            pad_x: 10,
            pad_y: 0,
        };
        let boxes = decode_output(&data, &[1, 5, num_dets], 0.5, &lb);
        assert_eq!(boxes.len(), 1);
        // x1 = (95 - 10) / 2, y1 = 70 / 2, x2 = (105 - 10) / 2, y2 = 90 / 2
        assert_eq!(boxes[0].corners(), [42.5, 35.0, 47.5, 45.0]);
    }

    #[test]
    fn test_decode_too_few_features() {
        let lb = Letterbox {
            scale: 1.0,
            pad_x: 0,
            pad_y: 0,
        };
        assert!(decode_output(&[0.0; 12], &[1, 4, 3], 0.5, &lb).is_empty());
    }
}
