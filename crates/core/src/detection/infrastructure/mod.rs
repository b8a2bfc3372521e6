pub mod arcface_encoder;
pub mod detecting_face_embedder;
pub mod execution_provider;
pub mod math;
pub mod onnx_blazeface_detector;
pub mod onnx_yolo_detector;
pub mod scaled_face_detector;
