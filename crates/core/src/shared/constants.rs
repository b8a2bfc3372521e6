pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// No public download; the file must sit in the cache or the bundled model dir.
pub const BLAZEFACE_MODEL_NAME: &str = "blazeface_front.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/w600k_r50.onnx";

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Every Nth decoded frame is analysed.
pub const DEFAULT_FRAME_SAMPLING_INTERVAL: usize = 25;

pub const DEFAULT_FRAME_SCALE: f64 = 0.5;

pub const DEBUG_FRAMES_DIR: &str = "debug_frames";
