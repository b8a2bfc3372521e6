use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::identity::domain::matcher::DEFAULT_TOLERANCE;
use crate::shared::constants::{
    DEBUG_FRAMES_DIR, DEFAULT_FRAME_SAMPLING_INTERVAL, DEFAULT_FRAME_SCALE,
    DEFAULT_VIDEO_EXTENSIONS,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("input directory not found: {0}")]
    InputDirNotFound(PathBuf),
    #[error("comparison tolerance must be a finite number >= 0, got {0}")]
    InvalidTolerance(f64),
    #[error("frame scale must be in (0, 1], got {0}")]
    InvalidScale(f64),
    #[error("frame sampling interval must be at least 1, got {0}")]
    InvalidSamplingInterval(usize),
    #[error("at least one video extension is required")]
    NoExtensions,
    #[error("unknown detection model '{0}' (expected 'yolo' or 'blazeface')")]
    UnknownModel(String),
}

/// Face detector backing the scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectionModel {
    /// YOLO11n-pose trained on WIDER FACE. Slower, finds small and profile faces.
    #[default]
    Yolo,
    /// BlazeFace front model. Fast, frontal faces at close range only.
    BlazeFace,
}

impl FromStr for DetectionModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yolo" => Ok(DetectionModel::Yolo),
            "blazeface" => Ok(DetectionModel::BlazeFace),
            _ => Err(ConfigError::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for DetectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionModel::Yolo => write!(f, "yolo"),
            DetectionModel::BlazeFace => write!(f, "blazeface"),
        }
    }
}

/// Everything a scan run needs, independent of how it was collected.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanConfig {
    pub input_dir: PathBuf,
    pub output_html: PathBuf,
    pub model: DetectionModel,
    pub frame_scale: f64,
    pub frame_sampling_interval: usize,
    pub comparison_tolerance: f64,
    pub extensions: Vec<String>,
    pub model_dir: Option<PathBuf>,
    pub debug: bool,
}

impl ScanConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_html: PathBuf::from("face_report.html"),
            model: DetectionModel::default(),
            frame_scale: DEFAULT_FRAME_SCALE,
            frame_sampling_interval: DEFAULT_FRAME_SAMPLING_INTERVAL,
            comparison_tolerance: DEFAULT_TOLERANCE,
            extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            model_dir: None,
            debug: false,
        }
    }

    /// Checks every value before any model is loaded or file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input_dir.is_dir() {
            return Err(ConfigError::InputDirNotFound(self.input_dir.clone()));
        }
        if !self.comparison_tolerance.is_finite() || self.comparison_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.comparison_tolerance));
        }
        // NaN fails both comparisons
        if !(self.frame_scale > 0.0 && self.frame_scale <= 1.0) {
            return Err(ConfigError::InvalidScale(self.frame_scale));
        }
        if self.frame_sampling_interval == 0 {
            return Err(ConfigError::InvalidSamplingInterval(
                self.frame_sampling_interval,
            ));
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::NoExtensions);
        }
        Ok(())
    }

    /// Where annotated frames go when `debug` is on.
    pub fn debug_dir(&self) -> Option<&Path> {
        self.debug.then_some(Path::new(DEBUG_FRAMES_DIR))
    }

    /// One-line parameter summary printed before a run.
    pub fn banner(&self) -> String {
        format!(
            "Parameters: model={}, scale={}, skip frames={}, tolerance={}",
            self.model, self.frame_scale, self.frame_sampling_interval, self.comparison_tolerance
        )
    }
}
