use std::path::PathBuf;

/// Stream properties reported when a video is opened.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Container estimate; zero when the container does not say.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Number of frames the sampler would pick, if the frame count is known.
    pub fn expected_samples(&self, interval: usize) -> Option<usize> {
        if self.total_frames == 0 || interval == 0 {
            return None;
        }
        Some(self.total_frames / interval)
    }
}
