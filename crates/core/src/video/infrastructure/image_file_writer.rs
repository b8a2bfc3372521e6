use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Writes RGB frames with the `image` crate.
///
/// `.jpg`/`.jpeg` paths go through the JPEG encoder at the configured
/// quality; anything else is left to `image`'s extension detection.
pub struct ImageFileWriter {
    jpeg_quality: u8,
}

impl ImageFileWriter {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("frame is not packed RGB")?;

        if is_jpeg(path) {
            let mut out = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut out, self.jpeg_quality).encode_image(&img)?;
        } else {
            img.save(path)?;
        }
        Ok(())
    }
}
