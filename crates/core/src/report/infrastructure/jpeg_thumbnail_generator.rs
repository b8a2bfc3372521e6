use std::io::Cursor;

use crate::report::domain::thumbnail_generator::ThumbnailGenerator;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::shared::thumbnail::Thumbnail;

/// Thumbnail edge length in pixels.
pub const THUMBNAIL_SIZE: u32 = 150;

/// Fraction of the face size added on each side before cropping, so the
/// thumbnail shows hair, forehead and chin.
pub const DEFAULT_PADDING: f64 = 0.5;

/// Crops a padded face region, resizes it to a fixed square and encodes
/// it as JPEG using the `image` crate.
pub struct JpegThumbnailGenerator {
    size: u32,
    padding: f64,
}

impl JpegThumbnailGenerator {
    pub fn new(size: u32, padding: f64) -> Self {
        Self { size, padding }
    }
}

impl Default for JpegThumbnailGenerator {
    fn default() -> Self {
        Self::new(THUMBNAIL_SIZE, DEFAULT_PADDING)
    }
}

impl ThumbnailGenerator for JpegThumbnailGenerator {
    fn crop_and_encode(&self, frame: &Frame, region: &Region) -> Option<Thumbnail> {
        if frame.channels() != 3 {
            return None;
        }
        let crop = frame.crop(&region.padded(self.padding))?;

        let img = image::RgbImage::from_raw(crop.width(), crop.height(), crop.data().to_vec())?;
        // Stretch to the square like the rest of the report expects
        let resized = image::imageops::resize(
            &img,
            self.size,
            self.size,
            image::imageops::FilterType::Triangle,
        );

        let mut jpeg = Vec::new();
        if let Err(e) = image::DynamicImage::ImageRgb8(resized)
            .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        {
            log::debug!("Thumbnail encoding failed: {e}");
            return None;
        }
        Some(Thumbnail::from_jpeg(jpeg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: u32, h: u32) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128]);
            }
        }
        Frame::new(data, w, h, 3, 0)
    }

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region {
            x,
            y,
            width: w,
            height: h,
        }
    }

    fn decode(thumb: &Thumbnail) -> image::DynamicImage {
        image::load_from_memory_with_format(thumb.jpeg_bytes(), image::ImageFormat::Jpeg).unwrap()
    }

    #[test]
    fn test_produces_square_jpeg() {
        let generator = JpegThumbnailGenerator::default();
        let thumb = generator
            .crop_and_encode(&frame(320, 240), &region(100, 80, 40, 60))
            .unwrap();
        // JPEG SOI marker
        assert_eq!(&thumb.jpeg_bytes()[..2], &[0xff, 0xd8]);
        let img = decode(&thumb);
        assert_eq!(img.width(), THUMBNAIL_SIZE);
        assert_eq!(img.height(), THUMBNAIL_SIZE);
    }

    #[test]
    fn test_region_at_frame_corner_is_clamped() {
        let generator = JpegThumbnailGenerator::new(32, 0.5);
        let thumb = generator.crop_and_encode(&frame(100, 100), &region(0, 0, 20, 20));
        assert!(thumb.is_some());
    }

    #[test]
    fn test_region_outside_frame_yields_none() {
        let generator = JpegThumbnailGenerator::default();
        assert!(generator
            .crop_and_encode(&frame(100, 100), &region(300, 300, 20, 20))
            .is_none());
    }

    #[test]
    fn test_degenerate_region_yields_none() {
        let generator = JpegThumbnailGenerator::default();
        assert!(generator
            .crop_and_encode(&frame(100, 100), &region(10, 10, 0, 0))
            .is_none());
    }

    #[test]
    fn test_custom_size() {
        let generator = JpegThumbnailGenerator::new(48, 0.0);
        let thumb = generator
            .crop_and_encode(&frame(100, 100), &region(10, 10, 30, 30))
            .unwrap();
        let img = decode(&thumb);
        assert_eq!((img.width(), img.height()), (48, 48));
    }
}
