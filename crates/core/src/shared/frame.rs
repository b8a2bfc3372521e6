use ndarray::ArrayView3;

use crate::shared::region::Region;

/// A single decoded video frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Zero-based position of the frame in decode order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixels covered by `region` into a new frame.
    ///
    /// The region is clamped to the frame first. Returns `None` when
    /// nothing of it lies inside the frame.
    pub fn crop(&self, region: &Region) -> Option<Frame> {
        let r = region.clamped(self.width, self.height)?;
        let x1 = r.x as usize;
        let y1 = r.y as usize;
        let w = r.width as usize;
        let h = r.height as usize;
        let channels = self.channels as usize;
        let row_len = self.width as usize * channels;

        let mut data = Vec::with_capacity(w * h * channels);
        for row in y1..y1 + h {
            let start = row * row_len + x1 * channels;
            data.extend_from_slice(&self.data[start..start + w * channels]);
        }

        Some(Frame::new(data, w as u32, h as u32, self.channels, self.index))
    }

    /// Returns a copy scaled by `factor` in both dimensions (bilinear).
    ///
    /// A factor of 1.0 returns an identical clone. Dimensions never drop
    /// below one pixel.
    pub fn scaled(&self, factor: f64) -> Frame {
        if (factor - 1.0).abs() < f64::EPSILON || self.channels != 3 {
            return self.clone();
        }
        let new_w = ((self.width as f64 * factor).round() as u32).max(1);
        let new_h = ((self.height as f64 * factor).round() as u32).max(1);

        let Some(img) = image::RgbImage::from_raw(self.width, self.height, self.data.clone())
        else {
            return self.clone();
        };
        let resized =
            image::imageops::resize(&img, new_w, new_h, image::imageops::FilterType::Triangle);
        Frame::new(resized.into_raw(), new_w, new_h, 3, self.index)
    }

    /// Draws an unfilled rectangle outline, clipped to the frame.
    pub fn outline(&mut self, region: &Region, color: [u8; 3], thickness: i32) {
        let channels = self.channels as usize;
        if channels < 3 {
            return;
        }
        let fw = self.width as i32;
        let fh = self.height as i32;
        let x2 = region.x + region.width - 1;
        let y2 = region.y + region.height - 1;

        for y in region.y..=y2 {
            for x in region.x..=x2 {
                if x < 0 || y < 0 || x >= fw || y >= fh {
                    continue;
                }
                let on_edge = x < region.x + thickness
                    || x > x2 - thickness
                    || y < region.y + thickness
                    || y > y2 - thickness;
                if !on_edge {
                    continue;
                }
                let offset = (y as usize * self.width as usize + x as usize) * channels;
                self.data[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(w: u32, h: u32) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        Frame::new(data, w, h, 3, 7)
    }

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region {
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12];
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_crop_copies_region_pixels() {
        let frame = gradient_frame(10, 10);
        let crop = frame.crop(&region(2, 3, 4, 5)).unwrap();
        assert_eq!(crop.width(), 4);
        assert_eq!(crop.height(), 5);
        assert_eq!(crop.index(), 7);
        let arr = crop.as_ndarray();
        assert_eq!(arr[[0, 0, 0]], 2);
        assert_eq!(arr[[0, 0, 1]], 3);
        assert_eq!(arr[[4, 3, 0]], 5);
        assert_eq!(arr[[4, 3, 1]], 7);
    }

    #[test]
    fn test_crop_clamps_to_frame() {
        let frame = gradient_frame(10, 10);
        let crop = frame.crop(&region(7, 8, 6, 6)).unwrap();
        assert_eq!(crop.width(), 3);
        assert_eq!(crop.height(), 2);
    }

    #[test]
    fn test_crop_outside_frame_is_none() {
        let frame = gradient_frame(10, 10);
        assert!(frame.crop(&region(20, 20, 5, 5)).is_none());
        assert!(frame.crop(&region(2, 2, 0, 4)).is_none());
    }

    #[test]
    fn test_scaled_halves_dimensions() {
        let frame = gradient_frame(40, 20);
        let small = frame.scaled(0.5);
        assert_eq!(small.width(), 20);
        assert_eq!(small.height(), 10);
        assert_eq!(small.index(), 7);
        assert_eq!(small.data().len(), 20 * 10 * 3);
    }

    #[test]
    fn test_scaled_identity_factor_keeps_pixels() {
        let frame = gradient_frame(8, 8);
        let same = frame.scaled(1.0);
        assert_eq!(same.data(), frame.data());
    }

    #[test]
    fn test_scaled_never_collapses_to_zero() {
        let frame = gradient_frame(3, 3);
        let tiny = frame.scaled(0.01);
        assert_eq!(tiny.width(), 1);
        assert_eq!(tiny.height(), 1);
    }

    #[test]
    fn test_outline_paints_border_only() {
        let mut frame = Frame::new(vec![0u8; 10 * 10 * 3], 10, 10, 3, 0);
        frame.outline(&region(2, 2, 6, 6), [0, 255, 0], 2);
        let arr = frame.as_ndarray();
        // Border pixel
        assert_eq!(arr[[2, 2, 1]], 255);
        assert_eq!(arr[[3, 7, 1]], 255);
        // Interior pixel
        assert_eq!(arr[[5, 5, 1]], 0);
        // Outside pixel
        assert_eq!(arr[[0, 0, 1]], 0);
    }

    #[test]
    fn test_outline_clips_at_frame_edge() {
        let mut frame = Frame::new(vec![0u8; 4 * 4 * 3], 4, 4, 3, 0);
        frame.outline(&region(-2, -2, 10, 10), [255, 0, 0], 1);
        // Nothing of the 1px border lands inside the frame
        assert!(frame.data().iter().all(|&b| b == 0));
    }
}
