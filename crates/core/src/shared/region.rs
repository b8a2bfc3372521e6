/// Axis-aligned face bounding box in pixel coordinates of some frame.
///
/// Coordinates may extend past the frame; consumers clamp when they
/// touch pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Builds a region from corner coordinates `[x1, y1, x2, y2]`.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let x = x1.round() as i32;
        let y = y1.round() as i32;
        Self {
            x,
            y,
            width: (x2.round() as i32 - x).max(0),
            height: (y2.round() as i32 - y).max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Maps the region from a scaled frame back to the original one.
    ///
    /// `factor` is the scale that was applied to the frame, so every
    /// coordinate is divided by it and truncated toward zero.
    pub fn unscaled(&self, factor: f64) -> Region {
        let inv = 1.0 / factor;
        let x1 = (self.x as f64 * inv) as i32;
        let y1 = (self.y as f64 * inv) as i32;
        let x2 = ((self.x + self.width) as f64 * inv) as i32;
        let y2 = ((self.y + self.height) as f64 * inv) as i32;
        Region {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Grows the region by `ratio` of its size on every side.
    ///
    /// Padding per side is `(size as f64 * ratio) as i32`, so 0.5 adds
    /// half the height above and below and half the width left and right.
    pub fn padded(&self, ratio: f64) -> Region {
        let pad_x = (self.width as f64 * ratio) as i32;
        let pad_y = (self.height as f64 * ratio) as i32;
        Region {
            x: self.x - pad_x,
            y: self.y - pad_y,
            width: self.width + 2 * pad_x,
            height: self.height + 2 * pad_y,
        }
    }

    /// Smallest square sharing the region's center that covers it.
    pub fn squared(&self) -> Region {
        let side = self.width.max(self.height);
        let cx = self.x + self.width / 2;
        let cy = self.y + self.height / 2;
        Region {
            x: cx - side / 2,
            y: cy - side / 2,
            width: side,
            height: side,
        }
    }

    /// Intersects the region with a `frame_w` x `frame_h` frame.
    ///
    /// Returns `None` if the intersection is empty.
    pub fn clamped(&self, frame_w: u32, frame_h: u32) -> Option<Region> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_w as i32);
        let y2 = (self.y + self.height).min(frame_h as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Region {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        })
    }

    /// Corner form `[x1, y1, x2, y2]`.
    pub fn corners(&self) -> [f64; 4] {
        [
            self.x as f64,
            self.y as f64,
            (self.x + self.width) as f64,
            (self.y + self.height) as f64,
        ]
    }
}
