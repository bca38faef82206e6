use serde::{Deserialize, Serialize};

/// A rectangle in root window pixel coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        let max_x = self.x + self.w as i32;
        let max_y = self.y + self.h as i32;
        (self.x <= x && x < max_x) && (self.y <= y && y < max_y)
    }

    /// The rectangle with the given gutter removed from each edge.
    #[must_use]
    pub fn shrink_by(&self, gutter: &Gutter) -> Self {
        Self {
            x: self.x + gutter.left as i32,
            y: self.y + gutter.top as i32,
            w: self.w.saturating_sub(gutter.left + gutter.right),
            h: self.h.saturating_sub(gutter.top + gutter.bottom),
        }
    }

    /// Swap the x axis with the y axis.
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            w: self.h,
            h: self.w,
        }
    }

    /// Express this rectangle as a fraction of `outer`.
    #[must_use]
    pub fn to_rational(&self, outer: &Rect) -> RationalRect {
        let (ow, oh) = (f64::from(outer.w.max(1)), f64::from(outer.h.max(1)));
        RationalRect {
            x: f64::from(self.x - outer.x) / ow,
            y: f64::from(self.y - outer.y) / oh,
            w: f64::from(self.w) / ow,
            h: f64::from(self.h) / oh,
        }
    }
}

/// A rectangle expressed as a fraction of its screen, each field in `[0, 1]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RationalRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RationalRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Scale into concrete pixel coordinates within `outer`.
    #[must_use]
    pub fn to_rect(&self, outer: &Rect) -> Rect {
        Rect {
            x: outer.x + (self.x * f64::from(outer.w)) as i32,
            y: outer.y + (self.y * f64::from(outer.h)) as i32,
            w: (self.w * f64::from(outer.w)) as u32,
            h: (self.h * f64::from(outer.h)) as u32,
        }
    }

    /// Shift by a fraction of the screen, keeping the size.
    #[must_use]
    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Grow by a fraction of the screen, keeping the origin.
    #[must_use]
    pub fn resized(&self, dw: f64, dh: f64) -> Self {
        Self {
            w: (self.w + dw).max(0.05),
            h: (self.h + dh).max(0.05),
            ..*self
        }
    }
}

impl Default for RationalRect {
    fn default() -> Self {
        // Centered, a quarter of the screen.
        Self::new(0.25, 0.25, 0.5, 0.5)
    }
}

/// Per-edge pixel offsets reserved at the border of a screen.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gutter {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Gutter {
    #[must_use]
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_by_removes_each_edge() {
        let rect = Rect::new(0, 0, 1920, 1080);
        let gutter = Gutter::new(20, 0, 5, 5);
        assert_eq!(rect.shrink_by(&gutter), Rect::new(5, 20, 1910, 1060));
    }

    #[test]
    fn transposed_swaps_axes() {
        let rect = Rect::new(10, 20, 300, 400);
        assert_eq!(rect.transposed(), Rect::new(20, 10, 400, 300));
        assert_eq!(rect.transposed().transposed(), rect);
    }

    #[test]
    fn rational_roundtrip_preserves_geometry() {
        let outer = Rect::new(0, 0, 1920, 1080);
        let inner = Rect::new(480, 270, 960, 540);
        assert_eq!(inner.to_rational(&outer).to_rect(&outer), inner);
    }

    #[test]
    fn rational_scales_into_offset_screens() {
        let outer = Rect::new(1920, 0, 1280, 1024);
        let rect = RationalRect::new(0.25, 0.25, 0.5, 0.5).to_rect(&outer);
        assert_eq!(rect, Rect::new(2240, 256, 640, 512));
    }
}
