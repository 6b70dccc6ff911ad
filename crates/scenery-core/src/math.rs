use serde::{Deserialize, Serialize};

/// Round a pixel coordinate half-to-even, the way every placement in the
/// resolver rounds.
pub fn round_px(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// `max(lo, min(hi, v))`. Unlike [`i32::clamp`] this never panics when
/// `lo > hi`; the lower bound wins.
pub fn clamp_px(v: i32, lo: i32, hi: i32) -> i32 {
    v.min(hi).max(lo)
}

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Compute the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

/// An axis-aligned rectangle `(x, y, width, height)` in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from loosely-typed numbers, rounding each component.
    ///
    /// Returns `None` unless exactly four finite values are given.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, w, h] if values.iter().all(|v| v.is_finite()) => Some(Self::new(
                round_px(*x),
                round_px(*y),
                round_px(*w),
                round_px(*h),
            )),
            _ => None,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Both dimensions strictly positive.
    pub fn is_positive(&self) -> bool {
        self.size().is_positive()
    }

    /// Whether `other` lies entirely within this rect (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_px_ties_to_even() {
        assert_eq!(round_px(2.5), 2);
        assert_eq!(round_px(3.5), 4);
        assert_eq!(round_px(-0.5), 0);
        assert_eq!(round_px(96.0), 96);
    }

    #[test]
    fn test_clamp_px_lower_bound_wins() {
        assert_eq!(clamp_px(5, 0, 10), 5);
        assert_eq!(clamp_px(-3, 0, 10), 0);
        assert_eq!(clamp_px(96, 0, -80), 0);
    }

    #[test]
    fn test_rect_from_slice() {
        let r = Rect::from_slice(&[160.0, 220.4, 800.0, 180.6]).unwrap();
        assert_eq!(r, Rect::new(160, 220, 800, 181));
        assert!(Rect::from_slice(&[1.0, 2.0, 3.0]).is_none());
        assert!(Rect::from_slice(&[1.0, 2.0, f64::NAN, 4.0]).is_none());
    }

    #[test]
    fn test_size_aspect_ratio() {
        let s = Size::new(1920, 1080);
        assert!((s.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);
        assert_eq!(Size::new(10, 0).aspect_ratio(), 0.0);
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0, 0, 100, 100);
        assert!(outer.contains_rect(&Rect::new(10, 10, 90, 90)));
        assert!(!outer.contains_rect(&Rect::new(10, 10, 91, 90)));
    }
}
