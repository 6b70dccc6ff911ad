//! Safe-area clamping, aspect-preserving placement and anchor math.
//!
//! Every function here is pure: it translates or sizes rectangles and never
//! looks at pixels.

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasMeta;
use crate::diagnostics::Diagnostic;
use crate::math::{clamp_px, round_px, Point, Rect, Size};

/// Upscale ratio above which [`check_upscale`] reports a diagnostic.
pub const DEFAULT_UPSCALE_LIMIT: f64 = 1.5;

/// How content is sized into a destination rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Entire content visible, may leave empty margin.
    #[default]
    Fit,
    /// Content fills the destination, may overflow it.
    Cover,
}

impl FitMode {
    /// Parse a mode name; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" | "contain" => Some(FitMode::Fit),
            "cover" => Some(FitMode::Cover),
            _ => None,
        }
    }

    /// Parse a mode name, falling back to [`FitMode::Fit`].
    pub fn parse_or_fit(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Some(HAlign::Left),
            "center" | "centre" => Some(HAlign::Center),
            "right" => Some(HAlign::Right),
            _ => None,
        }
    }
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Some(VAlign::Top),
            "center" | "middle" => Some(VAlign::Center),
            "bottom" => Some(VAlign::Bottom),
            _ => None,
        }
    }
}

/// Translate `rect` into the title-safe box of `meta` without resizing it.
///
/// A rect wider (or taller) than the safe box is pinned to the safe edge and
/// then kept inside the canvas, so it may cross the safe margin. Pass
/// [`CanvasMeta::action_safe`] to clamp against the action-safe box.
pub fn snap_to_safe(rect: Rect, meta: &CanvasMeta) -> Rect {
    let safe = meta.safe_box();

    let x = if rect.width > safe.width() {
        clamp_px(safe.left, 0, meta.width.saturating_sub(rect.width))
    } else {
        clamp_px(rect.x, safe.left, safe.right.saturating_sub(rect.width))
    };

    let y = if rect.height > safe.height() {
        clamp_px(safe.top, 0, meta.height.saturating_sub(rect.height))
    } else {
        clamp_px(rect.y, safe.top, safe.bottom.saturating_sub(rect.height))
    };

    Rect::new(x, y, rect.width, rect.height)
}

/// Size `src` into `dst` preserving its aspect ratio and center it there.
///
/// `Cover` results may extend past `dst`; cropping is left to the renderer.
/// Degenerate inputs give a zero-size rect at the destination origin.
pub fn fit_into_rect(src: Size, dst: Rect, mode: FitMode) -> Rect {
    if !src.is_positive() || !dst.is_positive() {
        return Rect::new(dst.x, dst.y, 0, 0);
    }

    let sx = dst.width as f64 / src.width as f64;
    let sy = dst.height as f64 / src.height as f64;
    let scale = match mode {
        FitMode::Fit => sx.min(sy),
        FitMode::Cover => sx.max(sy),
    };

    let w = src.width as f64 * scale;
    let h = src.height as f64 * scale;
    let x = dst.x as f64 + (dst.width as f64 - w) / 2.0;
    let y = dst.y as f64 + (dst.height as f64 - h) / 2.0;

    Rect::new(
        round_px(x),
        round_px(y),
        round_px(w).max(1),
        round_px(h).max(1),
    )
}

/// Reference point inside `dst`: the horizontal anchor for `align` and the
/// vertical center.
///
/// For an element of width `w`, its left edge is the anchor for `Left`,
/// `anchor - w/2` for `Center` and `anchor - w` for `Right`; see
/// [`anchor_rect`].
pub fn place_in_rect(dst: Rect, align: HAlign) -> Point {
    let cy = round_px(dst.y as f64 + dst.height as f64 / 2.0);
    let ax = match align {
        HAlign::Left => dst.x,
        HAlign::Center => round_px(dst.x as f64 + dst.width as f64 / 2.0),
        HAlign::Right => dst.x + dst.width,
    };
    Point::new(ax, cy)
}

/// Rect of an element of `size` anchored in `dst` by [`place_in_rect`],
/// vertically centered.
pub fn anchor_rect(dst: Rect, size: Size, align: HAlign) -> Rect {
    let anchor = place_in_rect(dst, align);
    let x = match align {
        HAlign::Left => anchor.x,
        HAlign::Center => anchor.x - size.width.div_euclid(2),
        HAlign::Right => anchor.x - size.width,
    };
    let y = anchor.y - size.height.div_euclid(2);
    Rect::new(x, y, size.width, size.height)
}

/// `max(dst.w / src.w, dst.h / src.h)`, or `None` for degenerate inputs.
pub fn upscale_factor(src: Size, dst: Rect) -> Option<f64> {
    if !src.is_positive() || !dst.is_positive() {
        return None;
    }
    let sx = dst.width as f64 / src.width as f64;
    let sy = dst.height as f64 / src.height as f64;
    Some(sx.max(sy))
}

/// Advisory check: a [`Diagnostic::Upscale`] when `src` is blown up past
/// `limit` to reach `dst`.
pub fn check_upscale(src: Size, dst: Rect, limit: f64) -> Option<Diagnostic> {
    let factor = upscale_factor(src, dst)?;
    (factor > limit).then_some(Diagnostic::Upscale {
        factor,
        limit,
        source: src,
        target: dst,
    })
}

/// Shrink `size` proportionally until it fits inside `dst`. Content that
/// already fits is returned unchanged; nothing is ever enlarged.
pub fn downscale_to_fit(size: Size, dst: Rect) -> Size {
    if !dst.is_positive() || (size.width <= dst.width && size.height <= dst.height) {
        return size;
    }
    let scale = (size.width as f64 / dst.width as f64).max(size.height as f64 / dst.height as f64);
    Size::new(
        (size.width as f64 / scale) as i32,
        (size.height as f64 / scale) as i32,
    )
}
