//! Single-block shrink-to-fit.
//!
//! Overflowing blocks are rescaled as a whole, like a bitmap: the text is not
//! re-wrapped at the smaller size. The rescale never goes below the minimum
//! font size, so a block may still overflow afterwards; that is reported as
//! [`Diagnostic::ShrinkFloor`] and left as is.

use serde::{Deserialize, Serialize};

use scenery_core::{Diagnostic, Diagnostics, Resolved, Size};
use scenery_ir::Style;

use crate::engine::{TextEngine, TextPlacement};
use crate::template::ElementLayout;

/// What to do with a block taller than its allowed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Keep the block at its measured size.
    None,
    #[default]
    Shrink,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitOptions {
    /// Cap the allowed height at this many lines.
    pub max_lines: Option<u32>,
    pub overflow: Overflow,
    /// Overrides the configured minimum font size.
    pub min_font_size: Option<f64>,
    pub duration: Option<f64>,
}

impl TextEngine<'_> {
    /// Height the block may occupy: the rect height, capped by `max_lines`
    /// worth of lines plus padding when given.
    pub fn allowed_height(&self, element: &ElementLayout, style: &Style, max_lines: Option<u32>) -> i32 {
        let rect_h = element.rect.height;
        match max_lines.filter(|&n| n > 0) {
            Some(n) => {
                let px = element.font_size;
                let line_h = px + style.interline as f64;
                let capped = style.top_pad_pct * px + n as f64 * line_h + style.baseline_pad_pct * px;
                rect_h.min(capped as i32)
            }
            None => rect_h,
        }
    }

    /// Measure `text`, shrink it into the allowed height and place it in the
    /// element rect.
    pub fn fit_wrapped(
        &self,
        element: &ElementLayout,
        text: &str,
        style: &Style,
        options: &FitOptions,
    ) -> Resolved<TextPlacement> {
        let px = element.font_size;
        let block = self.measure_block(text, element.rect.width, px, style);
        let allowed = self.allowed_height(element, style, options.max_lines);
        let min_font_size = options.min_font_size.unwrap_or(self.config().min_font_size);

        let mut diagnostics = Diagnostics::new();
        let mut size = Size::new(block.width, block.height);
        let mut scale = 1.0;

        if options.overflow == Overflow::Shrink && block.height > allowed {
            scale = allowed as f64 / block.height as f64;
            if px * scale < min_font_size {
                scale = min_font_size / px;
            }
            size = Size::new(scaled(block.width, scale), scaled(block.height, scale));
            tracing::debug!(
                "{}: shrinking {}px block to {}px (scale {:.3})",
                element.id,
                block.height,
                size.height,
                scale
            );

            if size.height > allowed {
                let d = Diagnostic::ShrinkFloor {
                    element: element.id.clone(),
                    font_size: px,
                    min_font_size,
                    overflow: size.height - allowed,
                };
                tracing::warn!("{}", d);
                diagnostics.push(d);
            }
        }

        let (rect, plate) = self.place(element, size, style, element.is_caption());
        let placement = TextPlacement {
            element: element.id.clone(),
            rect,
            plate,
            h_align: element.align,
            v_align: element.v_align(),
            scale,
            font_size: px * scale,
            mode: Some(block.mode),
            lines: block.lines,
            opacity: style.opacity,
            duration: options.duration,
        };
        Resolved::new(placement, diagnostics)
    }
}

/// `⌊v × scale⌋`, at least 1. The epsilon keeps `h × (allowed / h)` from
/// landing one pixel short of `allowed`.
fn scaled(v: i32, scale: f64) -> i32 {
    ((v as f64 * scale + 1e-9).floor() as i32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{ApproxMeasurer, TextMode};
    use scenery_core::{HAlign, Rect, VAlign};

    fn element(id: &str, rect: Rect, font_size: f64) -> ElementLayout {
        ElementLayout::new(id, rect, HAlign::Left, font_size)
    }

    #[test]
    fn test_allowed_height_with_max_lines() {
        let m = ApproxMeasurer::default();
        let engine = TextEngine::new(&m);
        let el = element("heading_h1", Rect::new(0, 0, 800, 400), 50.0);
        let style = Style::default();
        // 0.1×50 + 2×(50+4) + 0.32×50 = 5 + 108 + 16
        assert_eq!(engine.allowed_height(&el, &style, Some(2)), 129);
        assert_eq!(engine.allowed_height(&el, &style, Some(0)), 400);
        assert_eq!(engine.allowed_height(&el, &style, Some(20)), 400);
    }

    #[test]
    fn test_fitting_block_is_untouched() {
        let m = ApproxMeasurer::monospace();
        let engine = TextEngine::new(&m);
        let el = element("heading_h2", Rect::new(100, 100, 800, 200), 50.0);
        let placed = engine
            .fit_wrapped(&el, "Hello Rust", &Style::default(), &FitOptions::default())
            .into_value();
        assert_eq!(placed.rect, Rect::new(100, 100, 300, 81));
        assert!((placed.scale - 1.0).abs() < 1e-9);
        assert_eq!(placed.mode, Some(TextMode::Label));
        assert_eq!(placed.v_align, VAlign::Top);
    }

    #[test]
    fn test_shrinks_to_allowed_height() {
        let m = ApproxMeasurer::monospace();
        let engine = TextEngine::new(&m);
        // 81px tall block into a 54px rect: scale 2/3, font 33.3px > 18px
        let el = element("heading_h2", Rect::new(0, 0, 800, 54), 50.0);
        let resolved = engine.fit_wrapped(&el, "Hello Rust", &Style::default(), &FitOptions::default());
        assert!(resolved.diagnostics.is_empty());
        let placed = resolved.value;
        assert!((placed.scale - 54.0 / 81.0).abs() < 1e-9);
        assert_eq!(placed.rect.height, 54);
        assert_eq!(placed.rect.width, 200);
    }

    #[test]
    fn test_shrink_stops_at_min_font_size() {
        let m = ApproxMeasurer::monospace();
        let engine = TextEngine::new(&m);
        let el = element("heading_h2", Rect::new(0, 0, 800, 20), 50.0);
        let resolved = engine.fit_wrapped(&el, "Hello Rust", &Style::default(), &FitOptions::default());
        let placed = &resolved.value;
        assert!((placed.scale - 18.0 / 50.0).abs() < 1e-9);
        assert!(placed.font_size >= 18.0 - 1e-9);
        // 81 × 0.36 = 29.16 → 29px, 9px over the 20px rect
        assert_eq!(placed.rect.height, 29);
        match resolved.diagnostics.iter().next() {
            Some(Diagnostic::ShrinkFloor { overflow, .. }) => assert_eq!(*overflow, 9),
            other => panic!("expected shrink floor diagnostic, got {other:?}"),
        };
    }

    #[test]
    fn test_overflow_none_keeps_size() {
        let m = ApproxMeasurer::monospace();
        let engine = TextEngine::new(&m);
        let el = element("heading_h2", Rect::new(0, 0, 800, 20), 50.0);
        let options = FitOptions {
            overflow: Overflow::None,
            ..Default::default()
        };
        let placed = engine
            .fit_wrapped(&el, "Hello Rust", &Style::default(), &options)
            .into_value();
        assert_eq!(placed.rect.height, 81);
    }

    #[test]
    fn test_caption_gets_plate_and_bottom_alignment() {
        let m = ApproxMeasurer::monospace();
        let engine = TextEngine::new(&m);
        let el = ElementLayout::new("captions", Rect::new(160, 880, 1600, 140), HAlign::Center, 50.0);
        let placed = engine
            .fit_wrapped(&el, "Hello Rust", &Style::default(), &FitOptions::default())
            .into_value();
        let plate = placed.plate.expect("captions get a plate");
        assert_eq!(plate.pad, 14);
        assert!((plate.opacity - 0.65).abs() < 1e-9);
        // plate 328×109: centered horizontally, flush with the rect bottom
        assert_eq!(plate.rect, Rect::new(796, 911, 328, 109));
        assert_eq!(placed.rect, Rect::new(810, 925, 300, 81));
    }
}
