//! Structured multi-line flow: one block per line, stacked and revealed one
//! after another.

use serde::Serialize;

use scenery_core::{HAlign, Rect, Size, VAlign};
use scenery_ir::Style;

use crate::engine::{place_block, TextEngine};
use crate::template::ElementLayout;

#[derive(Debug, Clone, PartialEq)]
pub struct FlowOptions {
    /// Length of the whole flow in seconds.
    pub duration: f64,
    /// Delay between consecutive line reveals. Defaults to the configured
    /// stagger.
    pub stagger: Option<f64>,
    /// Vertical gap between lines. Defaults to `max(6, ⌊fs × line_gap_pct⌋)`.
    pub gap_px: Option<i32>,
    pub h_align: Option<HAlign>,
    /// Where the stack sits in the rect. Defaults to the top, whatever the
    /// element's role.
    pub v_align: Option<VAlign>,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            duration: 3.0,
            stagger: None,
            gap_px: None,
            h_align: None,
            v_align: None,
        }
    }
}

/// One line of a structured flow with its own time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLine {
    pub text: String,
    /// The line as set; more than one entry when the line itself wraps.
    pub lines: Vec<String>,
    pub rect: Rect,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredFlow {
    pub element: String,
    pub lines: Vec<FlowLine>,
    pub gap: i32,
    pub scale: f64,
    pub font_size: f64,
    pub total_height: i32,
    pub duration: f64,
}

impl TextEngine<'_> {
    /// Lay out `lines` top to bottom inside the element rect. When the stack
    /// is taller than the rect every line and the gap shrink by the same
    /// factor.
    pub fn flow_structured(
        &self,
        element: &ElementLayout,
        lines: &[String],
        style: &Style,
        options: &FlowOptions,
    ) -> StructuredFlow {
        let rect = element.rect;
        let px = element.font_size;
        let stagger = options.stagger.unwrap_or(self.config().stagger).max(0.0);
        let h_align = options.h_align.unwrap_or(element.align);
        let v_align = options.v_align.unwrap_or(VAlign::Top);

        let blocks: Vec<_> = lines
            .iter()
            .map(|line| self.measure_block(line, rect.width, px, style))
            .collect();
        let mut sizes: Vec<Size> = blocks.iter().map(|b| Size::new(b.width, b.height)).collect();
        let mut gap = options
            .gap_px
            .unwrap_or_else(|| ((px * self.config().line_gap_pct) as i32).max(6));

        let stack_height = |sizes: &[Size], gap: i32| -> i32 {
            let gaps = gap * (sizes.len() as i32 - 1).max(0);
            sizes.iter().map(|s| s.height).sum::<i32>() + gaps
        };

        let mut total = stack_height(&sizes, gap);
        let mut scale = 1.0;
        if total > rect.height && total > 0 {
            scale = rect.height as f64 / total as f64;
            for size in &mut sizes {
                size.width = ((size.width as f64 * scale) as i32).max(1);
                size.height = ((size.height as f64 * scale) as i32).max(1);
            }
            gap = (gap as f64 * scale) as i32;
            total = stack_height(&sizes, gap);
            tracing::debug!(
                "{}: {} lines scaled by {:.3} to fit {}px",
                element.id,
                lines.len(),
                scale,
                rect.height
            );
        }

        let mut y = place_block(rect, Size::new(0, total), HAlign::Left, v_align).y;
        let flow_lines = lines
            .iter()
            .zip(blocks)
            .zip(sizes)
            .enumerate()
            .map(|(i, ((text, block), size))| {
                let row = Rect::new(rect.x, y, rect.width, size.height);
                let origin = place_block(row, size, h_align, VAlign::Top);
                y += size.height + gap;
                let start = i as f64 * stagger;
                FlowLine {
                    text: text.clone(),
                    lines: block.lines,
                    rect: Rect::new(origin.x, origin.y, size.width, size.height),
                    start,
                    duration: (options.duration - start).max(0.001),
                }
            })
            .collect();

        StructuredFlow {
            element: element.id.clone(),
            lines: flow_lines,
            gap,
            scale,
            font_size: px * scale,
            total_height: total,
            duration: options.duration,
        }
    }
}
