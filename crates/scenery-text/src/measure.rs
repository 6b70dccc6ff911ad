//! Text measurement.
//!
//! Glyph rasterization happens outside this crate; layout only needs advance
//! widths and line heights, which hosts supply through [`TextMeasurer`].

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use scenery_core::FontType;
use scenery_ir::Style;

/// Added to the descent ratio by [`baseline_pad_from_metrics`].
pub const DEFAULT_BASELINE_FUDGE: f64 = 0.06;

/// Font metrics provider.
pub trait TextMeasurer {
    /// Horizontal advance of `text` set on one line at `font_size` px.
    fn advance(&self, text: &str, font_size: f64) -> f64;

    /// Distance between consecutive baselines, without extra interline.
    fn line_height(&self, font_size: f64) -> f64;
}

/// Metric-free estimator: every terminal column is a fixed fraction of an em.
///
/// Good enough for previews and tests; hosts with real fonts should plug in
/// their own [`TextMeasurer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxMeasurer {
    /// Advance of one column, in ems.
    pub column_em: f64,
    /// Line height, in ems.
    pub line_em: f64,
}

impl ApproxMeasurer {
    pub fn proportional() -> Self {
        Self {
            column_em: 0.55,
            line_em: 1.2,
        }
    }

    pub fn monospace() -> Self {
        Self {
            column_em: 0.6,
            line_em: 1.2,
        }
    }

    pub fn for_font_type(font_type: FontType) -> Self {
        match font_type {
            FontType::Sans => Self::proportional(),
            FontType::Mono => Self::monospace(),
        }
    }
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self::proportional()
    }
}

impl TextMeasurer for ApproxMeasurer {
    fn advance(&self, text: &str, font_size: f64) -> f64 {
        UnicodeWidthStr::width(text) as f64 * self.column_em * font_size
    }

    fn line_height(&self, font_size: f64) -> f64 {
        font_size * self.line_em
    }
}

/// How a block of text is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Broken into lines that fit the target width.
    Wrap,
    /// Lines kept exactly as written.
    Label,
}

/// Transparent padding added above and below every text block so ascenders
/// and descenders are never clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: i32,
    pub bottom: i32,
}

impl Padding {
    /// `top = max(2, ⌈fs × top_pad_pct⌉)`, `bottom = max(4, ⌈fs × baseline_pad_pct⌉)`.
    pub fn for_font(font_size: f64, style: &Style) -> Self {
        Self {
            top: ((font_size * style.top_pad_pct).ceil() as i32).max(2),
            bottom: ((font_size * style.baseline_pad_pct).ceil() as i32).max(4),
        }
    }

    pub fn total(&self) -> i32 {
        self.top + self.bottom
    }
}

/// A measured, padded block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub mode: TextMode,
    pub lines: Vec<String>,
    pub font_size: f64,
    pub width: i32,
    /// Height including [`TextBlock::padding`].
    pub height: i32,
    pub padding: Padding,
}

/// Greedily break `text` into lines no wider than `width`.
///
/// Explicit newlines always break. A single word wider than `width` is split
/// between characters.
pub fn wrap_lines(text: &str, width: f64, font_size: f64, measurer: &dyn TextMeasurer) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measurer.advance(&candidate, font_size) <= width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measurer.advance(word, font_size) <= width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    current.push(ch);
                    if current.chars().count() > 1 && measurer.advance(&current, font_size) > width {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }
        }
        lines.push(current);
    }
    lines
}

/// Suggested `baseline_pad_pct` for a font: its descent as a fraction of the
/// em, plus `fudge`. `None` when `units_per_em` is not positive.
pub fn baseline_pad_from_metrics(descent: f64, units_per_em: f64, fudge: f64) -> Option<f64> {
    (units_per_em > 0.0).then(|| descent.abs() / units_per_em + fudge)
}
