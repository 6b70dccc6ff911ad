//! # scenery-text
//!
//! Text fit and flow for scenery: measures text through a pluggable
//! [`TextMeasurer`], pads blocks against glyph clipping, shrinks overflowing
//! blocks toward a minimum font size and stacks structured lines with
//! staggered reveal times.

pub mod element;
pub mod engine;
pub mod fit;
pub mod flow;
pub mod measure;
pub mod role;
pub mod template;

pub use element::Payload;
pub use engine::{place_block, CaptionPlate, TextEngine, TextPlacement};
pub use fit::{FitOptions, Overflow};
pub use flow::{FlowLine, FlowOptions, StructuredFlow};
pub use measure::{
    baseline_pad_from_metrics, wrap_lines, ApproxMeasurer, Padding, TextBlock, TextMeasurer,
    TextMode, DEFAULT_BASELINE_FUDGE,
};
pub use role::TextRole;
pub use template::{ElementLayout, TemplateSpec};
