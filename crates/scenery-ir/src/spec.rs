//! Typed, normalized element specs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use scenery_core::geometry::FitMode;
use scenery_core::{Color, ColorError, ColorValue, HAlign, Rect, Size};

use crate::probe::MediaKind;
use crate::role::Role;

/// Vertical position of the face line in presenter footage, as a fraction of
/// the frame height.
pub const DEFAULT_FACE_BIAS: f64 = 0.45;

/// Resolved placement of a graphic element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub rect: Rect,
    pub mode: FitMode,
    pub align: HAlign,
    pub rotation: f64,
    pub opacity: f64,
    pub snap_safe: bool,
}

impl Layout {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            mode: FitMode::Fit,
            align: HAlign::Center,
            rotation: 0.0,
            opacity: 1.0,
            snap_safe: true,
        }
    }
}

/// Source window of a video graphic, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trim {
    pub start: f64,
    pub duration: f64,
}

/// A normalized graphic element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicSpec {
    pub role: Role,
    pub src: Option<String>,
    pub color: Option<ColorValue>,
    pub layout: Layout,
    pub z_hint: i32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub trim: Option<Trim>,
    pub meta: Map<String, Value>,
}

impl GraphicSpec {
    /// Parse the flat fill color, if the graphic has one.
    pub fn resolve_color(&self) -> Option<Result<Color, ColorError>> {
        self.color.as_ref().map(ColorValue::resolve)
    }

    /// Media class of `src`, judged by its extension.
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.src.as_deref().and_then(MediaKind::from_path)
    }

    /// A color-only graphic is drawn as a flat shape.
    pub fn is_shape(&self) -> bool {
        self.src.is_none() && self.color.is_some()
    }
}

/// Forced text rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeHint {
    /// Width-constrained, multi-line.
    Wrap,
    /// Single block, lines kept as written.
    Label,
}

impl ModeHint {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" | "caption" => Some(ModeHint::Wrap),
            "label" => Some(ModeHint::Label),
            _ => None,
        }
    }
}

/// Text styling. Padding fractions are relative to the font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: ColorValue,
    pub stroke_color: ColorValue,
    pub stroke_width: f64,
    pub opacity: f64,
    pub pad: i32,
    pub interline: i32,
    pub baseline_pad_pct: f64,
    pub top_pad_pct: f64,
    pub mode_hint: Option<ModeHint>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: ColorValue::from("#ffffff"),
            stroke_color: ColorValue::from("#000000"),
            stroke_width: 0.0,
            opacity: 1.0,
            pad: 0,
            interline: 4,
            baseline_pad_pct: 0.32,
            top_pad_pct: 0.10,
            mode_hint: None,
        }
    }
}

/// Font file paths handed through to the glyph rasterizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    #[serde(default)]
    pub sans: Option<String>,
    #[serde(default)]
    pub mono: Option<String>,
}

/// Text content of a slot: one block, or structured lines revealed one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextPayload {
    Text(String),
    Lines(Vec<String>),
}

impl Default for TextPayload {
    fn default() -> Self {
        TextPayload::Text(String::new())
    }
}

impl TextPayload {
    pub fn is_structured(&self) -> bool {
        matches!(self, TextPayload::Lines(_))
    }

    /// The payload as a single block, structured lines joined by newlines.
    pub fn joined(&self) -> String {
        match self {
            TextPayload::Text(text) => text.clone(),
            TextPayload::Lines(lines) => lines.join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnterEffect {
    #[default]
    Fade,
    SlideUp,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitEffect {
    #[default]
    Fade,
    None,
}

/// Entrance/exit hints passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSpec {
    #[serde(alias = "enter_type", alias = "enterType")]
    pub enter: EnterEffect,
    #[serde(alias = "enter_dur", alias = "enterDuration")]
    pub enter_duration: f64,
    #[serde(alias = "exit_type", alias = "exitType")]
    pub exit: ExitEffect,
    #[serde(alias = "exit_dur", alias = "exitDuration")]
    pub exit_duration: f64,
    pub delay: f64,
}

impl Default for MotionSpec {
    fn default() -> Self {
        Self {
            enter: EnterEffect::Fade,
            enter_duration: 0.25,
            exit: ExitEffect::Fade,
            exit_duration: 0.20,
            delay: 0.0,
        }
    }
}

/// A normalized text slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub slot_id: String,
    pub style: Style,
    pub rect: Rect,
    pub fonts: Fonts,
    pub payload: TextPayload,
    pub motion: Option<MotionSpec>,
    pub layer: i32,
    pub align: HAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterShape {
    #[default]
    Circle,
    Rect,
}

/// A normalized presenter element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenterSpec {
    pub src: String,
    pub rect: Rect,
    pub shape: PresenterShape,
    pub layer: i32,
}

impl PresenterSpec {
    /// Diameter of the circular avatar drawn in `rect`.
    pub fn avatar_diameter(&self) -> i32 {
        self.rect.width.min(self.rect.height)
    }

    /// Square crop window inside footage of size `src`, horizontally centered
    /// and vertically centered on `face_bias × height` as far as the frame
    /// allows.
    pub fn square_crop(src: Size, face_bias: f64) -> Rect {
        let side = src.width.min(src.height).max(0);
        let x = (src.width - side) / 2;
        let y_center = src.height as f64 * face_bias;
        let y = (y_center - side as f64 / 2.0).min((src.height - side) as f64).max(0.0);
        Rect::new(x, y as i32, side, side)
    }
}

/// Scene background. At least one field is set once normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Background {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Background {
    pub fn is_valid(&self) -> bool {
        self.color.is_some() || self.video.is_some() || self.image.is_some()
    }

    pub fn resolve_color(&self) -> Option<Result<Color, ColorError>> {
        self.color.as_ref().map(ColorValue::resolve)
    }
}
