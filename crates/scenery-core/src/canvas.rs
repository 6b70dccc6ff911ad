use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::math::{round_px, Rect};

/// Font family used for text that does not request one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    #[default]
    Sans,
    Mono,
}

/// Canvas metadata shared by every scene of a timeline.
///
/// Safe areas are expressed as a fraction of each edge: a `title_area` of
/// `0.05` on a 1920×1080 canvas insets 96px horizontally and 54px vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasMeta {
    #[serde(default = "default_version")]
    pub version: String,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_title_area")]
    pub title_area: f64,
    #[serde(default = "default_action_area")]
    pub action_area: f64,
    #[serde(default)]
    pub font_type: FontType,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_title_area() -> f64 {
    0.05
}

fn default_action_area() -> f64 {
    0.025
}

impl CanvasMeta {
    /// Create canvas metadata with the default safe areas, validating the size.
    pub fn new(width: i32, height: i32) -> SceneResult<Self> {
        Self::with_safe_areas(width, height, default_title_area(), default_action_area())
    }

    /// Create canvas metadata with explicit safe-area fractions.
    pub fn with_safe_areas(
        width: i32,
        height: i32,
        title_area: f64,
        action_area: f64,
    ) -> SceneResult<Self> {
        let meta = Self {
            version: default_version(),
            width,
            height,
            title_area,
            action_area,
            font_type: FontType::Sans,
        };
        meta.validate()?;
        Ok(meta)
    }

    /// 1920×1080 with the default safe areas.
    pub fn hd() -> Self {
        Self {
            version: default_version(),
            width: 1920,
            height: 1080,
            title_area: default_title_area(),
            action_area: default_action_area(),
            font_type: FontType::Sans,
        }
    }

    pub fn with_font_type(mut self, font_type: FontType) -> Self {
        self.font_type = font_type;
        self
    }

    /// Check the canvas invariants. Deserialized metadata must pass this
    /// before it is used for layout.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SceneError::InvalidCanvas(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        for (name, value) in [
            ("title_area", self.title_area),
            ("action_area", self.action_area),
        ] {
            if !(0.0..0.5).contains(&value) {
                return Err(SceneError::InvalidCanvas(format!(
                    "{name} must be in [0, 0.5), got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Metadata whose title area equals the action area, so that the
    /// title-safe routines clamp against the action-safe box instead.
    pub fn action_safe(&self) -> Self {
        Self {
            title_area: self.action_area,
            ..self.clone()
        }
    }

    /// The whole canvas as a rect at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// The title-safe box.
    pub fn safe_box(&self) -> SafeBox {
        let left = round_px(self.width as f64 * self.title_area);
        let top = round_px(self.height as f64 * self.title_area);
        SafeBox {
            left,
            right: self.width - left,
            top,
            bottom: self.height - top,
        }
    }
}

impl Default for CanvasMeta {
    fn default() -> Self {
        Self::hd()
    }
}

/// Safe-box edges in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeBox {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl SafeBox {
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }
}
