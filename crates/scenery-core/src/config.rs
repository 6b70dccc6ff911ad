use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::canvas::CanvasMeta;
use crate::error::{SceneError, SceneResult};
use crate::geometry::DEFAULT_UPSCALE_LIMIT;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Upscale ratio above which an upscale diagnostic is reported.
    pub upscale_limit: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            upscale_limit: DEFAULT_UPSCALE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    pub min_font_size: f64,
    /// Seconds between the reveal of consecutive structured lines.
    pub stagger: f64,
    pub caption_pad: i32,
    pub caption_opacity: f64,
    /// Single-line texts longer than this many characters are wrapped.
    pub wrap_threshold: usize,
    /// Default gap between structured lines as a fraction of the font size.
    pub line_gap_pct: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_font_size: 18.0,
            stagger: 0.25,
            caption_pad: 14,
            caption_opacity: 0.65,
            wrap_threshold: 22,
            line_gap_pct: 0.25,
        }
    }
}

/// Engine settings, usually read from `scenery.toml`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub canvas: CanvasMeta,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub text: TextConfig,
}

impl EngineConfig {
    pub fn load_from_file(path: &Path) -> SceneResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> SceneResult<Self> {
        let config: EngineConfig =
            toml::from_str(contents).map_err(|e| SceneError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> SceneResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| SceneError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> SceneResult<()> {
        self.canvas.validate()?;
        if !(self.layout.upscale_limit > 0.0) {
            return Err(SceneError::Config(format!(
                "layout.upscale_limit must be positive, got {}",
                self.layout.upscale_limit
            )));
        }
        if !(self.text.min_font_size > 0.0) {
            return Err(SceneError::Config(format!(
                "text.min_font_size must be positive, got {}",
                self.text.min_font_size
            )));
        }
        if !(0.0..=1.0).contains(&self.text.caption_opacity) {
            return Err(SceneError::Config(format!(
                "text.caption_opacity must be in [0, 1], got {}",
                self.text.caption_opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config.canvas.width, 1920);
        assert_eq!(config.canvas.height, 1080);
        assert!((config.layout.upscale_limit - 1.5).abs() < 1e-9);
        assert!((config.text.min_font_size - 18.0).abs() < 1e-9);
        assert_eq!(config.text.wrap_threshold, 22);
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml(
            r#"
[canvas]
width = 1280
height = 720
font_type = "mono"

[text]
stagger = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config.canvas.width, 1280);
        assert!((config.canvas.title_area - 0.05).abs() < 1e-9);
        assert!((config.text.stagger - 0.5).abs() < 1e-9);
        assert_eq!(config.text.caption_pad, 14);
    }

    #[test]
    fn test_rejects_invalid_canvas() {
        let err = EngineConfig::from_toml("[canvas]\nwidth = 0\nheight = 720\n").unwrap_err();
        assert!(matches!(err, SceneError::InvalidCanvas(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = EngineConfig::from_toml("[layout\n").unwrap_err();
        assert!(matches!(err, SceneError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("scenery-config-{}.toml", std::process::id()));
        let mut config = EngineConfig::default();
        config.layout.upscale_limit = 2.0;
        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!((loaded.layout.upscale_limit - 2.0).abs() < 1e-9);
    }
}
