//! Loading scene documents and engine settings from disk.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use scenery_core::EngineConfig;
use scenery_ir::{RawScene, RawTimeline};

/// A parsed input document: one scene, or a timeline of scenes.
pub enum Document {
    Scene(RawScene),
    Timeline(RawTimeline),
}

impl Document {
    /// Documents with a `scenes` array are timelines; anything else is read
    /// as a single scene.
    pub fn from_value(value: Value) -> Result<Self> {
        let is_timeline = value.get("scenes").is_some_and(Value::is_array);
        if is_timeline {
            let timeline = serde_json::from_value(value).context("invalid timeline document")?;
            Ok(Document::Timeline(timeline))
        } else {
            let scene = serde_json::from_value(value).context("invalid scene document")?;
            Ok(Document::Scene(scene))
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&source)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        Self::from_value(value)
    }
}

/// Read `scenery.toml` from `path`, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::load_from_file(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detects_timeline_documents() {
        let doc = Document::from_value(json!({"scenes": [{"id": "a", "duration": 1.0}]})).unwrap();
        assert!(matches!(doc, Document::Timeline(t) if t.scenes.len() == 1));

        let doc = Document::from_value(json!({"id": "a", "duration": 1.0})).unwrap();
        assert!(matches!(doc, Document::Scene(s) if s.id == "a"));
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let missing = std::env::temp_dir().join("scenery-cli-missing-config.toml");
        assert!(load_config(Some(&missing)).is_err());
        assert!(load_config(None).is_ok());
    }
}
