//! Media probing seam.
//!
//! The normalizer never opens files. When a graphic's source size is not
//! given inline it asks a [`MediaProber`] supplied by the host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use scenery_core::Size;

/// Media class of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Svg,
}

impl MediaKind {
    /// Classify a source path by its extension (case-insensitive).
    pub fn from_path(src: &str) -> Option<Self> {
        let ext = Path::new(src).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "webp" => Some(MediaKind::Image),
            "mp4" | "mov" | "mkv" | "webm" | "avi" => Some(MediaKind::Video),
            "svg" => Some(MediaKind::Svg),
            _ => None,
        }
    }
}

/// What a prober knows about a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub kind: MediaKind,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub has_alpha: bool,
    pub duration: Option<f64>,
}

impl MediaInfo {
    pub fn image(width: i32, height: i32, has_alpha: bool) -> Self {
        Self {
            kind: MediaKind::Image,
            width: Some(width),
            height: Some(height),
            has_alpha,
            duration: None,
        }
    }

    pub fn video(width: i32, height: i32, duration: f64) -> Self {
        Self {
            kind: MediaKind::Video,
            width: Some(width),
            height: Some(height),
            has_alpha: false,
            duration: Some(duration),
        }
    }

    /// Vector sources have no intrinsic pixel size.
    pub fn svg() -> Self {
        Self {
            kind: MediaKind::Svg,
            width: None,
            height: None,
            has_alpha: true,
            duration: None,
        }
    }

    /// Pixel size, when both dimensions are known and positive.
    pub fn size(&self) -> Option<Size> {
        let size = Size::new(self.width?, self.height?);
        size.is_positive().then_some(size)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProbeError {
    #[error("unsupported file type: {0:?}")]
    UnsupportedType(String),
    #[error("no media information for '{0}'")]
    NotFound(String),
    #[error("probe failed: {0}")]
    Failed(String),
}

/// Source of media information, implemented by the host.
pub trait MediaProber {
    fn probe(&self, src: &str) -> Result<MediaInfo, ProbeError>;
}

/// In-memory prober for hosts that probe ahead of time, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MediaTable {
    entries: HashMap<String, MediaInfo>,
}

impl MediaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: impl Into<String>, info: MediaInfo) -> &mut Self {
        self.entries.insert(src.into(), info);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MediaProber for MediaTable {
    fn probe(&self, src: &str) -> Result<MediaInfo, ProbeError> {
        if MediaKind::from_path(src).is_none() {
            let ext = Path::new(src)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default();
            return Err(ProbeError::UnsupportedType(format!(".{ext}")));
        }
        self.entries
            .get(src)
            .cloned()
            .ok_or_else(|| ProbeError::NotFound(src.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(MediaKind::from_path("/a/b/logo.PNG"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_path("clip.webm"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_path("icon.svg"), Some(MediaKind::Svg));
        assert_eq!(MediaKind::from_path("notes.txt"), None);
        assert_eq!(MediaKind::from_path("noext"), None);
    }

    #[test]
    fn test_table_probe() {
        let mut table = MediaTable::new();
        table.insert("brain.png", MediaInfo::image(512, 512, true));
        assert_eq!(
            table.probe("brain.png").unwrap().size(),
            Some(Size::new(512, 512))
        );
        assert_eq!(
            table.probe("missing.png"),
            Err(ProbeError::NotFound("missing.png".into()))
        );
        assert_eq!(
            table.probe("doc.pdf"),
            Err(ProbeError::UnsupportedType(".pdf".into()))
        );
    }

    #[test]
    fn test_svg_has_no_size() {
        assert_eq!(MediaInfo::svg().size(), None);
    }
}
