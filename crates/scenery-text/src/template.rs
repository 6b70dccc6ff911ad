//! Element templates: per-element-type rects, alignment and font size.
//!
//! ```json
//! {"types": [{"id": "captions",
//!             "layout": {"primary": {"rect": [160, 880, 1600, 140], "align": "center"}},
//!             "size": {"common": 40}}]}
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use scenery_core::{HAlign, Rect, SceneError, SceneResult, VAlign};
use scenery_ir::TextSpec;

use crate::role::TextRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub types: Vec<ElementType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementType {
    pub id: String,
    pub layout: ElementVariants,
    pub size: ElementSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementVariants {
    pub primary: VariantLayout,
    #[serde(default)]
    pub alternate: Option<VariantLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantLayout {
    pub rect: [i32; 4],
    #[serde(default)]
    pub align: HAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    pub common: f64,
    #[serde(default)]
    pub mono: bool,
}

/// Everything the text engine needs to place one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementLayout {
    pub id: String,
    /// `None` for element ids outside the built-in set; those align to the top.
    pub role: Option<TextRole>,
    pub rect: Rect,
    pub align: HAlign,
    pub font_size: f64,
    pub mono: bool,
}

impl ElementLayout {
    pub fn new(id: impl Into<String>, rect: Rect, align: HAlign, font_size: f64) -> Self {
        let id = id.into();
        Self {
            role: TextRole::parse(&id),
            id,
            rect,
            align,
            font_size,
            mono: false,
        }
    }

    /// Layout for a normalized scene slot; the slot id doubles as element id.
    pub fn for_slot(slot: &TextSpec, font_size: f64) -> Self {
        Self::new(slot.slot_id.clone(), slot.rect, slot.align, font_size)
    }

    pub fn v_align(&self) -> VAlign {
        self.role.map(|r| r.v_align()).unwrap_or_default()
    }

    pub fn is_caption(&self) -> bool {
        self.role.is_some_and(|r| r.is_caption())
    }
}

impl TemplateSpec {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> SceneResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn element_type(&self, id: &str) -> Option<&ElementType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Resolve element `id` in `variant`. `"alternate"` selects the alternate
    /// layout; any other variant name selects the primary one.
    pub fn resolve(&self, id: &str, variant: &str) -> SceneResult<ElementLayout> {
        let element = self
            .element_type(id)
            .ok_or_else(|| SceneError::Template(format!("unknown element type '{id}'")))?;

        let layout = match variant {
            "alternate" => element.layout.alternate.as_ref().ok_or_else(|| {
                SceneError::Template(format!("element type '{id}' has no alternate layout"))
            })?,
            _ => &element.layout.primary,
        };

        let [x, y, w, h] = layout.rect;
        let rect = Rect::new(x, y, w, h);
        if !rect.is_positive() {
            return Err(SceneError::invalid_rect(format!("element type '{id}'"), w, h));
        }
        if !(element.size.common > 0.0) {
            return Err(SceneError::Template(format!(
                "element type '{id}' needs a positive font size, got {}",
                element.size.common
            )));
        }

        Ok(ElementLayout {
            mono: element.size.mono,
            ..ElementLayout::new(id, rect, layout.align, element.size.common.trunc())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "types": [
            {"id": "captions",
             "layout": {"primary": {"rect": [160, 880, 1600, 140], "align": "center"},
                        "alternate": {"rect": [160, 60, 1600, 140], "align": "center"}},
             "size": {"common": 40}},
            {"id": "code_snippet",
             "layout": {"primary": {"rect": [160, 300, 1000, 500]}},
             "size": {"common": 28.7, "mono": true}},
            {"id": "broken",
             "layout": {"primary": {"rect": [0, 0, 0, 10]}},
             "size": {"common": 20}}
        ]
    }"#;

    #[test]
    fn test_resolve_variants() {
        let spec = TemplateSpec::from_json(TEMPLATE).unwrap();
        let primary = spec.resolve("captions", "primary").unwrap();
        assert_eq!(primary.rect, Rect::new(160, 880, 1600, 140));
        assert_eq!(primary.role, Some(TextRole::Captions));
        assert!(primary.is_caption());
        assert_eq!(primary.v_align(), VAlign::Bottom);

        let alternate = spec.resolve("captions", "alternate").unwrap();
        assert_eq!(alternate.rect.y, 60);

        // unknown variant names fall back to primary
        assert_eq!(spec.resolve("captions", "wide").unwrap(), primary);
    }

    #[test]
    fn test_resolve_defaults_and_truncation() {
        let spec = TemplateSpec::from_json(TEMPLATE).unwrap();
        let code = spec.resolve("code_snippet", "primary").unwrap();
        assert_eq!(code.align, HAlign::Left);
        assert!(code.mono);
        assert!((code.font_size - 28.0).abs() < 1e-9);
        assert!(spec.resolve("code_snippet", "alternate").is_err());
    }

    #[test]
    fn test_resolve_errors() {
        let spec = TemplateSpec::from_json(TEMPLATE).unwrap();
        assert!(matches!(
            spec.resolve("marquee", "primary"),
            Err(SceneError::Template(_))
        ));
        assert!(matches!(
            spec.resolve("broken", "primary"),
            Err(SceneError::InvalidRect { .. })
        ));
        assert!(matches!(
            TemplateSpec::from_json("{\"types\": 3}"),
            Err(SceneError::Serialization(_))
        ));
    }
}
