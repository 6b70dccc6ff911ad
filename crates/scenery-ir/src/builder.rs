use serde_json::json;

use scenery_core::{ColorValue, HAlign};

use crate::raw::{
    RawBackground, RawGraphic, RawLayout, RawPresenter, RawScene, RawSlot, RawStyle,
};
use crate::spec::TextPayload;

/// A builder for scene records, for programmatic generation and unit testing.
///
/// It produces the same [`RawScene`] a JSON document would; nothing is
/// validated until the scene goes through the normalizer.
pub struct SceneBuilder {
    scene: RawScene,
}

impl SceneBuilder {
    pub fn new(id: impl Into<String>, scene_type: impl Into<String>, duration: f64) -> Self {
        Self {
            scene: RawScene {
                id: id.into(),
                scene_type: scene_type.into(),
                duration: Some(duration),
                ..Default::default()
            },
        }
    }

    pub fn start(&mut self, start: f64) -> &mut Self {
        self.scene.start = start;
        self
    }

    pub fn background_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.scene.background = RawBackground {
            color: Some(ColorValue::Text(color.into())),
            ..Default::default()
        };
        self
    }

    pub fn background_image(&mut self, src: impl Into<String>) -> &mut Self {
        self.scene.background = RawBackground {
            image: Some(src.into()),
            ..Default::default()
        };
        self
    }

    /// Add a text slot. Slots are drawn in insertion order within a layer.
    pub fn add_slot(&mut self, slot: RawSlot) -> &mut Self {
        self.scene.slots.push(slot);
        self
    }

    pub fn add_graphic(&mut self, graphic: RawGraphic) -> &mut Self {
        self.scene.graphics.push(graphic);
        self
    }

    pub fn presenter(&mut self, src: impl Into<String>, rect: [f64; 4]) -> &mut Self {
        self.scene.presenter = Some(RawPresenter {
            src: Some(src.into()),
            rect: Some(rect.to_vec()),
            ..Default::default()
        });
        self
    }

    /// Build and return the scene record.
    pub fn build(self) -> RawScene {
        self.scene
    }
}

/// A builder for text slot records.
pub struct SlotBuilder {
    slot: RawSlot,
}

impl SlotBuilder {
    pub fn new(slot_id: impl Into<String>, rect: [f64; 4]) -> Self {
        Self {
            slot: RawSlot {
                slot_id: Some(slot_id.into()),
                rect: Some(rect.to_vec()),
                ..Default::default()
            },
        }
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.slot.payload = Some(TextPayload::Text(text.into()));
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slot.payload = Some(TextPayload::Lines(
            lines.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn align(&mut self, align: HAlign) -> &mut Self {
        self.slot.align = Some(align);
        self
    }

    pub fn layer(&mut self, layer: i32) -> &mut Self {
        self.slot.layer = Some(layer);
        self
    }

    pub fn style(&mut self, style: RawStyle) -> &mut Self {
        self.slot.style = Some(style);
        self
    }

    pub fn build(self) -> RawSlot {
        self.slot
    }
}

/// A builder for graphic records.
pub struct GraphicBuilder {
    graphic: RawGraphic,
}

impl GraphicBuilder {
    pub fn new(role: impl Into<String>, rect: [f64; 4]) -> Self {
        Self {
            graphic: RawGraphic {
                role: Some(role.into()),
                layout: Some(RawLayout {
                    rect: Some(rect.to_vec()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }

    pub fn src(&mut self, src: impl Into<String>) -> &mut Self {
        self.graphic.src = Some(src.into());
        self
    }

    pub fn color(&mut self, color: impl Into<String>) -> &mut Self {
        self.graphic.color = Some(ColorValue::Text(color.into()));
        self
    }

    pub fn mode(&mut self, mode: impl Into<String>) -> &mut Self {
        self.layout().mode = Some(mode.into());
        self
    }

    pub fn snap_safe(&mut self, snap: bool) -> &mut Self {
        self.layout().snap_safe = Some(snap);
        self
    }

    pub fn z_hint(&mut self, z: i32) -> &mut Self {
        self.graphic.z_hint = Some(z);
        self
    }

    /// Record the source pixel size inline as `meta.size`.
    pub fn source_size(&mut self, width: i32, height: i32) -> &mut Self {
        self.graphic
            .meta
            .insert("size".to_string(), json!([width, height]));
        self
    }

    pub fn build(self) -> RawGraphic {
        self.graphic
    }

    fn layout(&mut self) -> &mut RawLayout {
        self.graphic.layout.get_or_insert_with(RawLayout::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::build_scene;
    use scenery_core::CanvasMeta;

    #[test]
    fn test_builders_produce_valid_scene() {
        let mut slot = SlotBuilder::new("title", [160.0, 120.0, 800.0, 120.0]);
        slot.text("Hello").align(HAlign::Center);

        let mut graphic = GraphicBuilder::new("overlay", [0.0, 0.0, 200.0, 100.0]);
        graphic.color("#ffffff20").snap_safe(false).z_hint(31);

        let mut scene = SceneBuilder::new("intro", "title_card", 4.0);
        scene
            .background_color("#0b1629")
            .add_slot(slot.build())
            .add_graphic(graphic.build());

        let resolved = build_scene(&CanvasMeta::hd(), &scene.build()).unwrap();
        let scene = resolved.value;
        assert_eq!(scene.slots().len(), 1);
        let overlay = &scene.graphics()[0];
        assert!(overlay.layout.snap_safe);
        assert_eq!(overlay.layout.rect.x, 96);
        assert_eq!(overlay.z_hint, 31);
    }
}
