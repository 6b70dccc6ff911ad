use serde::Serialize;
use serde_json::Value;

use crate::compose::{draw_order, DrawItem};
use crate::spec::{Background, GraphicSpec, PresenterSpec, TextSpec};

/// A resolved scene: a time window plus every element, normalized and placed.
///
/// Scenes are only produced by the [`Normalizer`](crate::normalize::Normalizer)
/// and cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    id: String,
    #[serde(rename = "type")]
    scene_type: String,
    start: f64,
    duration: f64,
    background: Background,
    slots: Vec<TextSpec>,
    graphics: Vec<GraphicSpec>,
    presenter: Option<PresenterSpec>,
    transition_out: Option<Value>,
}

impl Scene {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        scene_type: String,
        start: f64,
        duration: f64,
        background: Background,
        slots: Vec<TextSpec>,
        graphics: Vec<GraphicSpec>,
        presenter: Option<PresenterSpec>,
        transition_out: Option<Value>,
    ) -> Self {
        Self {
            id,
            scene_type,
            start,
            duration,
            background,
            slots,
            graphics,
            presenter,
            transition_out,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scene_type(&self) -> &str {
        &self.scene_type
    }

    /// Start time on the timeline, in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// End time on the timeline, in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn slots(&self) -> &[TextSpec] {
        &self.slots
    }

    /// Get a slot by its ID.
    pub fn slot(&self, slot_id: &str) -> Option<&TextSpec> {
        self.slots.iter().find(|s| s.slot_id == slot_id)
    }

    pub fn graphics(&self) -> &[GraphicSpec] {
        &self.graphics
    }

    pub fn presenter(&self) -> Option<&PresenterSpec> {
        self.presenter.as_ref()
    }

    pub fn transition_out(&self) -> Option<&Value> {
        self.transition_out.as_ref()
    }

    /// Every drawable, bottom to top.
    pub fn draw_order(&self) -> Vec<DrawItem<'_>> {
        draw_order(self)
    }
}
