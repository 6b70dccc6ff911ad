//! Loosely-typed scene-authoring records.
//!
//! These mirror the JSON documents authors write: almost every key is
//! optional and rects are plain number arrays. Nothing here is validated;
//! the [`Normalizer`](crate::normalize::Normalizer) turns them into the typed
//! specs of [`crate::spec`] or rejects them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use scenery_core::{CanvasMeta, ColorValue, HAlign};

use crate::spec::{Fonts, MotionSpec, PresenterShape, TextPayload};

/// One scene as authored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScene {
    #[serde(alias = "scene_id", alias = "sceneId")]
    pub id: String,
    #[serde(rename = "type", alias = "scene_type", alias = "sceneType")]
    pub scene_type: String,
    pub start: f64,
    pub duration: Option<f64>,
    pub background: RawBackground,
    pub slots: Vec<RawSlot>,
    pub graphics: Vec<RawGraphic>,
    pub presenter: Option<RawPresenter>,
    #[serde(alias = "transitionOut")]
    pub transition_out: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBackground {
    pub color: Option<ColorValue>,
    pub video: Option<String>,
    pub image: Option<String>,
}

/// A text slot as authored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSlot {
    #[serde(alias = "slotId")]
    pub slot_id: Option<String>,
    pub rect: Option<Vec<f64>>,
    pub style: Option<RawStyle>,
    #[serde(alias = "font", alias = "fontPaths")]
    pub fonts: Option<Fonts>,
    pub payload: Option<TextPayload>,
    pub motion: Option<MotionSpec>,
    pub layer: Option<i32>,
    pub align: Option<HAlign>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStyle {
    pub color: Option<ColorValue>,
    #[serde(alias = "strokeColor")]
    pub stroke_color: Option<ColorValue>,
    #[serde(alias = "strokeWidth")]
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub pad: Option<i32>,
    pub interline: Option<i32>,
    #[serde(alias = "baselinePadPct")]
    pub baseline_pad_pct: Option<f64>,
    #[serde(alias = "topPadPct")]
    pub top_pad_pct: Option<f64>,
    #[serde(alias = "mode", alias = "modeHint")]
    pub mode_hint: Option<String>,
}

/// A graphic element as authored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGraphic {
    pub role: Option<String>,
    pub src: Option<String>,
    pub color: Option<ColorValue>,
    pub layout: Option<RawLayout>,
    #[serde(alias = "zHint")]
    pub z_hint: Option<i32>,
    #[serde(rename = "loop", alias = "looped")]
    pub looped: bool,
    pub trim: Option<(f64, f64)>,
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLayout {
    pub rect: Option<Vec<f64>>,
    pub mode: Option<String>,
    pub align: Option<HAlign>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    #[serde(alias = "snapSafe")]
    pub snap_safe: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPresenter {
    pub src: Option<String>,
    pub rect: Option<Vec<f64>>,
    pub shape: Option<PresenterShape>,
    pub layer: Option<i32>,
}

/// A whole timeline document: canvas metadata plus scenes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTimeline {
    #[serde(default)]
    pub meta: CanvasMeta,
    #[serde(default)]
    pub scenes: Vec<RawScene>,
}

impl RawGraphic {
    /// Human-readable label used in error messages.
    pub fn label(&self, index: usize) -> String {
        match &self.src {
            Some(src) => format!("graphic '{src}'"),
            None => format!("graphic #{index}"),
        }
    }
}
