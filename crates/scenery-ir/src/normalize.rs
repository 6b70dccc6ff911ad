//! Raw records → resolved scenes.
//!
//! Scene-level invariants fail fast with the first violation. Graphic
//! validation is the exception: every problem with one graphic is collected
//! and reported together in a single [`SceneError::Rejected`].

use std::collections::HashSet;

use serde_json::{Map, Value};

use scenery_core::geometry::{check_upscale, fit_into_rect, snap_to_safe, DEFAULT_UPSCALE_LIMIT};
use scenery_core::{
    CanvasMeta, Diagnostic, Diagnostics, EngineConfig, FitMode, HAlign, Rect, Resolved,
    SceneError, SceneResult, Size,
};

use crate::probe::MediaProber;
use crate::raw::{RawBackground, RawGraphic, RawPresenter, RawScene, RawSlot, RawStyle};
use crate::role::{validate_graphic, Role};
use crate::scene::Scene;
use crate::spec::{
    Background, GraphicSpec, Layout, ModeHint, PresenterSpec, Style, TextSpec, Trim,
};

/// Converts raw scene records into [`Scene`]s for one canvas.
#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    meta: &'a CanvasMeta,
    upscale_limit: f64,
    prober: Option<&'a dyn MediaProber>,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer, validating the canvas first.
    pub fn new(meta: &'a CanvasMeta) -> SceneResult<Self> {
        meta.validate()?;
        Ok(Self {
            meta,
            upscale_limit: DEFAULT_UPSCALE_LIMIT,
            prober: None,
        })
    }

    pub fn from_config(config: &'a EngineConfig) -> SceneResult<Self> {
        Ok(Self::new(&config.canvas)?.with_upscale_limit(config.layout.upscale_limit))
    }

    pub fn with_upscale_limit(mut self, limit: f64) -> Self {
        self.upscale_limit = limit;
        self
    }

    /// Consult `prober` for graphics whose source size is not given inline.
    pub fn with_prober(mut self, prober: &'a dyn MediaProber) -> Self {
        self.prober = Some(prober);
        self
    }

    pub fn meta(&self) -> &CanvasMeta {
        self.meta
    }

    pub fn upscale_limit(&self) -> f64 {
        self.upscale_limit
    }

    /// Validate and resolve one scene.
    pub fn normalize_scene(&self, raw: &RawScene) -> SceneResult<Resolved<Scene>> {
        let scene_id = raw.id.as_str();
        tracing::debug!("Normalizing scene '{}'", scene_id);

        let duration = raw
            .duration
            .ok_or_else(|| SceneError::missing(format!("scene '{scene_id}'"), "duration"))?;
        if !(duration > 0.0 && duration.is_finite() && raw.start >= 0.0 && raw.start.is_finite()) {
            return Err(SceneError::InvalidDurationOrStart {
                scene: scene_id.to_string(),
                start: raw.start,
                duration,
            });
        }

        let background = normalize_background(&raw.background);
        if !background.is_valid() {
            return Err(SceneError::InvalidBackground {
                scene: scene_id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut slots = Vec::with_capacity(raw.slots.len());
        for raw_slot in &raw.slots {
            let slot = self.normalize_slot(raw_slot)?;
            if !seen.insert(slot.slot_id.clone()) {
                return Err(SceneError::DuplicateSlot {
                    scene: scene_id.to_string(),
                    slot: slot.slot_id,
                });
            }
            slots.push(slot);
        }

        let mut diagnostics = Diagnostics::new();
        let mut graphics = Vec::with_capacity(raw.graphics.len());
        for (index, raw_graphic) in raw.graphics.iter().enumerate() {
            graphics.push(self.normalize_graphic(raw_graphic, index, &mut diagnostics)?);
        }

        let presenter = raw
            .presenter
            .as_ref()
            .map(|p| self.normalize_presenter(p))
            .transpose()?;

        let scene = Scene::new(
            raw.id.clone(),
            raw.scene_type.clone(),
            raw.start,
            duration,
            background,
            slots,
            graphics,
            presenter,
            raw.transition_out.clone(),
        );
        Ok(Resolved::new(scene, diagnostics))
    }

    pub fn normalize_slot(&self, raw: &RawSlot) -> SceneResult<TextSpec> {
        let slot_id = raw
            .slot_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SceneError::missing("text slot", "slot_id"))?
            .to_string();
        let element = format!("slot '{slot_id}'");

        let rect = raw
            .rect
            .as_deref()
            .and_then(Rect::from_slice)
            .ok_or_else(|| SceneError::missing(&element, "rect (x, y, w, h)"))?;
        if !rect.is_positive() {
            return Err(SceneError::invalid_rect(element, rect.width, rect.height));
        }

        Ok(TextSpec {
            slot_id,
            style: normalize_style(raw.style.as_ref()),
            rect,
            fonts: raw.fonts.clone().unwrap_or_default(),
            payload: raw.payload.clone().unwrap_or_default(),
            motion: raw.motion,
            layer: raw.layer.unwrap_or(10),
            align: raw.align.unwrap_or(HAlign::Left),
        })
    }

    /// Validate, apply role policy and place one graphic.
    pub fn normalize_graphic(
        &self,
        raw: &RawGraphic,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> SceneResult<GraphicSpec> {
        let element = raw.label(index);
        let violations = validate_graphic(raw, &element);
        if !violations.is_empty() {
            return Err(SceneError::Rejected {
                element,
                violations,
            });
        }

        let role_name = raw.role.as_deref().unwrap_or("illustration");
        let role = Role::parse(role_name).ok_or_else(|| SceneError::InvalidRole {
            element: element.clone(),
            role: role_name.to_string(),
        })?;
        let raw_layout = raw
            .layout
            .as_ref()
            .ok_or_else(|| SceneError::missing(&element, "layout"))?;
        let rect = raw_layout
            .rect
            .as_deref()
            .and_then(Rect::from_slice)
            .ok_or_else(|| SceneError::missing(&element, "layout.rect (x, y, w, h)"))?;

        if role == Role::Special {
            let d = Diagnostic::UnsupportedRole {
                element: element.clone(),
                role: role.to_string(),
            };
            tracing::warn!("{}", d);
            diagnostics.push(d);
        }

        let policy = role.policy();
        let mut layout = policy.apply(
            Layout {
                rect,
                mode: FitMode::Fit,
                align: raw_layout.align.unwrap_or(HAlign::Center),
                rotation: raw_layout.rotation.unwrap_or(0.0),
                opacity: raw_layout.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
                snap_safe: raw_layout.snap_safe.unwrap_or(true),
            },
            raw_layout.mode.as_deref(),
        );

        let target = if layout.snap_safe {
            snap_to_safe(layout.rect, self.meta)
        } else {
            layout.rect
        };
        layout.rect = match self.source_size(raw, diagnostics) {
            Some(src) => {
                let placed = fit_into_rect(src, target, layout.mode);
                if let Some(d) = check_upscale(src, placed, self.upscale_limit) {
                    tracing::warn!("{}: {}", element, d);
                    diagnostics.push(d);
                }
                placed
            }
            None => target,
        };
        if !layout.rect.is_positive() {
            return Err(SceneError::invalid_rect(
                element,
                layout.rect.width,
                layout.rect.height,
            ));
        }
        tracing::debug!("{} placed at {}", element, layout.rect);

        Ok(GraphicSpec {
            role,
            src: raw.src.clone(),
            color: raw.color.clone(),
            layout,
            z_hint: raw.z_hint.unwrap_or(policy.default_z),
            looped: raw.looped,
            trim: raw.trim.map(|(start, duration)| Trim { start, duration }),
            meta: raw.meta.clone(),
        })
    }

    /// Presenters are always snapped into the safe box.
    pub fn normalize_presenter(&self, raw: &RawPresenter) -> SceneResult<PresenterSpec> {
        let src = raw
            .src
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| SceneError::missing("presenter", "src"))?;
        let element = format!("presenter '{src}'");
        let rect = raw
            .rect
            .as_deref()
            .and_then(Rect::from_slice)
            .ok_or_else(|| SceneError::missing(&element, "rect (x, y, w, h)"))?;
        if !rect.is_positive() {
            return Err(SceneError::invalid_rect(element, rect.width, rect.height));
        }
        let rect = snap_to_safe(rect, self.meta);

        Ok(PresenterSpec {
            src,
            rect,
            shape: raw.shape.unwrap_or_default(),
            layer: raw.layer.unwrap_or(20),
        })
    }

    /// Source pixel size: inline `meta.size` (or `meta.src_size`) first, then
    /// the prober.
    fn source_size(&self, raw: &RawGraphic, diagnostics: &mut Diagnostics) -> Option<Size> {
        if let Some(size) = inline_size(&raw.meta) {
            return Some(size);
        }
        let (prober, src) = (self.prober?, raw.src.as_deref()?);
        match prober.probe(src) {
            Ok(info) => {
                let size = info.size();
                if size.is_none() {
                    tracing::debug!("'{}' has no pixel size, keeping layout rect", src);
                }
                size
            }
            Err(e) => {
                let d = Diagnostic::ProbeFailed {
                    source: src.to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!("{}", d);
                diagnostics.push(d);
                None
            }
        }
    }
}

/// Resolve one scene on `meta` with default settings.
pub fn build_scene(meta: &CanvasMeta, raw: &RawScene) -> SceneResult<Resolved<Scene>> {
    Normalizer::new(meta)?.normalize_scene(raw)
}

fn inline_size(meta: &Map<String, Value>) -> Option<Size> {
    let value = meta.get("size").or_else(|| meta.get("src_size"))?;
    match value.as_array()?.as_slice() {
        [w, h] => {
            let size = Size::new(w.as_f64()? as i32, h.as_f64()? as i32);
            size.is_positive().then_some(size)
        }
        _ => None,
    }
}

fn normalize_background(raw: &RawBackground) -> Background {
    Background {
        color: raw.color.clone().filter(|c| !c.is_empty()),
        video: raw.video.clone().filter(|s| !s.trim().is_empty()),
        image: raw.image.clone().filter(|s| !s.trim().is_empty()),
    }
}

fn normalize_style(raw: Option<&RawStyle>) -> Style {
    let defaults = Style::default();
    let Some(raw) = raw else {
        return defaults;
    };
    Style {
        color: raw.color.clone().unwrap_or(defaults.color),
        stroke_color: raw.stroke_color.clone().unwrap_or(defaults.stroke_color),
        stroke_width: raw.stroke_width.unwrap_or(defaults.stroke_width),
        opacity: raw.opacity.unwrap_or(defaults.opacity).clamp(0.0, 1.0),
        pad: raw.pad.unwrap_or(defaults.pad),
        interline: raw.interline.unwrap_or(defaults.interline),
        baseline_pad_pct: raw.baseline_pad_pct.unwrap_or(defaults.baseline_pad_pct),
        top_pad_pct: raw.top_pad_pct.unwrap_or(defaults.top_pad_pct),
        mode_hint: raw.mode_hint.as_deref().and_then(ModeHint::parse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{MediaInfo, MediaTable};
    use crate::raw::RawLayout;
    use scenery_core::ColorValue;

    fn scene(duration: f64) -> RawScene {
        RawScene {
            id: "s1".into(),
            scene_type: "content".into(),
            duration: Some(duration),
            background: RawBackground {
                color: Some(ColorValue::from("#000")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn illustration(src: &str, rect: [f64; 4]) -> RawGraphic {
        RawGraphic {
            role: Some("illustration".into()),
            src: Some(src.into()),
            layout: Some(RawLayout {
                rect: Some(rect.to_vec()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_bad_timing() {
        let meta = CanvasMeta::hd();
        for duration in [0.0, -1.0] {
            let err = build_scene(&meta, &scene(duration)).unwrap_err();
            assert!(matches!(err, SceneError::InvalidDurationOrStart { .. }));
        }
        let mut raw = scene(1.0);
        raw.start = -0.01;
        assert!(matches!(
            build_scene(&meta, &raw).unwrap_err(),
            SceneError::InvalidDurationOrStart { .. }
        ));
    }

    #[test]
    fn test_rejects_empty_background() {
        let mut raw = scene(1.0);
        raw.background = RawBackground::default();
        assert!(matches!(
            build_scene(&CanvasMeta::hd(), &raw).unwrap_err(),
            SceneError::InvalidBackground { .. }
        ));
    }

    #[test]
    fn test_slot_defaults() {
        let mut raw = scene(1.0);
        raw.slots.push(RawSlot {
            slot_id: Some("title".into()),
            rect: Some(vec![160.0, 220.0, 800.0, 180.0]),
            style: Some(RawStyle {
                interline: Some(8),
                ..Default::default()
            }),
            ..Default::default()
        });
        let scene = build_scene(&CanvasMeta::hd(), &raw).unwrap().into_value();
        let slot = scene.slot("title").unwrap();
        assert_eq!(slot.layer, 10);
        assert_eq!(slot.align, HAlign::Left);
        assert_eq!(slot.style.interline, 8);
        assert!((slot.style.baseline_pad_pct - 0.32).abs() < 1e-9);
    }

    #[test]
    fn test_slot_errors() {
        let meta = CanvasMeta::hd();
        let mut raw = scene(1.0);
        raw.slots.push(RawSlot {
            slot_id: Some("  ".into()),
            rect: Some(vec![0.0, 0.0, 10.0, 10.0]),
            ..Default::default()
        });
        assert!(matches!(
            build_scene(&meta, &raw).unwrap_err(),
            SceneError::MissingRequiredField { .. }
        ));

        raw.slots[0].slot_id = Some("a".into());
        raw.slots[0].rect = Some(vec![0.0, 0.0, 10.0, -5.0]);
        let err = build_scene(&meta, &raw).unwrap_err();
        assert!(err.to_string().contains("slot 'a'"));

        raw.slots[0].rect = Some(vec![0.0, 0.0, 10.0, 5.0]);
        raw.slots.push(raw.slots[0].clone());
        assert!(matches!(
            build_scene(&meta, &raw).unwrap_err(),
            SceneError::DuplicateSlot { .. }
        ));
    }

    #[test]
    fn test_graphic_fit_with_inline_size() {
        let mut raw = scene(1.0);
        let mut g = illustration("brain.png", [1460.0, 260.0, 300.0, 300.0]);
        g.meta.insert("size".into(), serde_json::json!([512, 256]));
        raw.graphics.push(g);
        let resolved = build_scene(&CanvasMeta::hd(), &raw).unwrap();
        let graphic = &resolved.value.graphics()[0];
        assert_eq!(graphic.layout.rect, Rect::new(1460, 335, 300, 150));
        assert_eq!(graphic.z_hint, 5);
        assert!(resolved.diagnostics.is_empty());
    }

    #[test]
    fn test_graphic_upscale_diagnostic() {
        let mut raw = scene(1.0);
        let mut g = illustration("tiny.png", [400.0, 300.0, 300.0, 300.0]);
        g.meta.insert("src_size".into(), serde_json::json!([100, 100]));
        raw.graphics.push(g);
        let resolved = build_scene(&CanvasMeta::hd(), &raw).unwrap();
        assert_eq!(resolved.diagnostics.len(), 1);
        assert!(matches!(
            resolved.diagnostics.iter().next(),
            Some(Diagnostic::Upscale { .. })
        ));
    }

    #[test]
    fn test_graphic_probed_size() {
        let mut table = MediaTable::new();
        table.insert("wide.png", MediaInfo::image(400, 100, false));
        let meta = CanvasMeta::hd();
        let normalizer = Normalizer::new(&meta).unwrap().with_prober(&table);

        let mut raw = scene(1.0);
        raw.graphics.push(illustration("wide.png", [200.0, 200.0, 400.0, 400.0]));
        raw.graphics.push(illustration("gone.png", [200.0, 200.0, 400.0, 400.0]));
        let resolved = normalizer.normalize_scene(&raw).unwrap();
        let graphics = resolved.value.graphics();
        assert_eq!(graphics[0].layout.rect, Rect::new(200, 350, 400, 100));
        assert_eq!(graphics[1].layout.rect, Rect::new(200, 200, 400, 400));
        assert!(matches!(
            resolved.diagnostics.iter().next(),
            Some(Diagnostic::ProbeFailed { .. })
        ));
    }

    #[test]
    fn test_rejected_graphic_names_element() {
        let mut raw = scene(1.0);
        raw.graphics.push(RawGraphic {
            role: Some("sticker".into()),
            src: Some("x.png".into()),
            ..Default::default()
        });
        match build_scene(&CanvasMeta::hd(), &raw).unwrap_err() {
            SceneError::Rejected {
                element,
                violations,
            } => {
                assert_eq!(element, "graphic 'x.png'");
                assert_eq!(violations.len(), 2);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_special_role_is_advisory() {
        let mut raw = scene(1.0);
        raw.graphics
            .push(illustration("anim.svg", [200.0, 200.0, 100.0, 100.0]));
        raw.graphics[0].role = Some("special".into());
        let resolved = build_scene(&CanvasMeta::hd(), &raw).unwrap();
        assert_eq!(resolved.value.graphics()[0].z_hint, 40);
        assert!(matches!(
            resolved.diagnostics.iter().next(),
            Some(Diagnostic::UnsupportedRole { .. })
        ));
    }

    #[test]
    fn test_presenter_snapped_and_defaulted() {
        let mut raw = scene(1.0);
        raw.presenter = Some(RawPresenter {
            src: Some("avatar.mp4".into()),
            rect: Some(vec![1700.0, 900.0, 320.0, 320.0]),
            ..Default::default()
        });
        let scene = build_scene(&CanvasMeta::hd(), &raw).unwrap().into_value();
        let presenter = scene.presenter().unwrap();
        assert_eq!(presenter.rect, Rect::new(1504, 706, 320, 320));
        assert_eq!(presenter.layer, 20);

        raw.presenter = Some(RawPresenter {
            rect: Some(vec![0.0, 0.0, 10.0, 10.0]),
            ..Default::default()
        });
        assert!(matches!(
            build_scene(&CanvasMeta::hd(), &raw).unwrap_err(),
            SceneError::MissingRequiredField { .. }
        ));
    }

    #[test]
    fn test_presenter_rejects_degenerate_rects() {
        for width in [0.0, -320.0, -3_000_000_000.0] {
            let mut raw = scene(1.0);
            raw.presenter = Some(RawPresenter {
                src: Some("avatar.mp4".into()),
                rect: Some(vec![0.0, 0.0, width, 10.0]),
                ..Default::default()
            });
            assert!(
                matches!(
                    build_scene(&CanvasMeta::hd(), &raw),
                    Err(SceneError::InvalidRect { .. })
                ),
                "width {width} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_invalid_canvas() {
        let meta = CanvasMeta {
            width: 0,
            ..CanvasMeta::hd()
        };
        assert!(Normalizer::new(&meta).is_err());
    }
}
