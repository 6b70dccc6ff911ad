use serde::Serialize;

use scenery_core::{CanvasMeta, Diagnostics, Resolved, SceneError, SceneResult};

use crate::normalize::Normalizer;
use crate::raw::{RawScene, RawTimeline};
use crate::scene::Scene;
use crate::validate::validate_scenes;

/// An ordered list of resolved scenes on one canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    meta: CanvasMeta,
    scenes: Vec<Scene>,
}

impl Timeline {
    /// Normalize `raw_scenes` on `meta` with default settings.
    pub fn build(meta: CanvasMeta, raw_scenes: &[RawScene]) -> SceneResult<Resolved<Timeline>> {
        Self::build_with(&Normalizer::new(&meta)?, raw_scenes)
    }

    /// Normalize every scene with `normalizer`, rejecting duplicate ids and
    /// collecting every scene's diagnostics.
    pub fn build_with(
        normalizer: &Normalizer<'_>,
        raw_scenes: &[RawScene],
    ) -> SceneResult<Resolved<Timeline>> {
        let mut diagnostics = Diagnostics::new();
        let mut scenes = Vec::with_capacity(raw_scenes.len());
        for raw in raw_scenes {
            let resolved = normalizer.normalize_scene(raw)?;
            diagnostics.extend(resolved.diagnostics);
            scenes.push(resolved.value);
        }

        match validate_scenes(&scenes) {
            Ok(advisories) => diagnostics.extend(advisories),
            Err(mut errors) if errors.len() == 1 => return Err(errors.remove(0)),
            Err(errors) => {
                return Err(SceneError::Rejected {
                    element: "timeline".to_string(),
                    violations: errors,
                })
            }
        }

        tracing::debug!(
            "Built timeline: {} scenes, {:.2}s",
            scenes.len(),
            total_duration(&scenes)
        );
        let timeline = Timeline {
            meta: normalizer.meta().clone(),
            scenes,
        };
        Ok(Resolved::new(timeline, diagnostics))
    }

    /// Normalize a whole timeline document.
    pub fn from_raw(raw: &RawTimeline) -> SceneResult<Resolved<Timeline>> {
        Self::build(raw.meta.clone(), &raw.scenes)
    }

    pub fn meta(&self) -> &CanvasMeta {
        &self.meta
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Get a scene by its ID.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id() == id)
    }

    /// Time at which the last scene ends.
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.scenes)
    }
}

fn total_duration(scenes: &[Scene]) -> f64 {
    scenes.iter().map(Scene::end).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawBackground;
    use scenery_core::{ColorValue, Diagnostic};

    fn raw(id: &str, start: f64, duration: f64) -> RawScene {
        RawScene {
            id: id.into(),
            scene_type: "content".into(),
            start,
            duration: Some(duration),
            background: RawBackground {
                color: Some(ColorValue::from("black")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_total_duration() {
        let resolved = Timeline::build(
            CanvasMeta::hd(),
            &[raw("intro", 0.0, 5.0), raw("body", 5.0, 10.5)],
        )
        .unwrap();
        assert!(resolved.diagnostics.is_empty());
        let timeline = resolved.value;
        assert!((timeline.total_duration() - 15.5).abs() < 1e-9);
        assert!(timeline.scene("body").is_some());
    }

    #[test]
    fn test_duplicate_scene_ids() {
        let err = Timeline::build(
            CanvasMeta::hd(),
            &[raw("intro", 0.0, 5.0), raw("intro", 5.0, 3.0)],
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::DuplicateScene(id) if id == "intro"));
    }

    #[test]
    fn test_overlap_is_advisory() {
        let resolved = Timeline::build(
            CanvasMeta::hd(),
            &[raw("a", 0.0, 5.0), raw("b", 4.0, 3.0)],
        )
        .unwrap();
        assert!(matches!(
            resolved.diagnostics.iter().next(),
            Some(Diagnostic::SceneOverlap { first, second }) if first == "a" && second == "b"
        ));
    }

    #[test]
    fn test_scene_error_aborts_build() {
        let err = Timeline::build(
            CanvasMeta::hd(),
            &[raw("a", 0.0, 5.0), raw("b", 5.0, 0.0)],
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::InvalidDurationOrStart { .. }));
    }
}
