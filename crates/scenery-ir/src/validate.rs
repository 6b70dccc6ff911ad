use std::collections::HashSet;

use scenery_core::{Diagnostic, Diagnostics, SceneError};

use crate::scene::Scene;

/// Check a list of resolved scenes for structural correctness.
///
/// Errors are accumulated. Overlapping scene windows are not errors; they
/// come back as [`Diagnostic::SceneOverlap`] advisories.
pub fn validate_scenes(scenes: &[Scene]) -> Result<Diagnostics, Vec<SceneError>> {
    let mut errors = Vec::new();

    if scenes.is_empty() {
        errors.push(SceneError::missing("timeline", "scenes"));
    }

    let mut scene_ids = HashSet::new();
    for scene in scenes {
        if !scene_ids.insert(scene.id()) {
            errors.push(SceneError::DuplicateScene(scene.id().to_string()));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut by_start: Vec<&Scene> = scenes.iter().collect();
    by_start.sort_by(|a, b| a.start().total_cmp(&b.start()));

    let mut diagnostics = Diagnostics::new();
    for (i, first) in by_start.iter().enumerate() {
        for second in &by_start[i + 1..] {
            if second.start() >= first.end() {
                break;
            }
            let d = Diagnostic::SceneOverlap {
                first: first.id().to_string(),
                second: second.id().to_string(),
            };
            tracing::warn!("{}", d);
            diagnostics.push(d);
        }
    }
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Background;
    use scenery_core::ColorValue;

    fn scene(id: &str, start: f64, duration: f64) -> Scene {
        Scene::new(
            id.into(),
            "content".into(),
            start,
            duration,
            Background {
                color: Some(ColorValue::from("#000")),
                ..Default::default()
            },
            Vec::new(),
            Vec::new(),
            None,
            None,
        )
    }

    #[test]
    fn test_validate_empty_timeline() {
        assert!(validate_scenes(&[]).is_err());
    }

    #[test]
    fn test_validate_valid_timeline() {
        let diagnostics = validate_scenes(&[scene("a", 0.0, 2.0), scene("b", 2.0, 2.0)]).unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_validate_duplicate_scene_ids() {
        let errors =
            validate_scenes(&[scene("a", 0.0, 2.0), scene("a", 2.0, 2.0), scene("a", 4.0, 1.0)])
                .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_overlaps_every_pair() {
        let diagnostics = validate_scenes(&[
            scene("long", 0.0, 10.0),
            scene("x", 2.0, 1.0),
            scene("y", 5.0, 1.0),
            scene("after", 10.0, 1.0),
        ])
        .unwrap();
        assert_eq!(diagnostics.len(), 2);
    }
}
