//! Graphic roles and the layout policy each one imposes.

use serde::{Deserialize, Serialize};
use std::fmt;

use scenery_core::geometry::FitMode;
use scenery_core::{Rect, SceneError};

use crate::raw::RawGraphic;
use crate::spec::Layout;

/// Semantic category of a graphic element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Background,
    Illustration,
    Overlay,
    Special,
}

/// Role-dependent layout defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    /// Mode used when the requested mode is missing or unrecognized.
    pub default_mode: FitMode,
    /// `Some(v)` overrides whatever `snap_safe` the author asked for.
    pub forced_snap_safe: Option<bool>,
    /// Stacking key when the author gives no `z_hint`.
    pub default_z: i32,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Background,
        Role::Illustration,
        Role::Overlay,
        Role::Special,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Background => "background",
            Role::Illustration => "illustration",
            Role::Overlay => "overlay",
            Role::Special => "special",
        }
    }

    pub fn policy(&self) -> RolePolicy {
        match self {
            Role::Background => RolePolicy {
                default_mode: FitMode::Cover,
                forced_snap_safe: Some(false),
                default_z: 0,
            },
            Role::Illustration => RolePolicy {
                default_mode: FitMode::Fit,
                forced_snap_safe: None,
                default_z: 5,
            },
            Role::Overlay => RolePolicy {
                default_mode: FitMode::Fit,
                forced_snap_safe: Some(true),
                default_z: 30,
            },
            Role::Special => RolePolicy {
                default_mode: FitMode::Fit,
                forced_snap_safe: None,
                default_z: 40,
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RolePolicy {
    /// Fill in the mode from `requested_mode` (falling back to the role
    /// default) and apply the forced `snap_safe`, if any.
    pub fn apply(&self, mut layout: Layout, requested_mode: Option<&str>) -> Layout {
        layout.mode = requested_mode
            .and_then(FitMode::parse)
            .unwrap_or(self.default_mode);
        if let Some(snap) = self.forced_snap_safe {
            layout.snap_safe = snap;
        }
        layout
    }
}

/// Check a raw graphic and return every violation found; an empty list means
/// the graphic may be normalized.
pub fn validate_graphic(raw: &RawGraphic, element: &str) -> Vec<SceneError> {
    let mut errors = Vec::new();

    let role_name = raw.role.as_deref().unwrap_or("illustration");
    let role = Role::parse(role_name);
    if role.is_none() {
        errors.push(SceneError::InvalidRole {
            element: element.to_string(),
            role: role_name.to_string(),
        });
    }

    let has_src = raw.src.as_deref().is_some_and(|s| !s.trim().is_empty());
    let has_color = raw.color.as_ref().is_some_and(|c| !c.is_empty());
    if !has_src && !has_color {
        let expected = if role == Some(Role::Background) {
            "either src (image) or color"
        } else {
            "src or color (shape)"
        };
        errors.push(SceneError::InvalidContentSource {
            element: element.to_string(),
            expected,
        });
    }

    match &raw.layout {
        None => errors.push(SceneError::missing(element, "layout")),
        Some(layout) => match layout.rect.as_deref().and_then(Rect::from_slice) {
            None => errors.push(SceneError::missing(element, "layout.rect (x, y, w, h)")),
            Some(rect) if !rect.is_positive() => {
                errors.push(SceneError::invalid_rect(element, rect.width, rect.height))
            }
            Some(_) => {}
        },
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawLayout;
    use scenery_core::ColorValue;

    fn graphic(role: &str, rect: Vec<f64>) -> RawGraphic {
        RawGraphic {
            role: Some(role.to_string()),
            color: Some(ColorValue::from("#fff")),
            layout: Some(RawLayout {
                rect: Some(rect),
                snap_safe: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(Role::Background.policy().default_mode, FitMode::Cover);
        assert_eq!(Role::Background.policy().forced_snap_safe, Some(false));
        assert_eq!(Role::Overlay.policy().forced_snap_safe, Some(true));
        assert_eq!(Role::Illustration.policy().forced_snap_safe, None);
        let zs: Vec<i32> = Role::ALL.iter().map(|r| r.policy().default_z).collect();
        assert_eq!(zs, vec![0, 5, 30, 40]);
    }

    #[test]
    fn test_overlay_forces_snap_safe() {
        let layout = Layout {
            snap_safe: false,
            ..Layout::new(Rect::new(0, 0, 10, 10))
        };
        let applied = Role::Overlay.policy().apply(layout, None);
        assert!(applied.snap_safe);
        assert_eq!(applied.mode, FitMode::Fit);
    }

    #[test]
    fn test_background_never_snaps() {
        let applied = Role::Background
            .policy()
            .apply(Layout::new(Rect::new(0, 0, 10, 10)), Some("bogus"));
        assert!(!applied.snap_safe);
        assert_eq!(applied.mode, FitMode::Cover);
    }

    #[test]
    fn test_illustration_keeps_caller_choice() {
        let layout = Layout {
            snap_safe: false,
            ..Layout::new(Rect::new(0, 0, 10, 10))
        };
        let applied = Role::Illustration.policy().apply(layout, Some("cover"));
        assert!(!applied.snap_safe);
        assert_eq!(applied.mode, FitMode::Cover);
    }

    #[test]
    fn test_validate_accepts_color_overlay() {
        let raw = graphic("overlay", vec![0.0, 0.0, 10.0, 10.0]);
        assert!(validate_graphic(&raw, "graphic #0").is_empty());
    }

    #[test]
    fn test_validate_accumulates_violations() {
        let raw = RawGraphic {
            role: Some("sticker".into()),
            ..Default::default()
        };
        let errors = validate_graphic(&raw, "graphic #1");
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], SceneError::InvalidRole { .. }));
        assert!(matches!(errors[1], SceneError::InvalidContentSource { .. }));
        assert!(matches!(errors[2], SceneError::MissingRequiredField { .. }));
    }

    #[test]
    fn test_validate_rect_dimensions() {
        let raw = graphic("illustration", vec![0.0, 0.0, 0.0, 10.0]);
        let errors = validate_graphic(&raw, "graphic #0");
        assert!(matches!(
            errors.as_slice(),
            [SceneError::InvalidRect { width: 0, height: 10, .. }]
        ));

        let raw = graphic("illustration", vec![0.0, 0.0, 10.0]);
        let errors = validate_graphic(&raw, "graphic #0");
        assert!(matches!(errors.as_slice(), [SceneError::MissingRequiredField { .. }]));
    }

    #[test]
    fn test_background_message() {
        let raw = RawGraphic {
            role: Some("background".into()),
            layout: Some(RawLayout {
                rect: Some(vec![0.0, 0.0, 1920.0, 1080.0]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = validate_graphic(&raw, "background");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("src (image) or color"));
    }
}
