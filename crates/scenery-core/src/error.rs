/// Core error types for scene resolution.
use crate::color::ColorError;

/// A specialized Result type for scene resolution.
pub type SceneResult<T> = Result<T, SceneError>;

/// Every way a scene, one of its elements, or the engine setup can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid timing for scene '{scene}': start={start}, duration={duration} (need start >= 0 and duration > 0)")]
    InvalidDurationOrStart {
        scene: String,
        start: f64,
        duration: f64,
    },

    #[error("invalid background for scene '{scene}': needs at least one of 'color', 'video' or 'image'")]
    InvalidBackground { scene: String },

    #[error("{element} must have positive width and height, got {width}x{height}")]
    InvalidRect {
        element: String,
        width: i32,
        height: i32,
    },

    #[error("{element} is missing required field '{field}'")]
    MissingRequiredField { element: String, field: String },

    #[error("{element} has invalid role '{role}', must be one of background, illustration, overlay, special")]
    InvalidRole { element: String, role: String },

    #[error("{element} needs {expected}")]
    InvalidContentSource {
        element: String,
        expected: &'static str,
    },

    #[error("duplicate slot id '{slot}' in scene '{scene}'")]
    DuplicateSlot { scene: String, slot: String },

    #[error("duplicate scene id '{0}'")]
    DuplicateScene(String),

    #[error("{element} rejected: {}", join_violations(.violations))]
    Rejected {
        element: String,
        violations: Vec<SceneError>,
    },

    #[error("invalid canvas: {0}")]
    InvalidCanvas(String),

    #[error("color error: {0}")]
    Color(#[from] ColorError),

    #[error("template error: {0}")]
    Template(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn join_violations(violations: &[SceneError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SceneError {
    /// Create a missing-field error.
    pub fn missing(element: impl Into<String>, field: impl Into<String>) -> Self {
        SceneError::MissingRequiredField {
            element: element.into(),
            field: field.into(),
        }
    }

    /// Create a non-positive rect error.
    pub fn invalid_rect(element: impl Into<String>, width: i32, height: i32) -> Self {
        SceneError::InvalidRect {
            element: element.into(),
            width,
            height,
        }
    }

    /// The individual violations behind this error: the wrapped list for
    /// [`SceneError::Rejected`], otherwise the error itself.
    pub fn violations(&self) -> Vec<&SceneError> {
        match self {
            SceneError::Rejected { violations, .. } => violations.iter().collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_error_display() {
        let err = SceneError::InvalidDurationOrStart {
            scene: "intro".into(),
            start: 0.0,
            duration: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid timing for scene 'intro': start=0, duration=-1 (need start >= 0 and duration > 0)"
        );
    }

    #[test]
    fn test_rejected_lists_every_violation() {
        let err = SceneError::Rejected {
            element: "graphic #0".into(),
            violations: vec![
                SceneError::missing("graphic #0", "layout"),
                SceneError::InvalidContentSource {
                    element: "graphic #0".into(),
                    expected: "src or color",
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("graphic #0 rejected: "));
        assert!(msg.contains("missing required field 'layout'"));
        assert!(msg.contains("needs src or color"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_color_error_converts() {
        let err: SceneError = ColorError::InvalidHex("#zz".into()).into();
        assert!(err.to_string().contains("#zz"));
    }
}
