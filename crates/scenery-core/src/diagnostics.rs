//! Advisory conditions raised while resolving a scene.
//!
//! Diagnostics never change control flow: a resolved value is produced either
//! way and the collected diagnostics travel next to it in [`Resolved`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::{Rect, Size};

/// A single non-fatal finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Source media is scaled up past the configured limit and will look soft.
    Upscale {
        factor: f64,
        limit: f64,
        source: Size,
        target: Rect,
    },
    /// The element's role is accepted but the renderer cannot draw it yet.
    UnsupportedRole { element: String, role: String },
    /// Source dimensions could not be probed; the element keeps its layout rect.
    ProbeFailed { source: String, reason: String },
    /// Shrink-to-fit hit the minimum font size and the block still overflows.
    ShrinkFloor {
        element: String,
        font_size: f64,
        min_font_size: f64,
        overflow: i32,
    },
    /// Two scenes of a timeline occupy overlapping time windows.
    SceneOverlap { first: String, second: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Upscale {
                factor,
                limit,
                source,
                target,
            } => write!(
                f,
                "upscale factor {:.2}x > {:.2}x (src={}x{} -> dst={}x{}), output may be blurry",
                factor, limit, source.width, source.height, target.width, target.height
            ),
            Diagnostic::UnsupportedRole { element, role } => {
                write!(f, "{element}: role '{role}' is not supported by the renderer yet")
            }
            Diagnostic::ProbeFailed { source, reason } => {
                write!(f, "could not probe '{source}': {reason}")
            }
            Diagnostic::ShrinkFloor {
                element,
                font_size,
                min_font_size,
                overflow,
            } => write!(
                f,
                "{element}: shrinking {font_size}px text stopped at {min_font_size}px, still overflows by {overflow}px"
            ),
            Diagnostic::SceneOverlap { first, second } => {
                write!(f, "scenes '{first}' and '{second}' overlap in time")
            }
        }
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Push the diagnostic if there is one.
    pub fn record(&mut self, diagnostic: Option<Diagnostic>) {
        if let Some(d) = diagnostic {
            self.0.push(d);
        }
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A resolved value together with the diagnostics raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Resolved<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}
