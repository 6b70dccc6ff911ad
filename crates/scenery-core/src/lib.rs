//! # scenery-core
//!
//! Core types and primitives for the scenery resolution engine.
//! This crate contains the foundations shared by every scenery crate:
//! pixel rects, canvas metadata, safe-area geometry, color parsing,
//! diagnostics, configuration and error types.

pub mod canvas;
pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod math;

pub use config::*;

pub use canvas::{CanvasMeta, FontType, SafeBox};
pub use color::{Color, ColorError, ColorInfo, ColorValue};
pub use diagnostics::{Diagnostic, Diagnostics, Resolved};
pub use error::{SceneError, SceneResult};
pub use geometry::{FitMode, HAlign, VAlign};
pub use math::{Point, Rect, Size};
