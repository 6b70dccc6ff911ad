//! # scenery-ir
//!
//! The scenery scene model: loosely-typed authoring records, the role policy
//! applied to graphics, the normalizer that turns records into resolved
//! [`Scene`]s, and the compositing order of a scene's drawables.

pub mod builder;
pub mod compose;
pub mod normalize;
pub mod probe;
pub mod raw;
pub mod role;
pub mod scene;
pub mod spec;
pub mod timeline;
pub mod validate;

pub use compose::DrawItem;
pub use normalize::{build_scene, Normalizer};
pub use probe::{MediaInfo, MediaKind, MediaProber, MediaTable, ProbeError};
pub use raw::{RawGraphic, RawLayout, RawPresenter, RawScene, RawSlot, RawStyle, RawTimeline};
pub use role::{validate_graphic, Role, RolePolicy};
pub use scene::Scene;
pub use spec::{
    Background, Fonts, GraphicSpec, Layout, ModeHint, MotionSpec, PresenterShape, PresenterSpec,
    Style, TextPayload, TextSpec,
};
pub use timeline::Timeline;
pub use validate::validate_scenes;
