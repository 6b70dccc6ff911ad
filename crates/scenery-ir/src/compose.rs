//! Compositing order.
//!
//! The background is always drawn first. Everything else is stably sorted by
//! its stacking key (`z_hint` for graphics, `layer` for text and presenter);
//! equal keys fall back to the category order background, illustration, text,
//! presenter, overlay, special.

use serde::Serialize;

use crate::role::Role;
use crate::scene::Scene;
use crate::spec::{Background, GraphicSpec, PresenterSpec, TextSpec};

/// One drawable of a scene, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawItem<'a> {
    Background(&'a Background),
    Graphic(&'a GraphicSpec),
    Text(&'a TextSpec),
    Presenter(&'a PresenterSpec),
}

impl DrawItem<'_> {
    /// Stacking key; higher draws on top. The scene background has no key
    /// and sorts below everything.
    pub fn stacking_key(&self) -> i32 {
        match self {
            DrawItem::Background(_) => i32::MIN,
            DrawItem::Graphic(g) => g.z_hint,
            DrawItem::Text(t) => t.layer,
            DrawItem::Presenter(p) => p.layer,
        }
    }

    fn tier(&self) -> u8 {
        match self {
            DrawItem::Background(_) => 0,
            DrawItem::Graphic(g) => match g.role {
                Role::Background => 0,
                Role::Illustration => 1,
                Role::Overlay => 4,
                Role::Special => 5,
            },
            DrawItem::Text(_) => 2,
            DrawItem::Presenter(_) => 3,
        }
    }

    /// Short label for logs and listings.
    pub fn label(&self) -> String {
        match self {
            DrawItem::Background(_) => "background".to_string(),
            DrawItem::Graphic(g) => match &g.src {
                Some(src) => format!("{} '{src}'", g.role),
                None if g.is_shape() => format!("{} shape", g.role),
                None => g.role.to_string(),
            },
            DrawItem::Text(t) => format!("text '{}'", t.slot_id),
            DrawItem::Presenter(p) => format!("presenter '{}'", p.src),
        }
    }
}

pub fn draw_order(scene: &Scene) -> Vec<DrawItem<'_>> {
    let mut items: Vec<DrawItem<'_>> = scene
        .graphics()
        .iter()
        .map(DrawItem::Graphic)
        .chain(scene.slots().iter().map(DrawItem::Text))
        .chain(scene.presenter().map(DrawItem::Presenter))
        .collect();
    items.sort_by_key(|item| (item.stacking_key(), item.tier()));

    let mut ordered = Vec::with_capacity(items.len() + 1);
    ordered.push(DrawItem::Background(scene.background()));
    ordered.extend(items);
    ordered
}
