use serde::{Deserialize, Serialize};

use scenery_core::geometry::downscale_to_fit;
use scenery_core::Size;
use scenery_ir::Style;

use crate::engine::{TextEngine, TextPlacement};
use crate::template::ElementLayout;

/// Content of a single template element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Text(String),
    /// Pre-rendered media of the given pixel size.
    Media(Size),
}

impl TextEngine<'_> {
    /// Place one element at its template size. Text is measured and padded
    /// but never shrunk; media only ever shrinks to fit the rect.
    pub fn layout_element(
        &self,
        element: &ElementLayout,
        payload: &Payload,
        style: &Style,
        duration: Option<f64>,
    ) -> TextPlacement {
        let px = element.font_size;
        let (content, mode, lines, with_plate) = match payload {
            Payload::Text(text) => {
                let block = self.measure_block(text, element.rect.width, px, style);
                (
                    Size::new(block.width, block.height),
                    Some(block.mode),
                    block.lines,
                    element.is_caption(),
                )
            }
            Payload::Media(size) => (downscale_to_fit(*size, element.rect), None, Vec::new(), false),
        };

        let (rect, plate) = self.place(element, content, style, with_plate);
        tracing::debug!("{}: placed at {}", element.id, rect);

        TextPlacement {
            element: element.id.clone(),
            rect,
            plate,
            h_align: element.align,
            v_align: element.v_align(),
            scale: 1.0,
            font_size: px,
            mode,
            lines,
            opacity: style.opacity,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{ApproxMeasurer, TextMode};
    use scenery_core::{HAlign, Rect};

    #[test]
    fn test_text_is_not_shrunk() {
        let m = ApproxMeasurer::monospace();
        let engine = TextEngine::new(&m);
        let el = ElementLayout::new("section_marker", Rect::new(0, 0, 800, 40), HAlign::Center, 50.0);
        let placed = engine.layout_element(&el, &Payload::Text("Part 2".into()), &Style::default(), Some(2.0));
        assert_eq!(placed.rect, Rect::new(310, 0, 180, 81));
        assert_eq!(placed.mode, Some(TextMode::Label));
        assert_eq!(placed.duration, Some(2.0));
        assert!(placed.plate.is_none());
    }

    #[test]
    fn test_media_is_downscaled() {
        let m = ApproxMeasurer::default();
        let engine = TextEngine::new(&m);
        let el = ElementLayout::new("equation", Rect::new(100, 100, 400, 200), HAlign::Center, 40.0);
        let placed = engine.layout_element(&el, &Payload::Media(Size::new(800, 200)), &Style::default(), None);
        // 800×200 → 400×100, centered both ways
        assert_eq!(placed.rect, Rect::new(100, 150, 400, 100));
        assert!(placed.mode.is_none());
        assert!(placed.lines.is_empty());
    }

    #[test]
    fn test_caption_media_has_no_plate() {
        let m = ApproxMeasurer::default();
        let engine = TextEngine::new(&m);
        let el = ElementLayout::new("captions", Rect::new(0, 0, 400, 200), HAlign::Center, 40.0);
        let media = engine.layout_element(&el, &Payload::Media(Size::new(100, 50)), &Style::default(), None);
        assert!(media.plate.is_none());
        let text = engine.layout_element(&el, &Payload::Text("Hi".into()), &Style::default(), None);
        assert!(text.plate.is_some());
    }
}
