use serde::Serialize;

use scenery_core::{HAlign, Point, Rect, Size, TextConfig, VAlign};
use scenery_ir::{ModeHint, Style};

use crate::measure::{wrap_lines, Padding, TextBlock, TextMeasurer, TextMode};
use crate::template::ElementLayout;

/// Translucent plate drawn behind caption text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionPlate {
    pub rect: Rect,
    pub pad: i32,
    pub opacity: f64,
}

/// Final placement of one text (or media) element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPlacement {
    pub element: String,
    /// Where the padded text block, or the media, is drawn.
    pub rect: Rect,
    pub plate: Option<CaptionPlate>,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Uniform rescale applied to the measured block.
    pub scale: f64,
    /// `font_size × scale`.
    pub font_size: f64,
    /// `None` for media payloads.
    pub mode: Option<TextMode>,
    pub lines: Vec<String>,
    pub opacity: f64,
    pub duration: Option<f64>,
}

/// Lays out text elements with a pluggable [`TextMeasurer`].
#[derive(Clone)]
pub struct TextEngine<'m> {
    measurer: &'m dyn TextMeasurer,
    config: TextConfig,
}

impl<'m> TextEngine<'m> {
    pub fn new(measurer: &'m dyn TextMeasurer) -> Self {
        Self {
            measurer,
            config: TextConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TextConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer
    }

    /// Wrap when the style asks for it, or, without a hint, when the text
    /// spans several lines or is longer than the wrap threshold.
    pub fn choose_mode(&self, text: &str, style: &Style) -> TextMode {
        match style.mode_hint {
            Some(ModeHint::Wrap) => TextMode::Wrap,
            Some(ModeHint::Label) => TextMode::Label,
            None if text.contains('\n')
                || text.chars().count() > self.config.wrap_threshold =>
            {
                TextMode::Wrap
            }
            None => TextMode::Label,
        }
    }

    /// Measure `text` at `font_size` for a target `width` and add padding.
    ///
    /// Wrapped blocks take the full target width; labels take the width of
    /// their longest line.
    pub fn measure_block(&self, text: &str, width: i32, font_size: f64, style: &Style) -> TextBlock {
        let mode = self.choose_mode(text, style);
        let (lines, block_width) = match mode {
            TextMode::Wrap => (
                wrap_lines(text, width as f64, font_size, self.measurer),
                width,
            ),
            TextMode::Label => {
                let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
                let widest = lines
                    .iter()
                    .map(|l| self.measurer.advance(l, font_size))
                    .fold(0.0, f64::max);
                (lines, widest.ceil() as i32)
            }
        };

        let n = lines.len().max(1) as f64;
        let content = n * self.measurer.line_height(font_size) + (n - 1.0) * style.interline as f64;
        let padding = Padding::for_font(font_size, style);

        TextBlock {
            mode,
            lines,
            font_size,
            width: block_width.max(1),
            height: content.ceil() as i32 + padding.total(),
            padding,
        }
    }

    /// Position `content` in the element rect, behind a caption plate when
    /// `with_plate` is set. Returns the content rect and the plate.
    pub(crate) fn place(
        &self,
        element: &ElementLayout,
        content: Size,
        style: &Style,
        with_plate: bool,
    ) -> (Rect, Option<CaptionPlate>) {
        let v_align = element.v_align();
        if !with_plate {
            let origin = place_block(element.rect, content, element.align, v_align);
            return (Rect::new(origin.x, origin.y, content.width, content.height), None);
        }

        let pad = style.pad.max(self.config.caption_pad);
        let outer = Size::new(content.width + 2 * pad, content.height + 2 * pad);
        let origin = place_block(element.rect, outer, element.align, v_align);
        let plate = CaptionPlate {
            rect: Rect::new(origin.x, origin.y, outer.width, outer.height),
            pad,
            opacity: self.config.caption_opacity,
        };
        let rect = Rect::new(origin.x + pad, origin.y + pad, content.width, content.height);
        (rect, Some(plate))
    }
}

/// Top-left corner of a block of `size` aligned inside `rect`. Oversized
/// blocks stick to the left/top edge.
pub fn place_block(rect: Rect, size: Size, h_align: HAlign, v_align: VAlign) -> Point {
    let x = match h_align {
        HAlign::Left => rect.x,
        HAlign::Center => rect.x + ((rect.width - size.width) / 2).max(0),
        HAlign::Right => rect.x + (rect.width - size.width).max(0),
    };
    let y = match v_align {
        VAlign::Top => rect.y,
        VAlign::Center => rect.y + ((rect.height - size.height) / 2).max(0),
        VAlign::Bottom => rect.y + (rect.height - size.height).max(0),
    };
    Point::new(x, y)
}
