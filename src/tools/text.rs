use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};

use crate::document::Document;
use crate::drag::{DragSession, PointerChannel};
use crate::geometry::Point;
use crate::input::InputLocation;
use crate::settings::MIN_TEXT_SIZE;

use super::{Tool, TEXT};

/// Asks the user for the text to stamp. `None` means the user cancelled.
pub trait TextPrompt {
    fn prompt(&mut self, message: &str) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt(&mut self, message: &str) -> Option<String> {
        self(message)
    }
}

/// Pixel size used for text: the brush width, but never below [`MIN_TEXT_SIZE`].
pub fn font_size_for(brush_width: u32) -> u32 {
    brush_width.max(MIN_TEXT_SIZE)
}

/// Stamps a line of text with its baseline starting at the press point.
pub struct TextTool {
    prompt: Box<dyn TextPrompt>,
    font: Option<FontArc>,
}

impl std::fmt::Debug for TextTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextTool")
            .field("has_font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl TextTool {
    pub fn new(prompt: Box<dyn TextPrompt>, font: Option<FontArc>) -> Self {
        Self { prompt, font }
    }
}

/// Coverage of `text` laid out on one line, baseline-left at `origin`.
fn rasterize(font: &FontArc, text: &str, size: f32, origin: Point) -> Vec<(i32, i32, f32)> {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut caret = point(origin.x as f32, origin.y as f32);
    let mut previous: Option<GlyphId> = None;
    let mut coverage = Vec::new();

    for ch in text.chars().filter(|c| !c.is_control()) {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scaled.scale(), caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x.floor() as i32, bounds.min.y.floor() as i32);
            outlined.draw(|gx, gy, c| coverage.push((left + gx as i32, top + gy as i32, c)));
        }
    }
    coverage
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        TEXT
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        _channel: &PointerChannel,
    ) -> Option<DragSession> {
        let text = self.prompt.prompt("Text:")?;
        if text.is_empty() {
            return None;
        }
        let Some(font) = &self.font else {
            doc.notify("No font is available for the text tool");
            return None;
        };

        let size = font_size_for(doc.context.brush_width);
        let origin = doc.to_surface(press);
        let coverage = rasterize(font, &text, size as f32, origin);
        let ctx = doc.context;
        doc.surface_mut().stamp(coverage, ctx.color, ctx.composite);
        log::debug!("stamped {text:?} at {}px", size);
        None
    }
}
