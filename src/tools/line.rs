use crate::color::CompositeMode;
use crate::document::Document;
use crate::drag::{DragHandler, DragSession, PointerChannel};
use crate::geometry::Point;
use crate::input::InputLocation;

use super::{Tool, ERASE, LINE};

/// Freehand stroke: a round-capped segment from each sample to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTool;

/// Like [`LineTool`], but strokes remove paint instead of adding it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EraseTool;

struct StrokeDrag {
    last: Point,
    /// Composite mode to put back when the stroke ends.
    restore: Option<CompositeMode>,
}

impl DragHandler for StrokeDrag {
    fn on_move(&mut self, location: &InputLocation, doc: &mut Document) {
        let pos = doc.to_surface(location);
        let ctx = doc.context;
        doc.surface_mut()
            .stroke_segment(self.last, pos, ctx.brush_width as f32, ctx.color, ctx.composite);
        self.last = pos;
    }

    fn on_end(&mut self, _location: &InputLocation, doc: &mut Document) {
        if let Some(mode) = self.restore.take() {
            doc.context.composite = mode;
        }
    }
}

fn start_stroke(
    press: &InputLocation,
    doc: &Document,
    channel: &PointerChannel,
    restore: Option<CompositeMode>,
) -> DragSession {
    let handler = StrokeDrag {
        last: doc.to_surface(press),
        restore,
    };
    DragSession::start(channel, Box::new(handler))
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        LINE
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        channel: &PointerChannel,
    ) -> Option<DragSession> {
        Some(start_stroke(press, doc, channel, None))
    }
}

impl Tool for EraseTool {
    fn name(&self) -> &'static str {
        ERASE
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        channel: &PointerChannel,
    ) -> Option<DragSession> {
        doc.context.composite = CompositeMode::Erase;
        Some(start_stroke(press, doc, channel, Some(CompositeMode::Normal)))
    }
}
