use egui::{Pos2, Rect};

use crate::document::Document;
use crate::drag::{DragHandler, DragSession, PointerChannel};
use crate::geometry::{clamp_pos_to_rect, clamp_to_surface, PixelRect, Point};
use crate::input::InputLocation;

use super::{Tool, RECTANGLE};

/// Drag out a box; one filled rectangle is committed on release.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleTool;

struct RectangleDrag {
    start: Point,
    start_screen: Pos2,
}

impl RectangleDrag {
    fn preview(&self, current: Pos2, screen: Rect) -> Rect {
        Rect::from_two_pos(
            clamp_pos_to_rect(self.start_screen, screen),
            clamp_pos_to_rect(current, screen),
        )
    }
}

impl DragHandler for RectangleDrag {
    fn on_move(&mut self, location: &InputLocation, doc: &mut Document) {
        let screen = doc.frame().screen_rect;
        doc.set_preview(Some(self.preview(location.position, screen)));
    }

    fn on_end(&mut self, location: &InputLocation, doc: &mut Document) {
        doc.set_preview(None);
        let [w, h] = doc.surface().size();
        let end = clamp_to_surface(doc.to_surface(location), w, h);
        let start = clamp_to_surface(self.start, w, h);
        let rect = PixelRect::from_corners(start, end);
        if rect.is_empty() {
            return;
        }
        let ctx = doc.context;
        doc.surface_mut().fill_rect(rect, ctx.color, ctx.composite);
    }
}

impl Tool for RectangleTool {
    fn name(&self) -> &'static str {
        RECTANGLE
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        channel: &PointerChannel,
    ) -> Option<DragSession> {
        let handler = RectangleDrag {
            start: doc.to_surface(press),
            start_screen: press.position,
        };
        Some(DragSession::start(channel, Box::new(handler)))
    }
}
