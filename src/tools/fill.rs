use crate::document::Document;
use crate::drag::{DragSession, PointerChannel};
use crate::flood_fill::flood_fill;
use crate::input::InputLocation;

use super::{Tool, FILL};

/// Flood fills the region under the pointer with the brush color.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillTool;

impl Tool for FillTool {
    fn name(&self) -> &'static str {
        FILL
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        _channel: &PointerChannel,
    ) -> Option<DragSession> {
        let origin = doc.to_surface(press);
        if !doc.surface().contains(origin) {
            log::debug!("fill at {origin:?} is outside the surface");
            return None;
        }
        let color = doc.context.color;
        if let Err(err) = flood_fill(doc.surface_mut(), origin, color) {
            doc.notify(format!("Unable to fill: {err}"));
        }
        None
    }
}
