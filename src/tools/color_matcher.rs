use crate::document::Document;
use crate::drag::{DragSession, PointerChannel};
use crate::event::EditorEvent;
use crate::input::InputLocation;
use crate::surface::RasterAccess;

use super::{Tool, COLOR_MATCHER};

/// Takes the brush color from the pixel under the pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorMatcherTool;

impl Tool for ColorMatcherTool {
    fn name(&self) -> &'static str {
        COLOR_MATCHER
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        _channel: &PointerChannel,
    ) -> Option<DragSession> {
        let pos = doc.to_surface(press);
        if !doc.surface().contains(pos) {
            log::debug!("color pick at {pos:?} is outside the surface");
            return None;
        }
        match doc.surface().get_pixel(pos.x as u32, pos.y as u32) {
            Ok(sampled) => {
                // the paint color carries no alpha
                let color = sampled.opaque();
                doc.context.color = color;
                doc.emit(EditorEvent::ColorSampled {
                    color,
                    hex: color.to_hex_string(),
                });
            }
            Err(err) => doc.notify(format!("Unable to pick color: {err}")),
        }
        None
    }
}
