use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::color::Color;

pub const DEFAULT_SURFACE_SIZE: [u32; 2] = [640, 480];
pub const DEFAULT_BRUSH_WIDTH: u32 = 5;

/// Brush widths offered by the toolbar.
pub const BRUSH_PRESETS: [u32; 11] = [1, 2, 3, 5, 8, 12, 25, 35, 50, 75, 100];

/// Spray emits one batch of dots per period while the button is held.
pub const SPRAY_PERIOD: Duration = Duration::from_millis(25);
/// Brush area (in square pixels) covered per sprayed dot.
pub const SPRAY_AREA_PER_DOT: f32 = 30.0;

/// Text is never stamped smaller than this, whatever the brush width.
pub const MIN_TEXT_SIZE: u32 = 7;

/// Width of the frame drawn around the surface on screen.
pub const DISPLAY_BORDER: f32 = 1.0;

/// Toolbar state that survives restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorSettings {
    pub active_tool: String,
    pub brush_width: u32,
    pub brush_color: Color,
    pub surface_size: [u32; 2],
    /// What the text tool stamps on the next press.
    pub text: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            active_tool: crate::tools::LINE.to_owned(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            brush_color: Color::BLACK,
            surface_size: DEFAULT_SURFACE_SIZE,
            text: String::new(),
        }
    }
}

impl EditorSettings {
    /// Repairs values that a stale or hand-edited store could contain.
    pub fn sanitized(mut self) -> Self {
        self.brush_width = self.brush_width.clamp(1, *BRUSH_PRESETS.last().unwrap_or(&100));
        if self.surface_size[0] == 0 || self.surface_size[1] == 0 {
            self.surface_size = DEFAULT_SURFACE_SIZE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_fixes_bad_values() {
        let s = EditorSettings {
            brush_width: 0,
            surface_size: [0, 10],
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.brush_width, 1);
        assert_eq!(s.surface_size, DEFAULT_SURFACE_SIZE);
    }

    #[test]
    fn test_default_tool_is_line() {
        assert_eq!(EditorSettings::default().active_tool, "Line");
    }
}
