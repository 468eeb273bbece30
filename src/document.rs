use std::io::Cursor;

use egui::{Pos2, Rect};

use crate::color::{Color, CompositeMode};
use crate::error::{DocumentError, SurfaceError};
use crate::event::EditorEvent;
use crate::geometry::{to_surface_coords, Point, ReferenceFrame};
use crate::input::InputLocation;
use crate::surface::{PixelSurface, ReadAccess};

/// Drawing state shared by every tool invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolContext {
    /// Stroke and fill color.
    pub color: Color,
    pub brush_width: u32,
    pub composite: CompositeMode,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            brush_width: crate::settings::DEFAULT_BRUSH_WIDTH,
            composite: CompositeMode::Normal,
        }
    }
}

/// The surface being edited plus everything tools need to act on it.
#[derive(Debug)]
pub struct Document {
    surface: PixelSurface,
    pub context: ToolContext,
    screen_rect: Rect,
    preview: Option<Rect>,
    events: Vec<EditorEvent>,
}

impl Document {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self::from_surface(PixelSurface::new(width, height, background))
    }

    pub fn from_surface(surface: PixelSurface) -> Self {
        let [w, h] = surface.size();
        Self {
            screen_rect: Rect::from_min_size(Pos2::ZERO, egui::vec2(w as f32, h as f32)),
            surface,
            context: ToolContext::default(),
            preview: None,
            events: Vec::new(),
        }
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    /// Where the surface currently sits on screen, border included.
    pub fn set_screen_rect(&mut self, rect: Rect) {
        self.screen_rect = rect;
    }

    pub fn frame(&self) -> ReferenceFrame {
        ReferenceFrame::new(self.screen_rect, self.surface.size())
    }

    /// Maps a pointer location into surface coordinates.
    pub fn to_surface(&self, location: &InputLocation) -> Point {
        to_surface_coords(location.position, &self.frame())
    }

    /// Live shape preview in screen coordinates.
    pub fn preview(&self) -> Option<Rect> {
        self.preview
    }

    pub fn set_preview(&mut self, rect: Option<Rect>) {
        self.preview = rect;
    }

    pub fn emit(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    /// Queues a user-visible notice.
    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.emit(EditorEvent::Notice { message });
    }

    pub fn pending_events(&self) -> &[EditorEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swaps in a new surface.
    ///
    /// The tool context lives on the document, not the surface, so the brush
    /// color and width carry over unchanged.
    pub fn replace_surface(&mut self, surface: PixelSurface) {
        let [width, height] = surface.size();
        self.surface.replace(surface);
        self.preview = None;
        log::info!("surface replaced with {width}x{height} image");
        self.emit(EditorEvent::SurfaceReplaced { width, height });
    }

    /// Decodes `bytes` and replaces the surface with the result.
    pub fn load_image(&mut self, bytes: &[u8], access: ReadAccess) -> Result<(), DocumentError> {
        let surface = decode_image(bytes, access)?;
        self.replace_surface(surface);
        Ok(())
    }

    /// Encodes the current buffer as PNG. Read only.
    pub fn export_png(&self) -> Result<Vec<u8>, DocumentError> {
        let [width, height] = self.surface.size();
        let rgba = self.surface.to_rgba()?;
        let expected = rgba.len();
        let image = image::RgbaImage::from_raw(width, height, rgba).ok_or(
            SurfaceError::SizeMismatch {
                width,
                height,
                expected: width as usize * height as usize * 4,
                actual: expected,
            },
        )?;
        let mut out = Cursor::new(Vec::new());
        image
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(DocumentError::Encode)?;
        Ok(out.into_inner())
    }

    pub fn save_png(&self, path: &std::path::Path) -> Result<(), DocumentError> {
        let bytes = self.export_png()?;
        std::fs::write(path, bytes)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

/// Decodes an encoded image into a fresh surface. Safe to call off the UI thread.
pub fn decode_image(bytes: &[u8], access: ReadAccess) -> Result<PixelSurface, DocumentError> {
    let decoded = image::load_from_memory(bytes).map_err(DocumentError::Decode)?;
    log::debug!("decoded image: {}x{}", decoded.width(), decoded.height());
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelSurface::from_rgba(width, height, rgba.as_raw(), access)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterAccess;
    use egui::pos2;

    #[test]
    fn test_to_surface_uses_screen_rect() {
        let mut doc = Document::new(10, 10, Color::WHITE);
        doc.set_screen_rect(Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(12.0, 12.0)));
        let p = doc.to_surface(&InputLocation::new(pos2(101.0, 51.0), true));
        assert_eq!(p, Point::new(0, 0));
    }

    #[test]
    fn test_replace_keeps_brush() {
        let mut doc = Document::new(10, 10, Color::WHITE);
        doc.context.color = Color::RED;
        doc.context.brush_width = 12;
        doc.set_preview(Some(Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(1.0, 1.0))));
        doc.replace_surface(PixelSurface::new(3, 2, Color::BLUE));

        assert_eq!(doc.surface().size(), [3, 2]);
        assert_eq!(doc.context.color, Color::RED);
        assert_eq!(doc.context.brush_width, 12);
        assert_eq!(doc.preview(), None);
        assert_eq!(
            doc.drain_events(),
            vec![EditorEvent::SurfaceReplaced { width: 3, height: 2 }]
        );
        assert!(doc.pending_events().is_empty());
    }

    #[test]
    fn test_loaded_image_keeps_brush() {
        let png = Document::new(5, 5, Color::BLUE).export_png().unwrap();
        let mut doc = Document::new(2, 2, Color::WHITE);
        doc.context.color = Color::rgb(1, 2, 3);
        doc.context.brush_width = 35;
        doc.load_image(&png, ReadAccess::Readable).unwrap();

        assert_eq!(doc.surface().size(), [5, 5]);
        assert_eq!(doc.context.color, Color::rgb(1, 2, 3));
        assert_eq!(doc.context.brush_width, 35);
    }

    #[test]
    fn test_png_export_then_load() {
        let mut doc = Document::new(4, 3, Color::WHITE);
        doc.surface_mut().set_pixel(1, 2, Color::RED);
        let png = doc.export_png().unwrap();

        let mut other = Document::new(1, 1, Color::BLACK);
        other.load_image(&png, ReadAccess::Readable).unwrap();
        assert_eq!(other.surface().size(), [4, 3]);
        assert_eq!(other.surface().get_pixel(1, 2), Ok(Color::RED));
        assert_eq!(other.surface().get_pixel(0, 0), Ok(Color::WHITE));
    }

    #[test]
    fn test_locked_surface_cannot_export() {
        let png = Document::new(2, 2, Color::WHITE).export_png().unwrap();
        let mut doc = Document::new(1, 1, Color::WHITE);
        doc.load_image(&png, ReadAccess::Locked).unwrap();
        assert!(matches!(
            doc.export_png(),
            Err(DocumentError::Surface(SurfaceError::AccessDenied))
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let mut doc = Document::new(2, 2, Color::WHITE);
        let err = doc.load_image(b"not an image", ReadAccess::Readable).unwrap_err();
        assert!(matches!(err, DocumentError::Decode(_)));
        assert_eq!(doc.surface().size(), [2, 2]);
    }
}
