use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use ab_glyph::FontArc;

use crate::color::Color;
use crate::document::{decode_image, Document};
use crate::engine::ToolEngine;
use crate::error::DocumentError;
use crate::event::EditorEvent;
use crate::input::InputHandler;
use crate::settings::EditorSettings;
use crate::surface::{PixelSurface, ReadAccess};
use crate::tools::{SprayTool, TextTool, ToolRegistry};

/// Where "Export PNG" writes.
pub const EXPORT_PATH: &str = "raster_paint.png";

/// Oldest notices are dropped past this many.
pub const MAX_NOTICES: usize = 20;

type LoadResult = Result<PixelSurface, DocumentError>;

pub struct PaintApp {
    pub(crate) settings: EditorSettings,
    pub(crate) document: Document,
    pub(crate) engine: ToolEngine,
    pub(crate) input: InputHandler,
    /// Text the text tool reads when it prompts.
    prompt_text: Rc<RefCell<String>>,
    pub(crate) texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
    last_frame: Option<Instant>,
    pub(crate) notices: Vec<String>,
    pending_load: Option<Receiver<LoadResult>>,
}

/// egui's bundled proportional font, reused for stamping text onto the surface.
fn default_font() -> Option<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let data = definitions.font_data.get("Ubuntu-Light")?;
    match FontArc::try_from_vec(data.font.to_vec()) {
        Ok(font) => Some(font),
        Err(err) => {
            log::error!("failed to parse default font: {err}");
            None
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<EditorSettings>(storage, eframe::APP_KEY))
            .unwrap_or_default()
            .sanitized();
        Self::with_settings(settings, default_font())
    }

    pub fn with_settings(settings: EditorSettings, font: Option<FontArc>) -> Self {
        let prompt_text = Rc::new(RefCell::new(settings.text.clone()));
        let shared = Rc::clone(&prompt_text);
        let prompt = move |_: &str| -> Option<String> { Some(shared.borrow().clone()) };
        let registry = ToolRegistry::standard(TextTool::new(Box::new(prompt), font), SprayTool::new());

        let [w, h] = settings.surface_size;
        let mut document = Document::new(w, h, Color::WHITE);
        document.context.color = settings.brush_color;
        document.context.brush_width = settings.brush_width;

        log::info!("starting with a {w}x{h} surface, tool {:?}", settings.active_tool);
        Self {
            settings,
            document,
            engine: ToolEngine::new(registry),
            input: InputHandler::new(egui::Rect::NOTHING),
            prompt_text,
            texture: None,
            uploaded_revision: None,
            last_frame: None,
            notices: Vec::new(),
            pending_load: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Pushes toolbar values into the drawing context before any tool runs.
    pub(crate) fn sync_toolbar(&mut self) {
        self.document.context.color = self.settings.brush_color;
        self.document.context.brush_width = self.settings.brush_width;
        *self.prompt_text.borrow_mut() = self.settings.text.clone();
    }

    /// Runs queued pointer events and timer ticks through the engine.
    pub(crate) fn run_input(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let elapsed = self.last_frame.map(|t| now - t).unwrap_or_default();
        self.last_frame = Some(now);

        for event in self.input.process_input(ctx) {
            self.engine
                .handle_event(&event, &self.settings.active_tool, &mut self.document);
        }
        self.engine.tick(elapsed, &mut self.document);
        if self.engine.is_dragging() {
            ctx.request_repaint();
        }
    }

    /// Applies what the core reported back to the toolbar.
    pub(crate) fn apply_events(&mut self) {
        for event in self.document.drain_events() {
            match event {
                EditorEvent::Notice { message } => self.push_notice(message),
                EditorEvent::ColorSampled { color, hex } => {
                    log::info!("picked {hex}");
                    self.settings.brush_color = color;
                }
                EditorEvent::SurfaceReplaced { width, height } => {
                    self.settings.surface_size = [width, height];
                }
            }
        }
    }

    fn push_notice(&mut self, message: String) {
        self.notices.push(message);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }

    /// Re-uploads the surface texture when the buffer changed.
    pub(crate) fn refresh_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        let surface = self.document.surface();
        if self.uploaded_revision != Some(surface.revision()) || self.texture.is_none() {
            let [w, h] = surface.size();
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [w as usize, h as usize],
                &surface.display_rgba(),
            );
            self.uploaded_revision = Some(surface.revision());
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("surface", image, egui::TextureOptions::NEAREST));
                }
            }
        }
        self.texture.as_ref().map(|texture| texture.id())
    }

    pub(crate) fn new_surface(&mut self) {
        let [w, h] = self.settings.surface_size;
        self.document.replace_surface(PixelSurface::new(w, h, Color::WHITE));
    }

    pub(crate) fn export(&mut self) {
        if let Err(err) = self.document.save_png(Path::new(EXPORT_PATH)) {
            self.document.notify(format!("Can't save: {err}"));
        }
    }

    /// Starts decoding dropped files on a worker thread.
    fn check_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        let repaint = ctx.clone();
        std::thread::spawn(move || {
            let result = match (&file.bytes, &file.path) {
                (Some(bytes), _) => decode_image(bytes, ReadAccess::Readable),
                (None, Some(path)) => std::fs::read(path)
                    .map_err(DocumentError::from)
                    .and_then(|bytes| decode_image(&bytes, ReadAccess::Readable)),
                (None, None) => Err(DocumentError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("dropped file {:?} has no data", file.name),
                ))),
            };
            if tx.send(result).is_ok() {
                repaint.request_repaint();
            }
        });
        self.pending_load = Some(rx);
    }

    /// Swaps in a decoded image, if one has arrived.
    fn poll_pending_load(&mut self) {
        let Some(rx) = &self.pending_load else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(surface)) => {
                self.document.replace_surface(surface);
                self.pending_load = None;
            }
            Ok(Err(err)) => {
                log::error!("failed to load image: {err}");
                self.document.notify(format!("Can't open image: {err}"));
                self.pending_load = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.pending_load = None,
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_dropped_files(ctx);
        self.poll_pending_load();

        crate::panels::tools_panel(self, ctx);
        crate::panels::central_panel(self, ctx);

        self.apply_events();
    }
}
