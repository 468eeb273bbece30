use std::time::Duration;

use egui::PointerButton;

use crate::document::Document;
use crate::drag::{DragSession, PointerChannel};
use crate::input::{InputEvent, InputLocation};
use crate::tools::ToolRegistry;

/// Routes pointer input to tools and owns the one active drag session.
///
/// The engine keeps no per-tool state of its own: whatever a stroke needs lives
/// in the drag session the tool opened.
#[derive(Debug)]
pub struct ToolEngine {
    registry: ToolRegistry,
    channel: PointerChannel,
    session: Option<DragSession>,
}

impl ToolEngine {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            channel: PointerChannel::new(),
            session: None,
        }
    }

    pub fn tool_names(&self) -> &[&'static str] {
        self.registry.names()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn channel(&self) -> &PointerChannel {
        &self.channel
    }

    /// Runs the press handler of `tool_name`. Unknown names are ignored.
    ///
    /// Returns whether a tool handled the press.
    pub fn dispatch(&mut self, press: &InputLocation, tool_name: &str, doc: &mut Document) -> bool {
        let Some(tool) = self.registry.get_mut(tool_name) else {
            log::warn!("no tool registered as {tool_name:?}; ignoring press");
            return false;
        };
        if let Some(session) = tool.on_press(press, doc, &self.channel) {
            log::debug!("{tool_name} opened a drag session");
            self.session = Some(session);
        }
        true
    }

    /// Feeds one pointer notification through the engine.
    pub fn handle_event(&mut self, event: &InputEvent, tool_name: &str, doc: &mut Document) {
        if !event.location().is_finite() {
            log::warn!("dropping pointer event with non-finite position: {event:?}");
            return;
        }
        match event {
            InputEvent::PointerDown {
                location,
                button: PointerButton::Primary,
            } => {
                if !location.is_in_canvas {
                    return;
                }
                if self.session.is_some() {
                    log::debug!("press while a drag is active; ignoring");
                    return;
                }
                self.dispatch(location, tool_name, doc);
            }
            InputEvent::PointerMove { location, .. } => {
                if let Some(session) = &mut self.session {
                    session.handle_move(location, doc);
                }
            }
            InputEvent::PointerUp {
                location,
                button: PointerButton::Primary,
            } => {
                if let Some(session) = self.session.take() {
                    session.finish(location, doc);
                }
            }
            _ => {}
        }
    }

    /// Advances timer-driven work (spray) by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration, doc: &mut Document) {
        if let Some(session) = &mut self.session {
            session.tick(elapsed, doc);
        }
    }
}
