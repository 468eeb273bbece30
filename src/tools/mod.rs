use std::collections::BTreeMap;

use crate::document::Document;
use crate::drag::{DragSession, PointerChannel};
use crate::input::InputLocation;

pub const LINE: &str = "Line";
pub const ERASE: &str = "Erase";
pub const RECTANGLE: &str = "Rectangle";
pub const SPRAY: &str = "Spray";
pub const TEXT: &str = "Text";
pub const COLOR_MATCHER: &str = "Pick color";
pub const FILL: &str = "Fill";

/// A tool reacts to a primary-button press on the canvas.
///
/// It either changes the document right away and returns `None`, or opens one
/// drag session that keeps working until the button is released.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Handle pointer press on the canvas.
    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        channel: &PointerChannel,
    ) -> Option<DragSession>;
}

/// Name → tool table. Built once; no tools are added or removed afterwards.
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Box<dyn Tool>>,
    order: Vec<&'static str>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").field("tools", &self.order).finish()
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Every built-in tool, in toolbar order.
    pub fn standard(text: TextTool, spray: SprayTool) -> Self {
        Self::builder()
            .with(LineTool)
            .with(EraseTool)
            .with(text)
            .with(spray)
            .with(RectangleTool)
            .with(ColorMatcherTool)
            .with(FillTool)
            .build()
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Tool + 'static)> {
        self.tools.get_mut(name).map(|tool| tool.as_mut())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }
}

#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: BTreeMap<&'static str, Box<dyn Tool>>,
    order: Vec<&'static str>,
}

impl ToolRegistryBuilder {
    /// Registers a tool under its own name. A later tool with the same name wins.
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        let name = tool.name();
        if self.tools.insert(name, Box::new(tool)).is_some() {
            log::warn!("tool {name:?} registered twice; keeping the last one");
        } else {
            self.order.push(name);
        }
        self
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            order: self.order,
        }
    }
}

mod color_matcher;
mod fill;
mod line;
mod rectangle;
mod spray;
mod text;

pub use color_matcher::ColorMatcherTool;
pub use fill::FillTool;
pub use line::{EraseTool, LineTool};
pub use rectangle::RectangleTool;
pub use spray::{dots_per_tick, random_point_in_radius, SprayTool};
pub use text::{font_size_for, TextPrompt, TextTool};
