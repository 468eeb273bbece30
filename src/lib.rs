#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod document;
pub mod drag;
pub mod engine;
pub mod error;
pub mod event;
pub mod flood_fill;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod settings;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use color::{Color, CompositeMode};
pub use document::{Document, ToolContext};
pub use drag::{DragHandler, DragSession, PointerChannel, Subscription};
pub use engine::ToolEngine;
pub use error::{DocumentError, SurfaceError};
pub use event::EditorEvent;
pub use flood_fill::{flood_fill, FillReport};
pub use geometry::{Point, PixelRect, ReferenceFrame};
pub use input::{InputEvent, InputLocation};
pub use settings::EditorSettings;
pub use surface::{PixelSurface, RasterAccess, ReadAccess};
pub use tools::{Tool, ToolRegistry};
