use crate::color::Color;

/// Things the core tells the surrounding UI about.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A message the user should see, e.g. a failed pixel read.
    Notice { message: String },
    /// The color matcher picked a color; `hex` is the value for the color picker widget.
    ColorSampled { color: Color, hex: String },
    /// The surface was swapped for a loaded image.
    SurfaceReplaced { width: u32, height: u32 },
}
