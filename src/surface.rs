use crate::color::{Color, CompositeMode};
use crate::error::SurfaceError;
use crate::geometry::{PixelRect, Point};

/// Whether pixel values may be read back out of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadAccess {
    #[default]
    Readable,
    /// Pixels came from a foreign origin; they can be shown but not sampled or exported.
    Locked,
}

/// Per-pixel read/write access used by the flood fill.
pub trait RasterAccess {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Panics if `(x, y)` is outside the surface.
    fn get_pixel(&self, x: u32, y: u32) -> Result<Color, SurfaceError>;

    /// Panics if `(x, y)` is outside the surface.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// A fixed-size RGBA raster.
///
/// Width, height and pixel data only ever change together, through [`PixelSurface::replace`].
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    access: ReadAccess,
    revision: u64,
}

impl PixelSurface {
    /// Creates a surface filled with `fill`. Zero-sized surfaces are a programmer error.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        assert!(width > 0 && height > 0, "surface must be at least 1x1, got {width}x{height}");
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
            access: ReadAccess::Readable,
            revision: 0,
        }
    }

    /// Builds a surface from tightly packed RGBA bytes.
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: &[u8],
        access: ReadAccess,
    ) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySurface { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SurfaceError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| Color::rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            access,
            revision: 0,
        })
    }

    /// Swaps in a whole new buffer. The revision keeps counting so observers notice the change.
    pub fn replace(&mut self, mut other: PixelSurface) {
        other.revision = self.revision + 1;
        *self = other;
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    pub fn read_access(&self) -> ReadAccess {
        self.access
    }

    /// Incremented by every mutating operation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} surface",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Fills `rect` (clipped to the surface) with `color` under `mode`.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color, mode: CompositeMode) {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return;
        }
        for y in clipped.top..clipped.bottom() {
            for x in clipped.left..clipped.right() {
                let i = self.index(x as u32, y as u32);
                self.pixels[i] = mode.apply(color, self.pixels[i], 1.0);
            }
        }
        self.revision += 1;
    }

    /// Draws a segment of the given width with round caps between two pixel positions.
    ///
    /// A pixel is covered when its center lies within `width / 2` of the segment
    /// joining the centers of `from` and `to`.
    pub fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        width: f32,
        color: Color,
        mode: CompositeMode,
    ) {
        let radius = (width / 2.0).max(0.5);
        let (ax, ay) = (from.x as f32 + 0.5, from.y as f32 + 0.5);
        let (bx, by) = (to.x as f32 + 0.5, to.y as f32 + 0.5);
        let (dx, dy) = (bx - ax, by - ay);
        let len_sq = dx * dx + dy * dy;

        let reach = radius.ceil() as i32;
        let area = PixelRect::from_corners(
            Point::new(from.x.min(to.x) - reach, from.y.min(to.y) - reach),
            Point::new(from.x.max(to.x) + reach + 1, from.y.max(to.y) + reach + 1),
        )
        .intersect(&self.bounds());

        let mut touched = false;
        for y in area.top..area.bottom() {
            for x in area.left..area.right() {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (cx, cy) = (ax + t * dx, ay + t * dy);
                let dist_sq = (px - cx) * (px - cx) + (py - cy) * (py - cy);
                if dist_sq <= radius * radius {
                    let i = self.index(x as u32, y as u32);
                    self.pixels[i] = mode.apply(color, self.pixels[i], 1.0);
                    touched = true;
                }
            }
        }
        if touched {
            self.revision += 1;
        }
    }

    /// Blends a coverage mask onto the surface. Positions outside the surface are skipped.
    pub fn stamp<I>(&mut self, coverage: I, color: Color, mode: CompositeMode)
    where
        I: IntoIterator<Item = (i32, i32, f32)>,
    {
        let mut touched = false;
        for (x, y, c) in coverage {
            if c <= 0.0 || !self.contains(Point::new(x, y)) {
                continue;
            }
            let i = self.index(x as u32, y as u32);
            self.pixels[i] = mode.apply(color, self.pixels[i], c);
            touched = true;
        }
        if touched {
            self.revision += 1;
        }
    }

    /// Packed RGBA bytes for export. Fails on a locked surface.
    pub fn to_rgba(&self) -> Result<Vec<u8>, SurfaceError> {
        if self.access == ReadAccess::Locked {
            return Err(SurfaceError::AccessDenied);
        }
        Ok(self.display_rgba())
    }

    /// Packed RGBA bytes for putting on screen. Showing a locked surface is allowed.
    pub fn display_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }
}

impl RasterAccess for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        let i = self.index(x, y);
        match self.access {
            ReadAccess::Readable => Ok(self.pixels[i]),
            ReadAccess::Locked => Err(SurfaceError::AccessDenied),
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
        self.revision += 1;
    }
}
