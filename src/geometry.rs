use egui::{Pos2, Rect};
use std::ops::Add;

/// An integer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A unit step used when walking to a neighboring pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const NORTH: Direction = Direction { dx: 0, dy: -1 };
    pub const EAST: Direction = Direction { dx: 1, dy: 0 };
    pub const SOUTH: Direction = Direction { dx: 0, dy: 1 };
    pub const WEST: Direction = Direction { dx: -1, dy: 0 };

    /// 4-connected neighborhood, in the order the flood fill visits it.
    pub const CARDINAL: [Direction; 4] = [Self::NORTH, Self::EAST, Self::SOUTH, Self::WEST];
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, d: Direction) -> Point {
        Point::new(self.x + d.dx, self.y + d.dy)
    }
}

/// An axis-aligned rectangle in surface coordinates. `right()`/`bottom()` are exclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// Normalized rectangle spanned by two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            left,
            top,
            width: a.x.max(b.x) - left,
            height: a.y.max(b.y) - top,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with another rectangle; empty rectangles collapse to zero size.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        PixelRect::new(left, top, (right - left).max(0), (bottom - top).max(0))
    }
}

/// Where the surface is shown on screen.
///
/// `screen_rect` is the displayed box (border included); `surface_size` is the
/// buffer size in pixels. When the two differ the buffer is assumed to sit centered
/// inside the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub screen_rect: Rect,
    pub surface_size: [u32; 2],
}

impl ReferenceFrame {
    pub fn new(screen_rect: Rect, surface_size: [u32; 2]) -> Self {
        Self { screen_rect, surface_size }
    }

    /// Frame whose on-screen box matches the buffer exactly, anchored at `origin`.
    pub fn unscaled(origin: Pos2, surface_size: [u32; 2]) -> Self {
        let size = egui::vec2(surface_size[0] as f32, surface_size[1] as f32);
        Self::new(Rect::from_min_size(origin, size), surface_size)
    }

    /// `(displayed size - buffer size) / 2` per axis.
    pub fn centering_delta(&self) -> egui::Vec2 {
        egui::vec2(
            (self.screen_rect.width() - self.surface_size[0] as f32) / 2.0,
            (self.screen_rect.height() - self.surface_size[1] as f32) / 2.0,
        )
    }
}

/// Converts a raw device position into surface pixel coordinates.
///
/// Callers must not pass non-finite positions; the engine filters them out before dispatch.
pub fn to_surface_coords(raw: Pos2, frame: &ReferenceFrame) -> Point {
    debug_assert!(raw.x.is_finite() && raw.y.is_finite(), "non-finite pointer position");
    let delta = frame.centering_delta();
    let x = raw.x - frame.screen_rect.min.x - delta.x;
    let y = raw.y - frame.screen_rect.min.y - delta.y;
    Point::new(x.floor() as i32, y.floor() as i32)
}

/// Clamps each axis independently to `[left, right]` and `[top, bottom]`.
pub fn clamp_to_rect(point: Point, rect: &PixelRect) -> Point {
    Point::new(
        point.x.clamp(rect.left, rect.right().max(rect.left)),
        point.y.clamp(rect.top, rect.bottom().max(rect.top)),
    )
}

/// Clamps to `[0, width] x [0, height]`. The upper bound is the dimension itself,
/// which is a valid rectangle edge but not a readable pixel.
pub fn clamp_to_surface(point: Point, width: u32, height: u32) -> Point {
    clamp_to_rect(point, &PixelRect::new(0, 0, width as i32, height as i32))
}

/// Display-space clamp used for live previews.
pub fn clamp_pos_to_rect(pos: Pos2, rect: Rect) -> Pos2 {
    rect.clamp(pos)
}
