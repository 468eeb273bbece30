//! Connected-region color replacement.

use crate::color::Color;
use crate::error::SurfaceError;
use crate::geometry::{Direction, Point};
use crate::surface::RasterAccess;

/// What a flood fill did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    /// Coordinates whose color was tested.
    pub visited: usize,
    /// Pixels written with the fill color.
    pub painted: usize,
}

/// Clamps a neighbor candidate to the last valid pixel on each axis.
fn clamp_to_pixels(p: Point, width: u32, height: u32) -> Point {
    Point::new(
        p.x.clamp(0, width as i32 - 1),
        p.y.clamp(0, height as i32 - 1),
    )
}

/// Replaces the 4-connected region of pixels sharing `origin`'s color with `fill`.
///
/// The region grows one wavefront at a time. Within a wavefront every member looks
/// at its neighbors in north, east, south, west order. Each coordinate is marked
/// visited before its color is read, so no coordinate is read twice.
///
/// A read failure aborts the fill. Pixels painted before the failure stay painted.
/// Filling a region that already has the fill color is a no-op.
///
/// Panics if `origin` lies outside the surface.
pub fn flood_fill<S>(surface: &mut S, origin: Point, fill: Color) -> Result<FillReport, SurfaceError>
where
    S: RasterAccess + ?Sized,
{
    let (width, height) = (surface.width(), surface.height());
    assert!(
        origin.x >= 0 && origin.y >= 0 && (origin.x as u32) < width && (origin.y as u32) < height,
        "fill origin {origin:?} outside {width}x{height} surface"
    );

    let index = |p: Point| p.y as usize * width as usize + p.x as usize;
    let mut report = FillReport::default();

    let match_color = surface.get_pixel(origin.x as u32, origin.y as u32)?;
    report.visited = 1;
    if match_color == fill {
        return Ok(report);
    }

    let mut visited = vec![false; width as usize * height as usize];
    visited[index(origin)] = true;
    surface.set_pixel(origin.x as u32, origin.y as u32, fill);
    report.painted = 1;

    let mut wavefront = vec![origin];
    while !wavefront.is_empty() {
        let mut next = Vec::new();
        for &pos in &wavefront {
            for dir in Direction::CARDINAL {
                let neighbor = clamp_to_pixels(pos + dir, width, height);
                let i = index(neighbor);
                if visited[i] {
                    continue;
                }
                visited[i] = true;
                report.visited += 1;

                let (x, y) = (neighbor.x as u32, neighbor.y as u32);
                if surface.get_pixel(x, y)? == match_color {
                    surface.set_pixel(x, y, fill);
                    report.painted += 1;
                    next.push(neighbor);
                }
            }
        }
        wavefront = next;
    }

    log::debug!(
        "flood fill from ({}, {}): visited {}, painted {}",
        origin.x,
        origin.y,
        report.visited,
        report.painted
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    #[test]
    fn test_single_pixel_surface() {
        let mut s = PixelSurface::new(1, 1, Color::WHITE);
        let report = flood_fill(&mut s, Point::new(0, 0), Color::RED).unwrap();
        assert_eq!(report, FillReport { visited: 1, painted: 1 });
        assert_eq!(s.get_pixel(0, 0), Ok(Color::RED));
    }

    #[test]
    fn test_same_color_is_noop() {
        let mut s = PixelSurface::new(3, 3, Color::RED);
        let report = flood_fill(&mut s, Point::new(1, 1), Color::RED).unwrap();
        assert_eq!(report.painted, 0);
        assert_eq!(s.revision(), 0);
    }

    #[test]
    fn test_edges_never_read_outside() {
        // Origin in a corner: west and north neighbors clamp back onto the origin itself.
        let mut s = PixelSurface::new(3, 2, Color::WHITE);
        let report = flood_fill(&mut s, Point::new(0, 0), Color::BLUE).unwrap();
        assert_eq!(report, FillReport { visited: 6, painted: 6 });
    }

    #[test]
    fn test_diagonal_neighbors_are_not_connected() {
        let mut s = PixelSurface::new(2, 2, Color::WHITE);
        s.set_pixel(1, 0, Color::BLACK);
        s.set_pixel(0, 1, Color::BLACK);
        flood_fill(&mut s, Point::new(0, 0), Color::RED).unwrap();
        assert_eq!(s.get_pixel(0, 0), Ok(Color::RED));
        assert_eq!(s.get_pixel(1, 1), Ok(Color::WHITE));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_origin_out_of_bounds_panics() {
        let mut s = PixelSurface::new(2, 2, Color::WHITE);
        let _ = flood_fill(&mut s, Point::new(2, 0), Color::RED);
    }
}
