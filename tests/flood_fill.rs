use std::cell::RefCell;
use std::collections::HashMap;

use raster_paint::{flood_fill, Color, FillReport, PixelSurface, Point, RasterAccess, SurfaceError};

/// Wraps a surface and records every read per coordinate.
struct CountingSurface {
    inner: PixelSurface,
    reads: RefCell<HashMap<(u32, u32), usize>>,
    /// Reads after this many start failing.
    fail_after: Option<usize>,
}

impl CountingSurface {
    fn new(inner: PixelSurface) -> Self {
        Self {
            inner,
            reads: RefCell::new(HashMap::new()),
            fail_after: None,
        }
    }

    fn total_reads(&self) -> usize {
        self.reads.borrow().values().sum()
    }
}

impl RasterAccess for CountingSurface {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn get_pixel(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        if let Some(limit) = self.fail_after {
            if self.total_reads() >= limit {
                return Err(SurfaceError::AccessDenied);
            }
        }
        *self.reads.borrow_mut().entry((x, y)).or_insert(0) += 1;
        self.inner.get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.inner.set_pixel(x, y, color);
    }
}

const RED: Color = Color::rgba(255, 0, 0, 255);
const WHITE: Color = Color::rgba(255, 255, 255, 255);
const BLUE: Color = Color::rgba(0, 0, 255, 255);

fn all_pixels(s: &PixelSurface) -> Vec<Color> {
    let mut out = Vec::new();
    for y in 0..s.height() {
        for x in 0..s.width() {
            out.push(s.get_pixel(x, y).unwrap());
        }
    }
    out
}

#[test]
fn test_fill_uniform_surface() {
    let mut s = PixelSurface::new(5, 5, WHITE);
    let report = flood_fill(&mut s, Point::new(2, 2), RED).unwrap();
    assert_eq!(report, FillReport { visited: 25, painted: 25 });
    assert!(all_pixels(&s).iter().all(|c| *c == RED));
}

#[test]
fn test_fill_stops_at_boundary_column() {
    let mut s = PixelSurface::new(5, 5, WHITE);
    for y in 0..5 {
        s.set_pixel(2, y, BLUE);
    }
    let report = flood_fill(&mut s, Point::new(0, 0), RED).unwrap();
    assert_eq!(report.painted, 10);

    for y in 0..5 {
        for x in 0..5 {
            let expected = match x {
                0 | 1 => RED,
                2 => BLUE,
                _ => WHITE,
            };
            assert_eq!(s.get_pixel(x, y), Ok(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_second_fill_changes_nothing() {
    let mut s = PixelSurface::new(6, 4, WHITE);
    s.set_pixel(3, 0, BLUE);
    s.set_pixel(3, 1, BLUE);
    flood_fill(&mut s, Point::new(0, 3), RED).unwrap();
    let before = all_pixels(&s);
    let revision = s.revision();

    let report = flood_fill(&mut s, Point::new(0, 3), RED).unwrap();
    assert_eq!(report.painted, 0);
    assert_eq!(s.revision(), revision);
    assert_eq!(all_pixels(&s), before);
}

#[test]
fn test_only_matching_connected_pixels_change() {
    // A ring of blue around a white hole, with a white pixel outside the ring.
    let rows = [
        "WWWWWWW",
        "WBBBBBW",
        "WBWWWBW",
        "WBWWWBW",
        "WBBBBBW",
        "WWWWWWW",
    ];
    let mut s = PixelSurface::new(7, 6, WHITE);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == 'B' {
                s.set_pixel(x as u32, y as u32, BLUE);
            }
        }
    }
    let original = all_pixels(&s);
    flood_fill(&mut s, Point::new(3, 2), RED).unwrap();

    for (i, (before, after)) in original.iter().zip(all_pixels(&s)).enumerate() {
        let (x, y) = (i % 7, i / 7);
        let inside_hole = (2..=4).contains(&x) && (2..=3).contains(&y);
        if inside_hole {
            assert_eq!(after, RED, "hole pixel ({x}, {y})");
        } else {
            assert_eq!(after, *before, "pixel ({x}, {y}) should be untouched");
        }
    }
}

#[test]
fn test_each_coordinate_read_at_most_once() {
    let mut inner = PixelSurface::new(9, 7, WHITE);
    for x in 0..9 {
        if x != 4 {
            inner.set_pixel(x, 3, BLUE);
        }
    }
    let mut s = CountingSurface::new(inner);
    let report = flood_fill(&mut s, Point::new(0, 0), RED).unwrap();

    let reads = s.reads.borrow();
    assert!(reads.values().all(|&n| n == 1), "some coordinate read twice: {reads:?}");
    assert_eq!(reads.len(), report.visited);
    // the gap at x = 4 connects both halves, so every white pixel is reached
    assert_eq!(report.painted, 9 * 7 - 8);
}

#[test]
fn test_edge_coordinates_are_not_read_past_the_last_pixel() {
    // Clamping keeps neighbors of edge pixels on the surface instead of one past it.
    let mut s = CountingSurface::new(PixelSurface::new(4, 3, WHITE));
    flood_fill(&mut s, Point::new(3, 2), RED).unwrap();
    let reads = s.reads.borrow();
    assert!(reads.keys().all(|&(x, y)| x < 4 && y < 3));
    assert_eq!(reads.len(), 12);
}

#[test]
fn test_denied_read_aborts_without_rollback() {
    let mut s = CountingSurface::new(PixelSurface::new(5, 5, WHITE));
    s.fail_after = Some(4);
    let result = flood_fill(&mut s, Point::new(2, 2), RED);
    assert_eq!(result, Err(SurfaceError::AccessDenied));

    let painted = all_pixels(&s.inner).iter().filter(|c| **c == RED).count();
    // the origin plus the neighbors read before the failure stay painted
    assert_eq!(painted, 4);
}

#[test]
fn test_locked_surface_fails_before_painting() {
    let png_bytes = {
        let doc = raster_paint::Document::new(3, 3, WHITE);
        doc.export_png().unwrap()
    };
    let mut doc = raster_paint::Document::new(1, 1, WHITE);
    doc.load_image(&png_bytes, raster_paint::ReadAccess::Locked).unwrap();
    let revision = doc.surface().revision();

    let result = flood_fill(doc.surface_mut(), Point::new(1, 1), RED);
    assert_eq!(result, Err(SurfaceError::AccessDenied));
    assert_eq!(doc.surface().revision(), revision);
}
