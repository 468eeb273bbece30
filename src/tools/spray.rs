use std::f32::consts::PI;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::document::Document;
use crate::drag::{DragHandler, DragSession, PointerChannel};
use crate::geometry::Point;
use crate::input::InputLocation;
use crate::settings::{SPRAY_AREA_PER_DOT, SPRAY_PERIOD};

use super::{Tool, SPRAY};

/// Dots deposited per tick for a brush of the given width: `⌈πr²/30⌉` with `r = width/2`.
pub fn dots_per_tick(brush_width: u32) -> usize {
    let radius = brush_width as f32 / 2.0;
    (PI * radius * radius / SPRAY_AREA_PER_DOT).ceil() as usize
}

/// Uniform point in a disk of `radius`, by rejection from the enclosing square.
pub fn random_point_in_radius<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> (f32, f32) {
    loop {
        let x: f32 = rng.gen_range(-1.0..1.0);
        let y: f32 = rng.gen_range(-1.0..1.0);
        if x * x + y * y <= 1.0 {
            return (x * radius, y * radius);
        }
    }
}

/// Sprays random dots around the pointer on a fixed period while the button is held.
#[derive(Debug)]
pub struct SprayTool {
    rng: StdRng,
    period: Duration,
}

impl Default for SprayTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SprayTool {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            period: SPRAY_PERIOD,
        }
    }

    /// Deterministic dot placement, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            period: SPRAY_PERIOD,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

struct SprayDrag {
    center: Point,
    radius: f32,
    dots: usize,
    rng: StdRng,
    period: Duration,
    /// Time not yet spent on a whole period.
    carried: Duration,
    ticks: usize,
}

impl SprayDrag {
    fn emit(&mut self, doc: &mut Document) {
        let (cx, cy) = (self.center.x as f32, self.center.y as f32);
        let dots: Vec<(i32, i32, f32)> = (0..self.dots)
            .map(|_| {
                let (ox, oy) = random_point_in_radius(&mut self.rng, self.radius);
                ((cx + ox).floor() as i32, (cy + oy).floor() as i32, 1.0)
            })
            .collect();
        let ctx = doc.context;
        doc.surface_mut().stamp(dots, ctx.color, ctx.composite);
        self.ticks += 1;
    }
}

impl DragHandler for SprayDrag {
    fn on_move(&mut self, location: &InputLocation, doc: &mut Document) {
        self.center = doc.to_surface(location);
    }

    fn on_tick(&mut self, elapsed: Duration, doc: &mut Document) {
        self.carried += elapsed;
        while self.carried >= self.period {
            self.carried -= self.period;
            self.emit(doc);
        }
    }

    fn on_end(&mut self, _location: &InputLocation, _doc: &mut Document) {
        log::debug!("spray stopped after {} ticks", self.ticks);
    }
}

impl Tool for SprayTool {
    fn name(&self) -> &'static str {
        SPRAY
    }

    fn on_press(
        &mut self,
        press: &InputLocation,
        doc: &mut Document,
        channel: &PointerChannel,
    ) -> Option<DragSession> {
        let width = doc.context.brush_width;
        let handler = SprayDrag {
            center: doc.to_surface(press),
            radius: width as f32 / 2.0,
            dots: dots_per_tick(width),
            rng: StdRng::seed_from_u64(self.rng.r#gen()),
            period: self.period,
            carried: Duration::ZERO,
            ticks: 0,
        };
        Some(DragSession::start(channel, Box::new(handler)))
    }
}
