//! Pointer sinks backed by the desktop.

mod screen;
mod trace;

pub use screen::ScreenSink;
pub use trace::TraceSink;

use crate::app::{Bounds, Point};

/// A pixel on the main display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    /// Pixel under `pos`, `None` when `pos` is outside `bounds`.
    /// The far edges map onto the last pixel row and column.
    pub fn resolve(bounds: Bounds, pos: Point) -> Option<Self> {
        if !bounds.contains(pos) {
            return None;
        }
        let max_x = (bounds.width as i32 - 1).max(0);
        let max_y = (bounds.height as i32 - 1).max(0);
        Some(Self {
            x: (pos.x.round() as i32).clamp(0, max_x),
            y: (pos.y.round() as i32).clamp(0, max_y),
        })
    }
}

/// Turns pixel deltas into whole wheel steps, carrying the rest over.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WheelAccumulator {
    step_px: f32,
    remainder: f32,
}

impl WheelAccumulator {
    pub(crate) fn new(step_px: f32) -> Self {
        Self {
            step_px: step_px.max(f32::EPSILON),
            remainder: 0.0,
        }
    }

    /// Add `dy` pixels and return the whole steps to emit.
    pub(crate) fn push(&mut self, dy: f32) -> i32 {
        self.remainder += dy;
        let steps = (self.remainder / self.step_px).trunc();
        self.remainder -= steps * self.step_px;
        steps as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_maps_edges_onto_last_pixel() {
        let bounds = Bounds::new(1920.0, 1080.0);
        assert_eq!(
            ScreenPoint::resolve(bounds, Point::new(1920.0, 1080.0)),
            Some(ScreenPoint { x: 1919, y: 1079 })
        );
        assert_eq!(
            ScreenPoint::resolve(bounds, Point::new(10.4, 0.0)),
            Some(ScreenPoint { x: 10, y: 0 })
        );
        assert_eq!(ScreenPoint::resolve(bounds, Point::new(-1.0, 5.0)), None);
    }

    #[test]
    fn wheel_steps_carry_remainder() {
        let mut wheel = WheelAccumulator::new(40.0);
        assert_eq!(wheel.push(200.0), 5);
        assert_eq!(wheel.push(10.0), 0);
        assert_eq!(wheel.push(10.0), 0);
        assert_eq!(wheel.push(10.0), 0);
        assert_eq!(wheel.push(10.0), 1);
        assert_eq!(wheel.push(-200.0), -5);
    }

    #[test]
    fn pixel_wheel_passes_through() {
        let mut wheel = WheelAccumulator::new(1.0);
        assert_eq!(wheel.push(10.0), 10);
        assert_eq!(wheel.push(-0.5), 0);
        assert_eq!(wheel.push(-0.5), -1);
    }
}
