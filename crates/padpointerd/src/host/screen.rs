use padpointer_control::{MouseButton, Performer};
use padpointer_workspace::Settings;

use super::{ScreenPoint, WheelAccumulator};
use crate::app::{Bounds, Point, PointerSink, SinkError, SinkResult};

/// Drives the real OS pointer.
pub struct ScreenSink {
    performer: Performer,
    display: Bounds,
    viewport: Option<Bounds>,
    wheel: WheelAccumulator,
    /// Left button pressed by a click whose release has not run yet.
    left_held: bool,
}

impl ScreenSink {
    pub fn new(performer: Performer, settings: &Settings) -> SinkResult<Self> {
        let (width, height) = performer.display_size()?;
        if width <= 0 || height <= 0 {
            return Err(SinkError::Backend(format!(
                "main display has no area: {width}x{height}"
            )));
        }
        let mut sink = Self {
            performer,
            display: Bounds::new(width as f32, height as f32),
            viewport: None,
            wheel: WheelAccumulator::new(settings.scroll.step_px),
            left_held: false,
        };
        sink.apply_settings(settings);
        Ok(sink)
    }

    fn move_to(&mut self, target: &ScreenPoint) -> SinkResult<()> {
        self.performer.move_to(target.x, target.y)?;
        Ok(())
    }
}

impl PointerSink for ScreenSink {
    type Target = ScreenPoint;

    fn viewport(&self) -> Bounds {
        self.viewport.unwrap_or(self.display)
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.viewport = settings.viewport.map(Bounds::from);
        self.wheel = WheelAccumulator::new(settings.scroll.step_px);
    }

    fn element_at(&mut self, pos: Point) -> Option<ScreenPoint> {
        if !self.viewport().contains(pos) {
            return None;
        }
        ScreenPoint::resolve(self.display, pos)
    }

    fn pointer_down(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        self.move_to(target)?;
        self.performer.press(MouseButton::Left)?;
        self.left_held = true;
        Ok(())
    }

    fn pointer_up(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        self.move_to(target)?;
        self.performer.release(MouseButton::Left)?;
        self.left_held = false;
        Ok(())
    }

    // The OS turns down + up into a click.
    fn click(&mut self, _target: &ScreenPoint) -> SinkResult<()> {
        Ok(())
    }

    fn context_menu(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        self.move_to(target)?;
        self.performer.click(MouseButton::Right)?;
        Ok(())
    }

    fn pointer_move(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        self.move_to(target)
    }

    // Hover follows the real cursor.
    fn pointer_enter(&mut self, _target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        Ok(())
    }

    fn scroll_by(&mut self, dy: f32) -> SinkResult<()> {
        let steps = self.wheel.push(dy);
        if steps != 0 {
            self.performer.scroll_y(steps)?;
        }
        Ok(())
    }

    fn release_all(&mut self) -> SinkResult<()> {
        if self.left_held {
            self.performer.release(MouseButton::Left)?;
            self.left_held = false;
        }
        Ok(())
    }
}
