use colored::Colorize;

use padpointer_workspace::Settings;

use super::ScreenPoint;
use crate::app::{Bounds, Point, PointerSink, SinkResult};
use crate::print_info;

const DEFAULT_WIDTH: f32 = 1920.0;
const DEFAULT_HEIGHT: f32 = 1080.0;

/// Logs synthetic events instead of performing them.
#[derive(Debug)]
pub struct TraceSink {
    bounds: Bounds,
}

impl Default for TraceSink {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }
}

impl TraceSink {
    pub fn new(settings: &Settings) -> Self {
        let mut sink = Self::default();
        sink.apply_settings(settings);
        sink
    }
}

impl PointerSink for TraceSink {
    type Target = ScreenPoint;

    fn viewport(&self) -> Bounds {
        self.bounds
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.bounds = settings
            .viewport
            .map(Bounds::from)
            .unwrap_or(Bounds::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    fn element_at(&mut self, pos: Point) -> Option<ScreenPoint> {
        ScreenPoint::resolve(self.bounds, pos)
    }

    fn pointer_down(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        print_info!("pointer down - {},{}", target.x, target.y);
        Ok(())
    }

    fn pointer_up(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        print_info!("pointer up - {},{}", target.x, target.y);
        Ok(())
    }

    fn click(&mut self, target: &ScreenPoint) -> SinkResult<()> {
        print_info!("click - {},{}", target.x, target.y);
        Ok(())
    }

    fn context_menu(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        print_info!("context menu - {},{}", target.x, target.y);
        Ok(())
    }

    fn pointer_move(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        print_info!("pointer move - {},{}", target.x, target.y);
        Ok(())
    }

    fn pointer_enter(&mut self, target: &ScreenPoint, _pos: Point) -> SinkResult<()> {
        print_info!("pointer enter - {},{}", target.x, target.y);
        Ok(())
    }

    fn scroll_by(&mut self, dy: f32) -> SinkResult<()> {
        print_info!("scroll - {dy:+.1}px");
        Ok(())
    }
}
