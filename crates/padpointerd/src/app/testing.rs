//! Recording sink for pipeline tests.

use super::geometry::{Bounds, Point};
use super::sink::{PointerSink, SinkError, SinkResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SinkEvent {
    Down(Point),
    Up(Point),
    Click,
    ContextMenu(Point),
    Move(Point),
    Enter(Point),
    Scroll(f32),
    /// A held button let go at teardown.
    Release,
}

/// Records every event. Targets are generation numbers so tests can mark
/// them detached.
#[derive(Debug)]
pub(crate) struct RecordingSink {
    bounds: Bounds,
    events: Vec<SinkEvent>,
    generation: u32,
    button_down: bool,
    miss: bool,
    fail: bool,
}

impl RecordingSink {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            events: Vec::new(),
            generation: 0,
            button_down: false,
            miss: false,
            fail: false,
        }
    }

    pub(crate) fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub(crate) fn miss_everywhere(&mut self) {
        self.miss = true;
    }

    pub(crate) fn fail_all(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Every target resolved so far stops being live.
    pub(crate) fn detach_all(&mut self) {
        self.generation += 1;
    }

    /// A pointer-down has not been matched by an up or a release yet.
    pub(crate) fn button_down(&self) -> bool {
        self.button_down
    }

    pub(crate) fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
    }

    pub(crate) fn scrolled(&self) -> f32 {
        self.events
            .iter()
            .map(|event| match event {
                SinkEvent::Scroll(dy) => *dy,
                _ => 0.0,
            })
            .sum()
    }

    fn record(&mut self, event: SinkEvent) -> SinkResult<()> {
        if self.fail {
            return Err(SinkError::Backend("recording sink set to fail".into()));
        }
        self.events.push(event);
        Ok(())
    }
}

impl PointerSink for RecordingSink {
    type Target = u32;

    fn viewport(&self) -> Bounds {
        self.bounds
    }

    fn element_at(&mut self, pos: Point) -> Option<u32> {
        if self.miss || !self.bounds.contains(pos) {
            return None;
        }
        Some(self.generation)
    }

    fn is_live(&mut self, target: &u32) -> bool {
        *target == self.generation
    }

    fn pointer_down(&mut self, _target: &u32, pos: Point) -> SinkResult<()> {
        self.record(SinkEvent::Down(pos))?;
        self.button_down = true;
        Ok(())
    }

    fn pointer_up(&mut self, _target: &u32, pos: Point) -> SinkResult<()> {
        self.record(SinkEvent::Up(pos))?;
        self.button_down = false;
        Ok(())
    }

    fn click(&mut self, _target: &u32) -> SinkResult<()> {
        self.record(SinkEvent::Click)
    }

    fn context_menu(&mut self, _target: &u32, pos: Point) -> SinkResult<()> {
        self.record(SinkEvent::ContextMenu(pos))
    }

    fn pointer_move(&mut self, _target: &u32, pos: Point) -> SinkResult<()> {
        self.record(SinkEvent::Move(pos))
    }

    fn pointer_enter(&mut self, _target: &u32, pos: Point) -> SinkResult<()> {
        self.record(SinkEvent::Enter(pos))
    }

    fn scroll_by(&mut self, dy: f32) -> SinkResult<()> {
        self.record(SinkEvent::Scroll(dy))
    }

    fn release_all(&mut self) -> SinkResult<()> {
        if self.button_down {
            self.record(SinkEvent::Release)?;
            self.button_down = false;
        }
        Ok(())
    }
}
