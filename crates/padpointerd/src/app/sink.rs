use thiserror::Error;

use padpointer_workspace::Settings;

use super::geometry::{Bounds, Point};

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("input error: {0}")]
    Input(#[from] padpointer_control::InputError),
    #[error("sink backend error: {0}")]
    Backend(String),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// Where synthetic pointer events go.
///
/// A sink resolves positions to targets (whatever "the thing under the
/// cursor" means for the host) and receives events aimed at them. Every
/// event method may fail; callers log and drop the failure.
pub trait PointerSink {
    type Target: Clone;

    /// Current viewport the cursor is confined to.
    fn viewport(&self) -> Bounds;

    /// Called when settings are (re)loaded.
    fn apply_settings(&mut self, _settings: &Settings) {}

    /// Topmost target at `pos`, `None` when nothing is there.
    fn element_at(&mut self, pos: Point) -> Option<Self::Target>;

    /// Whether a target resolved earlier can still receive events.
    fn is_live(&mut self, _target: &Self::Target) -> bool {
        true
    }

    fn pointer_down(&mut self, target: &Self::Target, pos: Point) -> SinkResult<()>;
    fn pointer_up(&mut self, target: &Self::Target, pos: Point) -> SinkResult<()>;
    fn click(&mut self, target: &Self::Target) -> SinkResult<()>;
    fn context_menu(&mut self, target: &Self::Target, pos: Point) -> SinkResult<()>;
    fn pointer_move(&mut self, target: &Self::Target, pos: Point) -> SinkResult<()>;
    fn pointer_enter(&mut self, target: &Self::Target, pos: Point) -> SinkResult<()>;

    /// Scroll the view by `dy` pixels, positive is down.
    fn scroll_by(&mut self, dy: f32) -> SinkResult<()>;

    /// Let go of every button still held by an unfinished click.
    /// Called once when the session stops.
    fn release_all(&mut self) -> SinkResult<()> {
        Ok(())
    }
}
