//! Gamepad-to-pointer pipeline: poll → filter → translate → dispatch.

mod dispatch;
mod filter;
mod geometry;
mod poll;
mod session;
mod sink;
mod translate;

pub use dispatch::Dispatcher;
pub use filter::{apply_deadzone, filter, FilteredInput};
pub use geometry::{Bounds, Point};
pub use poll::{ConnectionChange, Poller};
pub use session::{FrameReport, PointerSession};
pub use sink::{PointerSink, SinkError, SinkResult};
pub use translate::{ModeChange, PointerState, Translation, Translator};

#[cfg(test)]
pub(crate) mod testing;
