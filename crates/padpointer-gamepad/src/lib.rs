mod command;
mod events;
mod handle;
mod manager;
mod runtime;
mod source;
mod types;

use thiserror::Error;

pub use crate::events::{ControllerEvent, EventReceiver};
pub use crate::handle::ControllerHandle;
pub use crate::manager::ControllerManager;
pub use crate::source::DeviceSource;
pub use crate::types::{
    Axis, Button, ButtonSet, ControllerId, ControllerInfo, DeviceSnapshot,
    AXIS_COUNT, BUTTON_COUNT,
};

/// Error type for controller management operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// A generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Convenient result alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
