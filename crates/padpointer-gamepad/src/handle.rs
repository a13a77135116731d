use std::sync::Arc;
use std::time::Duration;

use crate::command::Command;
use crate::manager::Inner;
use crate::types::ControllerId;
use crate::{Error, Result};

/// Talks to one open controller through the runtime thread.
#[derive(Clone)]
pub struct ControllerHandle {
    pub(crate) id: ControllerId,
    pub(crate) inner: Arc<Inner>,
}

impl ControllerHandle {
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Buzz both motors at `strength` (0.0 to 1.0) for `duration`.
    /// Devices without rumble silently ignore the request.
    pub fn rumble(&self, strength: f32, duration: Duration) -> Result<()> {
        let level = motor_level(strength);
        let command = Command::Rumble {
            id: self.id,
            low: level,
            high: level,
            ms: u32::try_from(duration.as_millis()).unwrap_or(u32::MAX),
        };
        self.inner
            .cmd_tx
            .send(command)
            .map_err(|_| Error::Backend("controller runtime has stopped".into()))
    }
}

#[inline]
fn motor_level(strength: f32) -> u16 {
    if strength.is_nan() {
        return 0;
    }
    (strength.clamp(0.0, 1.0) * f32::from(u16::MAX)).round() as u16
}
