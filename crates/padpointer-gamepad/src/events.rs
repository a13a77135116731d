use crossbeam_channel::Receiver;

use crate::types::{ControllerId, ControllerInfo};

/// Device lifecycle notifications.
///
/// Input state is not streamed; it is polled through
/// [`DeviceSource`](crate::DeviceSource) once per frame.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// A controller has been connected and opened.
    Connected(ControllerInfo),
    /// A previously connected controller has been disconnected.
    Disconnected(ControllerId),
}

/// Receiving end for controller events subscription.
pub type EventReceiver = Receiver<ControllerEvent>;
