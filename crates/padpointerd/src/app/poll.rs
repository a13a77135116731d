use padpointer_gamepad::{ControllerId, DeviceSnapshot};

use super::translate::PointerState;

/// Connection transition observed by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionChange {
    Connected(ControllerId),
    Disconnected,
}

/// Tracks which device drives the pointer and reconciles per-frame polls
/// with asynchronous connect/disconnect notifications.
///
/// Both sources write through the same tracked id, so whichever observes a
/// transition first wins and the other one becomes a no-op.
#[derive(Debug, Default, Clone)]
pub struct Poller {
    device: Option<ControllerId>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device currently driving the pointer.
    pub fn device(&self) -> Option<ControllerId> {
        self.device
    }

    /// Reconcile the first connected device of this frame with the state.
    pub fn observe(
        &mut self,
        first: Option<&DeviceSnapshot>,
        state: &mut PointerState,
    ) -> Option<ConnectionChange> {
        match first {
            None => {
                if self.device.is_none() && !state.connected {
                    return None;
                }
                self.device = None;
                state.disconnect();
                Some(ConnectionChange::Disconnected)
            }
            Some(snapshot) => {
                if state.connected && self.device == Some(snapshot.id) {
                    return None;
                }
                self.device = Some(snapshot.id);
                state.connect();
                Some(ConnectionChange::Connected(snapshot.id))
            }
        }
    }

    /// A connect notification. Ignored while a device is already tracked.
    pub fn on_connected(
        &mut self,
        id: ControllerId,
        state: &mut PointerState,
    ) -> Option<ConnectionChange> {
        if state.connected {
            return None;
        }
        self.device = Some(id);
        state.connect();
        Some(ConnectionChange::Connected(id))
    }

    /// A disconnect notification. Only the tracked device disconnects.
    pub fn on_disconnected(
        &mut self,
        id: ControllerId,
        state: &mut PointerState,
    ) -> Option<ConnectionChange> {
        match self.device {
            Some(tracked) if tracked != id => None,
            None if !state.connected => None,
            _ => {
                self.device = None;
                state.disconnect();
                Some(ConnectionChange::Disconnected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::geometry::{Bounds, Point};

    fn state() -> PointerState {
        PointerState::new(Bounds::new(800.0, 600.0))
    }

    #[test]
    fn poll_connects_and_centers() {
        let mut poller = Poller::new();
        let mut state = state();
        state.position = Point::new(10.0, 10.0);

        let snap = DeviceSnapshot::new(4);
        assert_eq!(
            poller.observe(Some(&snap), &mut state),
            Some(ConnectionChange::Connected(4))
        );
        assert!(state.connected);
        assert!(!state.active);
        assert_eq!(state.position, Point::new(400.0, 300.0));

        // Same device next frame is steady state.
        assert_eq!(poller.observe(Some(&snap), &mut state), None);
    }

    #[test]
    fn no_device_is_steady_state() {
        let mut poller = Poller::new();
        let mut state = state();
        assert_eq!(poller.observe(None, &mut state), None);
        assert!(!state.connected);
    }

    #[test]
    fn poll_disconnect_forces_inactive() {
        let mut poller = Poller::new();
        let mut state = state();
        poller.observe(Some(&DeviceSnapshot::new(1)), &mut state);
        state.active = true;

        assert_eq!(
            poller.observe(None, &mut state),
            Some(ConnectionChange::Disconnected)
        );
        assert!(!state.connected);
        assert!(!state.active);
    }

    #[test]
    fn notification_first_then_poll_agrees() {
        let mut poller = Poller::new();
        let mut state = state();

        assert_eq!(
            poller.on_connected(2, &mut state),
            Some(ConnectionChange::Connected(2))
        );
        assert_eq!(poller.observe(Some(&DeviceSnapshot::new(2)), &mut state), None);

        state.active = true;
        assert_eq!(
            poller.on_disconnected(2, &mut state),
            Some(ConnectionChange::Disconnected)
        );
        assert!(!state.active);
        assert_eq!(poller.observe(None, &mut state), None);
    }

    #[test]
    fn poll_first_then_notification_is_noop() {
        let mut poller = Poller::new();
        let mut state = state();
        poller.observe(Some(&DeviceSnapshot::new(2)), &mut state);
        state.active = true;

        assert_eq!(poller.on_connected(2, &mut state), None);
        assert!(state.active);

        poller.observe(None, &mut state);
        assert_eq!(poller.on_disconnected(2, &mut state), None);
        assert!(!state.connected);
    }

    #[test]
    fn other_device_disconnect_is_ignored() {
        let mut poller = Poller::new();
        let mut state = state();
        poller.on_connected(1, &mut state);
        state.active = true;

        assert_eq!(poller.on_disconnected(9, &mut state), None);
        assert!(state.connected);
        assert!(state.active);
    }

    #[test]
    fn switching_primary_device_reconnects() {
        let mut poller = Poller::new();
        let mut state = state();
        poller.observe(Some(&DeviceSnapshot::new(1)), &mut state);
        state.active = true;
        state.position = Point::new(5.0, 5.0);

        assert_eq!(
            poller.observe(Some(&DeviceSnapshot::new(3)), &mut state),
            Some(ConnectionChange::Connected(3))
        );
        assert_eq!(poller.device(), Some(3));
        assert!(!state.active);
        assert_eq!(state.position, Point::new(400.0, 300.0));
    }
}
