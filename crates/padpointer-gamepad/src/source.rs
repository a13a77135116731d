use crate::types::DeviceSnapshot;

/// Polling side of a controller backend.
pub trait DeviceSource {
    /// Snapshots of every connected device, in connection order.
    fn snapshots(&self) -> Vec<DeviceSnapshot>;

    /// Snapshot of the first connected device, if any.
    fn first(&self) -> Option<DeviceSnapshot> {
        self.snapshots().into_iter().next()
    }
}
