use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};

use crate::command::Command;
use crate::events::{ControllerEvent, EventReceiver};
use crate::handle::ControllerHandle;
use crate::runtime::start_runtime_thread;
use crate::source::DeviceSource;
use crate::types::{ControllerId, ControllerInfo, DeviceSnapshot};
use crate::{Error, Result};

/// Shared state used by the manager, the runtime loop and controller handles.
pub(crate) struct Inner {
    pub subscribers: Mutex<Vec<Sender<ControllerEvent>>>,
    /// Open controllers in connection order.
    pub controllers_info: RwLock<Vec<ControllerInfo>>,
    /// Latest state of every open controller, same order as `controllers_info`.
    pub snapshots: RwLock<Vec<DeviceSnapshot>>,
    pub cmd_tx: Sender<Command>,
}

/// Manager responsible for discovering controllers and sampling their state.
pub struct ControllerManager {
    pub(crate) inner: Arc<Inner>,
}

impl ControllerManager {
    /// Creates a new manager and starts the background runtime thread.
    /// Blocks briefly until the initial device enumeration completes (up to 1s).
    pub fn new() -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded::<Command>();
        let inner = Arc::new(Inner {
            subscribers: Mutex::new(Vec::new()),
            controllers_info: RwLock::new(Vec::new()),
            snapshots: RwLock::new(Vec::new()),
            cmd_tx,
        });

        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        start_runtime_thread(inner.clone(), cmd_rx, ready_tx)
            .map_err(|e| Error::BackendInit(e.to_string()))?;

        // Best-effort wait for the initial enumeration.
        if let Ok(Err(reason)) = ready_rx.recv_timeout(Duration::from_secs(1)) {
            return Err(Error::BackendInit(reason));
        }

        Ok(Self { inner })
    }

    /// Subscribes to connect/disconnect events. Dropped subscribers are cleaned automatically.
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.inner.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Returns a handle to a controller by id if it is currently known.
    pub fn controller(&self, id: ControllerId) -> Option<ControllerHandle> {
        let list = self.inner.controllers_info.read().ok()?;
        list.iter().any(|info| info.id == id).then(|| ControllerHandle {
            id,
            inner: self.inner.clone(),
        })
    }

    /// Whether the controller is known and reports rumble support.
    pub fn supports_rumble(&self, id: ControllerId) -> bool {
        self.inner
            .controllers_info
            .read()
            .map(|list| list.iter().any(|info| info.id == id && info.supports_rumble))
            .unwrap_or(false)
    }
}

impl DeviceSource for ControllerManager {
    fn snapshots(&self) -> Vec<DeviceSnapshot> {
        self.inner
            .snapshots
            .read()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    fn first(&self) -> Option<DeviceSnapshot> {
        self.inner.snapshots.read().ok()?.first().copied()
    }
}

impl Drop for ControllerManager {
    fn drop(&mut self) {
        let _ = self.inner.cmd_tx.send(Command::Shutdown);
    }
}
