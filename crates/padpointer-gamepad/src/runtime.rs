use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use ahash::AHashMap;
use crossbeam_channel::Receiver;
use sdl2::controller::{Axis as SdlAxis, Button as SdlButton, GameController};
use sdl2::event::Event;
use sdl2::{EventPump, GameControllerSubsystem, Sdl};

use crate::command::Command;
use crate::events::ControllerEvent;
use crate::manager::Inner;
use crate::types::{Axis, Button, ControllerId, ControllerInfo, DeviceSnapshot};

/// How long the runtime waits for an SDL event before refreshing snapshots.
const EVENT_WAIT_MS: u32 = 4;

/// Analog trigger value past which LT/RT count as held.
const TRIGGER_THRESHOLD: i16 = 20000;

/// Starts the SDL2-backed runtime thread that drives device discovery and sampling.
/// `ready_tx` receives the initialization outcome once the initial enumeration is done.
pub(crate) fn start_runtime_thread(
    inner: Arc<Inner>,
    cmd_rx: Receiver<Command>,
    ready_tx: mpsc::Sender<Result<(), String>>,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name("padpointer-sdl".into())
        .spawn(move || {
            // SDL must live entirely within this thread
            let mut runtime = match Runtime::init() {
                Ok(runtime) => runtime,
                Err(reason) => {
                    let _ = ready_tx.send(Err(reason));
                    return;
                }
            };
            runtime.enumerate(&inner);
            let _ = ready_tx.send(Ok(()));
            runtime.run(&inner, &cmd_rx);
        })?;
    Ok(())
}

struct Runtime {
    _sdl: Sdl,
    controller_subsystem: GameControllerSubsystem,
    event_pump: EventPump,
    order: Vec<ControllerId>,
    controllers: AHashMap<ControllerId, GameController>,
}

impl Runtime {
    fn init() -> Result<Self, String> {
        // The daemon has no window, so it is never "focused".
        sdl2::hint::set("SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS", "1");

        let sdl = sdl2::init()?;
        let controller_subsystem = sdl.game_controller()?;
        let event_pump = sdl.event_pump()?;
        Ok(Self {
            _sdl: sdl,
            controller_subsystem,
            event_pump,
            order: Vec::new(),
            controllers: AHashMap::new(),
        })
    }

    fn enumerate(&mut self, inner: &Inner) {
        let Ok(count) = self.controller_subsystem.num_joysticks() else {
            return;
        };
        for index in 0..count {
            if self.controller_subsystem.is_game_controller(index) {
                self.open(inner, index);
            }
        }
    }

    fn run(&mut self, inner: &Inner, cmd_rx: &Receiver<Command>) {
        loop {
            // Wait for an SDL event or timeout to reduce idle CPU usage
            if let Some(event) = self.event_pump.wait_event_timeout(EVENT_WAIT_MS) {
                self.handle_event(inner, event);
                // Drain any additional queued events quickly
                while let Some(event) = self.event_pump.poll_event() {
                    self.handle_event(inner, event);
                }
            }
            self.publish_snapshots(inner);

            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    Command::Rumble { id, low, high, ms } => {
                        if let Some(ctrl) = self.controllers.get_mut(&id) {
                            // Devices without rumble report an error here; nothing to do about it.
                            let _ = ctrl.set_rumble(low, high, ms);
                        }
                    }
                    Command::Shutdown => return,
                }
            }
        }
    }

    fn handle_event(&mut self, inner: &Inner, event: Event) {
        match event {
            Event::ControllerDeviceAdded { which, .. } => self.open(inner, which),
            Event::ControllerDeviceRemoved { which, .. } => self.close(inner, which),
            _ => {}
        }
    }

    fn open(&mut self, inner: &Inner, index: u32) {
        let Ok(controller) = self.controller_subsystem.open(index) else {
            return;
        };
        let id: ControllerId = controller.instance_id();
        // SDL also reports devices present at startup as added.
        if self.controllers.contains_key(&id) {
            return;
        }
        let info = ControllerInfo {
            id,
            name: controller.name(),
            vendor_id: controller.vendor_id().unwrap_or(0),
            product_id: controller.product_id().unwrap_or(0),
            supports_rumble: controller.has_rumble(),
        };
        self.order.push(id);
        self.controllers.insert(id, controller);
        if let Ok(mut list) = inner.controllers_info.write() {
            list.push(info.clone());
        }
        // Publish before notifying so that subscribers polling right away see the device.
        self.publish_snapshots(inner);
        broadcast(inner, ControllerEvent::Connected(info));
    }

    fn close(&mut self, inner: &Inner, id: ControllerId) {
        if self.controllers.remove(&id).is_none() {
            return;
        }
        self.order.retain(|known| *known != id);
        if let Ok(mut list) = inner.controllers_info.write() {
            list.retain(|info| info.id != id);
        }
        self.publish_snapshots(inner);
        broadcast(inner, ControllerEvent::Disconnected(id));
    }

    fn publish_snapshots(&self, inner: &Inner) {
        let snapshots: Vec<DeviceSnapshot> = self
            .order
            .iter()
            .filter_map(|id| {
                self.controllers
                    .get(id)
                    .map(|controller| read_snapshot(*id, controller))
            })
            .collect();
        if let Ok(mut current) = inner.snapshots.write() {
            *current = snapshots;
        }
    }
}

fn read_snapshot(id: ControllerId, controller: &GameController) -> DeviceSnapshot {
    let mut snapshot = DeviceSnapshot::new(id);
    for button in Button::ALL {
        snapshot.buttons.set(button, read_button(controller, button));
    }
    for axis in Axis::ALL {
        snapshot.axes[axis.index()] = normalize(controller.axis(map_axis(axis)));
    }
    snapshot
}

fn read_button(controller: &GameController, button: Button) -> bool {
    let sdl_button = match button {
        Button::A => SdlButton::A,
        Button::B => SdlButton::B,
        Button::X => SdlButton::X,
        Button::Y => SdlButton::Y,
        Button::LeftShoulder => SdlButton::LeftShoulder,
        Button::RightShoulder => SdlButton::RightShoulder,
        Button::LeftTrigger => {
            return controller.axis(SdlAxis::TriggerLeft) > TRIGGER_THRESHOLD;
        }
        Button::RightTrigger => {
            return controller.axis(SdlAxis::TriggerRight) > TRIGGER_THRESHOLD;
        }
        Button::Back => SdlButton::Back,
        Button::Start => SdlButton::Start,
        Button::LeftStick => SdlButton::LeftStick,
        Button::RightStick => SdlButton::RightStick,
        Button::DPadUp => SdlButton::DPadUp,
        Button::DPadDown => SdlButton::DPadDown,
        Button::DPadLeft => SdlButton::DPadLeft,
        Button::DPadRight => SdlButton::DPadRight,
    };
    controller.button(sdl_button)
}

fn map_axis(axis: Axis) -> SdlAxis {
    match axis {
        Axis::LeftX => SdlAxis::LeftX,
        Axis::LeftY => SdlAxis::LeftY,
        Axis::RightX => SdlAxis::RightX,
        Axis::RightY => SdlAxis::RightY,
    }
}

#[inline]
fn normalize(value: i16) -> f32 {
    ((value as f32) / (i16::MAX as f32)).clamp(-1.0, 1.0)
}

fn broadcast(inner: &Inner, event: ControllerEvent) {
    if let Ok(mut subs) = inner.subscribers.lock() {
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
