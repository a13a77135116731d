use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::Colorize;
use crossbeam_channel::{never, select, tick, Receiver};

use padpointer_gamepad::{ControllerEvent, ControllerId, DeviceSource};
use padpointer_workspace::{Settings, SettingsEvent};

use crate::api::Command;
use crate::app::{ConnectionChange, FrameReport, ModeChange, PointerSession, PointerSink};
use crate::{print_debug, print_error, print_info, print_warning};

/// Shared stop flag, checked at the top of every loop iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Channels feeding the frame loop. A closed channel is ignored from then
/// on, except the controller one, which ends the loop.
pub struct LoopInputs {
    pub controller: Receiver<ControllerEvent>,
    pub api: Receiver<Command>,
    pub settings: Receiver<SettingsEvent>,
}

impl LoopInputs {
    /// Inputs that never deliver anything.
    pub fn idle() -> Self {
        Self {
            controller: never(),
            api: never(),
            settings: never(),
        }
    }
}

/// Single owner of the pointer session. Polls `source` every frame and
/// dispatches into `sink`.
pub struct FrameLoop<'a, D: ?Sized, S: PointerSink> {
    source: &'a D,
    sink: S,
    session: PointerSession<S::Target>,
    settings: Settings,
}

impl<'a, D, S> FrameLoop<'a, D, S>
where
    D: DeviceSource + ?Sized,
    S: PointerSink,
{
    pub fn new(source: &'a D, mut sink: S, settings: Settings) -> Self {
        sink.apply_settings(&settings);
        let session = PointerSession::new(&settings, sink.viewport());
        Self {
            source,
            sink,
            session,
            settings,
        }
    }

    pub fn session(&self) -> &PointerSession<S::Target> {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run until `cancel` is flipped or the controller channel closes.
    /// `rumble` is asked to buzz the active device on every mode change.
    pub fn run<R>(&mut self, cancel: &CancelToken, inputs: LoopInputs, mut rumble: R)
    where
        R: FnMut(ControllerId, Duration),
    {
        let LoopInputs {
            controller,
            mut api,
            mut settings,
        } = inputs;
        let mut interval = self.settings.frame_interval;
        let mut ticker = tick(interval);

        while !cancel.is_cancelled() {
            let (mut api_closed, mut settings_closed) = (false, false);
            let wait = self
                .session
                .next_due()
                .map(|due| due.saturating_duration_since(Instant::now()))
                .map_or(interval, |left| left.min(interval));

            select! {
                recv(ticker) -> _ => {
                    let report = self.tick(Instant::now());
                    self.feedback(report, &mut rumble);
                }
                recv(controller) -> msg => {
                    let Ok(event) = msg else {
                        print_error!("controller event channel closed");
                        break;
                    };
                    let report = self.handle_controller_event(event);
                    self.feedback(report, &mut rumble);
                }
                recv(api) -> msg => {
                    match msg {
                        Ok(command) => {
                            let report = self.handle_command(command);
                            self.feedback(report, &mut rumble);
                        }
                        Err(_) => api_closed = true,
                    }
                }
                recv(settings) -> msg => {
                    match msg {
                        Ok(event) => {
                            self.handle_settings_event(event);
                            if self.settings.frame_interval != interval {
                                interval = self.settings.frame_interval;
                                ticker = tick(interval);
                            }
                        }
                        Err(_) => settings_closed = true,
                    }
                }
                default(wait) => {}
            }

            if api_closed {
                api = never();
            }
            if settings_closed {
                settings = never();
            }

            self.session.flush_due(Instant::now(), &mut self.sink);
        }

        let dropped = self.session.teardown(&mut self.sink);
        if dropped > 0 {
            print_debug!("dropped {dropped} pending pointer up");
        }
    }

    /// One frame against the current state of the source.
    pub fn tick(&mut self, now: Instant) -> FrameReport {
        let report = self.session.poll_frame(now, self.source, &mut self.sink);
        self.log_report(report);
        report
    }

    pub fn handle_controller_event(&mut self, event: ControllerEvent) -> FrameReport {
        let connection = match event {
            ControllerEvent::Connected(info) => {
                print_debug!("controller attached - {} ({:x})", info.name, info.id);
                self.session.on_device_connected(info.id)
            }
            ControllerEvent::Disconnected(id) => {
                print_debug!("controller detached - {id:x}");
                self.session.on_device_disconnected(id)
            }
        };
        let report = FrameReport {
            connection,
            mode_change: None,
        };
        self.log_report(report);
        report
    }

    pub fn handle_command(&mut self, command: Command) -> FrameReport {
        print_debug!("api command - {command:?}");
        let mode_change = match command {
            Command::Activate => self.session.activate(),
            Command::Deactivate => self.session.deactivate(),
        };
        if command == Command::Activate && !self.session.state().connected {
            print_warning!("cannot activate: no controller connected");
        }
        let report = FrameReport {
            connection: None,
            mode_change,
        };
        self.log_report(report);
        report
    }

    pub fn handle_settings_event(&mut self, event: SettingsEvent) {
        match event {
            SettingsEvent::Changed(settings) => {
                print_info!("settings reloaded");
                self.apply_settings(settings);
            }
            SettingsEvent::Removed => {
                print_info!("settings file removed, using defaults");
                self.apply_settings(Settings::default());
            }
            SettingsEvent::Error(e) => {
                print_error!("failed to reload settings, keeping previous: {e}");
            }
        }
    }

    fn apply_settings(&mut self, settings: Settings) {
        self.sink.apply_settings(&settings);
        self.session.apply_settings(&settings);
        self.settings = settings;
    }

    fn feedback<R>(&self, report: FrameReport, rumble: &mut R)
    where
        R: FnMut(ControllerId, Duration),
    {
        if report.mode_change.is_none() {
            return;
        }
        let (Some(ms), Some(id)) = (self.settings.feedback.rumble_ms, self.session.device())
        else {
            return;
        };
        rumble(id, Duration::from_millis(ms as u64));
    }

    fn log_report(&self, report: FrameReport) {
        match report.connection {
            Some(ConnectionChange::Connected(id)) => {
                print_info!("controller connected - {id:x}");
            }
            Some(ConnectionChange::Disconnected) => {
                print_info!("controller disconnected");
            }
            None => {}
        }
        match report.mode_change {
            Some(ModeChange::Activated) => {
                print_info!("pointer mode on");
            }
            Some(ModeChange::Deactivated) => {
                print_info!("pointer mode off");
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crossbeam_channel::unbounded;
    use padpointer_gamepad::{Button, ControllerInfo, DeviceSnapshot};

    use super::*;
    use crate::app::testing::RecordingSink;

    #[derive(Default)]
    struct FakeSource(Mutex<Vec<DeviceSnapshot>>);

    impl FakeSource {
        fn set(&self, snapshots: Vec<DeviceSnapshot>) {
            if let Ok(mut list) = self.0.lock() {
                *list = snapshots;
            }
        }
    }

    impl DeviceSource for FakeSource {
        fn snapshots(&self) -> Vec<DeviceSnapshot> {
            self.0.lock().map(|list| list.clone()).unwrap_or_default()
        }
    }

    fn info(id: ControllerId) -> ControllerInfo {
        ControllerInfo {
            id,
            name: "Test Pad".into(),
            vendor_id: 0x045e,
            product_id: 0x0b13,
            supports_rumble: true,
        }
    }

    fn rumble_settings() -> Settings {
        let mut settings = Settings::default();
        settings.feedback.rumble_ms = Some(40);
        settings
    }

    #[test]
    fn cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn cancelled_loop_returns_immediately() {
        let source = FakeSource::default();
        let mut frame_loop =
            FrameLoop::new(&source, RecordingSink::new(800.0, 600.0), Settings::default());
        let cancel = CancelToken::new();
        cancel.cancel();
        frame_loop.run(&cancel, LoopInputs::idle(), |_, _| {});
        assert!(frame_loop.sink().events().is_empty());
    }

    #[test]
    fn stopping_mid_click_lets_go_of_button() {
        let source = FakeSource::default();
        source.set(vec![DeviceSnapshot::new(2)]);
        let mut frame_loop =
            FrameLoop::new(&source, RecordingSink::new(800.0, 600.0), Settings::default());
        frame_loop.tick(Instant::now());
        frame_loop.handle_command(Command::Activate);
        source.set(vec![DeviceSnapshot::new(2).with_button(Button::A, true)]);
        frame_loop.tick(Instant::now());
        assert!(frame_loop.sink().button_down());

        let cancel = CancelToken::new();
        cancel.cancel();
        frame_loop.run(&cancel, LoopInputs::idle(), |_, _| {});

        assert!(!frame_loop.sink().button_down());
        assert_eq!(frame_loop.session().next_due(), None);
    }

    #[test]
    fn api_commands_toggle_mode() {
        let source = FakeSource::default();
        let mut frame_loop =
            FrameLoop::new(&source, RecordingSink::new(800.0, 600.0), Settings::default());

        assert_eq!(frame_loop.handle_command(Command::Activate).mode_change, None);

        frame_loop.handle_controller_event(ControllerEvent::Connected(info(7)));
        assert_eq!(
            frame_loop.handle_command(Command::Activate).mode_change,
            Some(ModeChange::Activated)
        );
        assert_eq!(
            frame_loop.handle_command(Command::Deactivate).mode_change,
            Some(ModeChange::Deactivated)
        );
    }

    #[test]
    fn notification_and_poll_agree() {
        let source = FakeSource::default();
        let mut frame_loop =
            FrameLoop::new(&source, RecordingSink::new(800.0, 600.0), Settings::default());

        let report = frame_loop.handle_controller_event(ControllerEvent::Connected(info(3)));
        assert_eq!(report.connection, Some(ConnectionChange::Connected(3)));

        source.set(vec![DeviceSnapshot::new(3)]);
        assert!(frame_loop.tick(Instant::now()).is_empty());

        source.set(Vec::new());
        assert_eq!(
            frame_loop.tick(Instant::now()).connection,
            Some(ConnectionChange::Disconnected)
        );
        assert!(frame_loop
            .handle_controller_event(ControllerEvent::Disconnected(3))
            .is_empty());
    }

    #[test]
    fn invalid_settings_keep_previous() {
        let source = FakeSource::default();
        let mut frame_loop =
            FrameLoop::new(&source, RecordingSink::new(800.0, 600.0), rumble_settings());

        let error = padpointer_workspace::parse_settings("version: 9")
            .err()
            .map(|e| SettingsEvent::Error(e.into()));
        frame_loop.handle_settings_event(error.expect("version 9 is rejected"));
        assert_eq!(frame_loop.settings(), &rumble_settings());

        frame_loop.handle_settings_event(SettingsEvent::Removed);
        assert_eq!(frame_loop.settings(), &Settings::default());
    }

    #[test]
    fn loop_rumbles_on_mode_change() {
        let source = FakeSource::default();
        source.set(vec![DeviceSnapshot::new(5)]);
        let mut frame_loop =
            FrameLoop::new(&source, RecordingSink::new(800.0, 600.0), rumble_settings());
        let cancel = CancelToken::new();
        let (api_tx, api_rx) = unbounded();
        let rumbles = Mutex::new(Vec::new());

        std::thread::scope(|s| {
            s.spawn(|| {
                frame_loop.run(
                    &cancel,
                    LoopInputs {
                        controller: never(),
                        api: api_rx,
                        settings: never(),
                    },
                    |id, duration| {
                        if let Ok(mut list) = rumbles.lock() {
                            list.push((id, duration));
                        }
                    },
                );
            });

            std::thread::sleep(Duration::from_millis(100));
            source.set(vec![DeviceSnapshot::new(5).with_button(Button::Start, true)]);
            std::thread::sleep(Duration::from_millis(100));
            api_tx.send(Command::Deactivate).expect("loop is listening");
            std::thread::sleep(Duration::from_millis(100));
            cancel.cancel();
        });

        assert!(!frame_loop.session().state().active);
        let rumbles = rumbles.into_inner().expect("no poisoned lock");
        assert_eq!(
            rumbles,
            [
                (5, Duration::from_millis(40)),
                (5, Duration::from_millis(40)),
            ]
        );
    }
}
