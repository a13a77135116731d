use std::time::Instant;

use colored::Colorize;

use padpointer_gamepad::{ButtonSet, ControllerId, DeviceSnapshot, DeviceSource};
use padpointer_workspace::Settings;

use super::dispatch::Dispatcher;
use super::filter::filter;
use super::geometry::Bounds;
use super::poll::{ConnectionChange, Poller};
use super::sink::PointerSink;
use super::translate::{ModeChange, PointerState, Translator};
use crate::print_debug;

/// What changed during a frame or a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub connection: Option<ConnectionChange>,
    pub mode_change: Option<ModeChange>,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.connection.is_none() && self.mode_change.is_none()
    }
}

/// Everything the pointer emulation carries from one frame to the next.
///
/// `T` is the target type of the sink the session dispatches into.
#[derive(Debug)]
pub struct PointerSession<T> {
    state: PointerState,
    poller: Poller,
    previous: Option<ButtonSet>,
    translator: Translator,
    deadzone: f32,
    dispatcher: Dispatcher<T>,
}

impl<T: Clone> PointerSession<T> {
    pub fn new(settings: &Settings, bounds: Bounds) -> Self {
        Self {
            state: PointerState::new(bounds),
            poller: Poller::new(),
            previous: None,
            translator: Translator::from_settings(settings),
            deadzone: settings.pointer.deadzone,
            dispatcher: Dispatcher::new(settings.pointer.click_delay),
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.translator = Translator::from_settings(settings);
        self.deadzone = settings.pointer.deadzone;
        self.dispatcher.set_click_delay(settings.pointer.click_delay);
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    /// Device currently driving the pointer.
    pub fn device(&self) -> Option<ControllerId> {
        self.poller.device()
    }

    pub fn on_device_connected(&mut self, id: ControllerId) -> Option<ConnectionChange> {
        let change = self.poller.on_connected(id, &mut self.state);
        if change.is_some() {
            self.previous = None;
        }
        change
    }

    pub fn on_device_disconnected(&mut self, id: ControllerId) -> Option<ConnectionChange> {
        let change = self.poller.on_disconnected(id, &mut self.state);
        if change.is_some() {
            self.previous = None;
        }
        change
    }

    /// Manual activation. Ignored while no device is connected.
    pub fn activate(&mut self) -> Option<ModeChange> {
        self.state.activate().then_some(ModeChange::Activated)
    }

    pub fn deactivate(&mut self) -> Option<ModeChange> {
        self.state.deactivate().then_some(ModeChange::Deactivated)
    }

    /// Run one frame: poll → filter → translate → dispatch.
    ///
    /// `first` is the first connected device, `None` when there is none.
    /// Clicks that became due are finished before the new input is looked at.
    pub fn frame<S>(
        &mut self,
        now: Instant,
        first: Option<&DeviceSnapshot>,
        sink: &mut S,
    ) -> FrameReport
    where
        S: PointerSink<Target = T>,
    {
        let viewport = sink.viewport();
        if viewport != self.state.bounds {
            self.state.set_bounds(viewport);
        }
        self.dispatcher.flush_due(sink, now);

        let mut report = FrameReport {
            connection: self.poller.observe(first, &mut self.state),
            mode_change: None,
        };
        if report.connection.is_some() {
            self.previous = None;
        }
        let Some(snapshot) = first else {
            return report;
        };

        let input = filter(snapshot, self.previous, self.deadzone);
        let translation = self.translator.translate(&input, &mut self.state);
        report.mode_change = translation.mode_change;
        if report.mode_change.is_none() && self.state.active {
            self.dispatcher
                .dispatch(&translation, &input, &self.state, sink, now);
        }

        self.previous = Some(input.held);
        report
    }

    /// [`Self::frame`] with the first device of `source`.
    pub fn poll_frame<D, S>(&mut self, now: Instant, source: &D, sink: &mut S) -> FrameReport
    where
        D: DeviceSource + ?Sized,
        S: PointerSink<Target = T>,
    {
        let first = source.first();
        self.frame(now, first.as_ref(), sink)
    }

    /// Finish clicks that are due without polling.
    pub fn flush_due<S>(&mut self, now: Instant, sink: &mut S) -> usize
    where
        S: PointerSink<Target = T>,
    {
        self.dispatcher.flush_due(sink, now)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.dispatcher.next_due()
    }

    /// Stop the session. Pending clicks are dropped without their synthetic
    /// up and click, and the sink lets go of any button they left held.
    /// Returns how many clicks were dropped.
    pub fn teardown<S>(&mut self, sink: &mut S) -> usize
    where
        S: PointerSink<Target = T>,
    {
        let dropped = self.dispatcher.cancel_pending();
        if let Err(e) = sink.release_all() {
            print_debug!("release on teardown failed: {e}");
        }
        dropped
    }
}
