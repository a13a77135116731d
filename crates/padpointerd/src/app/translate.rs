use padpointer_gamepad::{Axis, Button};
use padpointer_workspace::Settings;

use super::filter::FilteredInput;
use super::geometry::{Bounds, Point};

/// Cursor and mode state carried across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    pub position: Point,
    pub bounds: Bounds,
    /// Translation and dispatch are enabled. Never true while disconnected.
    pub active: bool,
    pub connected: bool,
}

impl PointerState {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            position: bounds.center(),
            bounds,
            active: false,
            connected: false,
        }
    }

    /// A device appeared: inactive, cursor back at the center.
    pub fn connect(&mut self) {
        self.connected = true;
        self.active = false;
        self.position = self.bounds.center();
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
        self.active = false;
    }

    /// Returns `true` when the state changed.
    pub fn activate(&mut self) -> bool {
        if !self.connected || self.active {
            return false;
        }
        self.active = true;
        true
    }

    /// Returns `true` when the state changed.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.position = bounds.clamp(self.position);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Activated,
    Deactivated,
}

/// What a frame of input did to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub mode_change: Option<ModeChange>,
    /// The cursor position changed.
    pub moved: bool,
    /// Fixed-step scroll from DPad presses, positive is down.
    pub step_scroll: f32,
    /// Proportional scroll from the left stick, positive is down.
    pub stick_scroll: f32,
}

/// Turns filtered input into cursor motion, scroll and mode changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Translator {
    pub cursor_speed: f32,
    pub dpad_step_px: f32,
    pub stick_multiplier: f32,
    pub stick_threshold: f32,
}

impl Default for Translator {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Translator {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            cursor_speed: settings.pointer.cursor_speed,
            dpad_step_px: settings.scroll.dpad_step_px,
            stick_multiplier: settings.scroll.stick_multiplier,
            stick_threshold: settings.scroll.stick_threshold,
        }
    }

    pub fn translate(&self, input: &FilteredInput, state: &mut PointerState) -> Translation {
        let mut out = Translation::default();
        if !state.connected {
            return out;
        }

        if !state.active {
            if input.was_pressed(Button::Start) && state.activate() {
                out.mode_change = Some(ModeChange::Activated);
            }
            return out;
        }

        if input.was_pressed(Button::X) {
            state.deactivate();
            out.mode_change = Some(ModeChange::Deactivated);
            return out;
        }

        let (rx, ry) = (input.axis(Axis::RightX), input.axis(Axis::RightY));
        if rx != 0.0 || ry != 0.0 {
            let next = state.bounds.clamp(Point::new(
                state.position.x + rx * self.cursor_speed,
                state.position.y + ry * self.cursor_speed,
            ));
            out.moved = next != state.position;
            state.position = next;
        }

        let ly = input.axis(Axis::LeftY);
        if ly.abs() > self.stick_threshold {
            out.stick_scroll = ly * self.stick_multiplier;
        }

        if input.was_pressed(Button::DPadUp) {
            out.step_scroll -= self.dpad_step_px;
        }
        if input.was_pressed(Button::DPadDown) {
            out.step_scroll += self.dpad_step_px;
        }

        out
    }
}
