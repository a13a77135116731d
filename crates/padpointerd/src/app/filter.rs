use padpointer_gamepad::{Axis, Button, ButtonSet, DeviceSnapshot, AXIS_COUNT};

/// One frame of controller input after dead-zone and edge filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredInput {
    /// Buttons currently down.
    pub held: ButtonSet,
    /// Buttons that went down this frame.
    pub pressed: ButtonSet,
    /// Axes with resting noise removed.
    pub axes: [f32; AXIS_COUNT],
}

impl FilteredInput {
    #[inline]
    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes[axis.index()]
    }

    #[inline]
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(button)
    }

    #[inline]
    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(button)
    }
}

/// Values with magnitude at or below `deadzone` become exactly zero,
/// everything else passes through unchanged.
#[inline]
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() <= deadzone {
        0.0
    } else {
        value
    }
}

/// Derive this frame's filtered input from the current snapshot and the
/// buttons held on the previous frame.
///
/// `previous` is `None` when the previous frame is unknown (right after a
/// device appeared); nothing counts as pressed then, so buttons already down
/// at connect time do not fire.
pub fn filter(
    current: &DeviceSnapshot,
    previous: Option<ButtonSet>,
    deadzone: f32,
) -> FilteredInput {
    let held = current.buttons;
    let previous = previous.unwrap_or(held);
    FilteredInput {
        held,
        pressed: held.difference(&previous),
        axes: current.axes.map(|value| apply_deadzone(value, deadzone)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADZONE: f32 = 0.01;

    #[test]
    fn small_values_become_zero() {
        for v in [0.0, 0.005, -0.008, 0.01, -0.01, -0.0] {
            let filtered = apply_deadzone(v, DEADZONE);
            assert_eq!(filtered, 0.0, "value {v}");
            assert!(filtered.is_sign_positive());
        }
    }

    #[test]
    fn large_values_pass_unchanged() {
        for v in [0.0101, -0.02, 0.5, -1.0, 1.0] {
            assert_eq!(apply_deadzone(v, DEADZONE), v);
        }
    }

    #[test]
    fn resting_stick_noise_is_removed() {
        let snap = DeviceSnapshot::new(1)
            .with_axis(Axis::RightX, 0.005)
            .with_axis(Axis::RightY, -0.008)
            .with_axis(Axis::LeftY, 0.4);
        let input = filter(&snap, Some(ButtonSet::empty()), DEADZONE);
        assert_eq!(input.axis(Axis::RightX), 0.0);
        assert_eq!(input.axis(Axis::RightY), 0.0);
        assert_eq!(input.axis(Axis::LeftY), 0.4);
    }

    #[test]
    fn press_fires_once_while_held() {
        let released = DeviceSnapshot::new(1);
        let held = released.with_button(Button::A, true);

        let mut previous = Some(ButtonSet::empty());
        let mut fired = Vec::new();
        for snap in [held, held, held, held, released, held, held] {
            let input = filter(&snap, previous, DEADZONE);
            fired.push(input.was_pressed(Button::A));
            previous = Some(input.held);
        }
        assert_eq!(fired, [true, false, false, false, false, true, false]);
    }

    #[test]
    fn unknown_previous_frame_fires_nothing() {
        let snap = DeviceSnapshot::new(1)
            .with_button(Button::Start, true)
            .with_button(Button::A, true);
        let input = filter(&snap, None, DEADZONE);
        assert!(input.pressed.is_empty());
        assert!(input.is_held(Button::Start));
    }

    #[test]
    fn edges_are_tracked_per_button() {
        let previous = DeviceSnapshot::new(1).with_button(Button::B, true);
        let current = previous.with_button(Button::X, true);
        let input = filter(&current, Some(previous.buttons), DEADZONE);
        assert!(input.was_pressed(Button::X));
        assert!(!input.was_pressed(Button::B));
        assert!(input.is_held(Button::B));
    }
}
