use padpointer_bit_derive::Bit;
use padpointer_bit_mask::Bitmask;

/// Unique identifier of a controller device (SDL instance id).
pub type ControllerId = u32;

/// Number of buttons in a [`DeviceSnapshot`].
pub const BUTTON_COUNT: usize = 16;

/// Number of analog stick axes in a [`DeviceSnapshot`].
pub const AXIS_COUNT: usize = 4;

/// Logical controller buttons in standard gamepad order (index 0..15).
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    /// LB
    LeftShoulder,
    /// RB
    RightShoulder,
    /// LT, reported as a button past a fixed threshold.
    LeftTrigger,
    /// RT, reported as a button past a fixed threshold.
    RightTrigger,
    Back,
    Start,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftShoulder,
        Button::RightShoulder,
        Button::LeftTrigger,
        Button::RightTrigger,
        Button::Back,
        Button::Start,
        Button::LeftStick,
        Button::RightStick,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
    ];
}

/// Set of buttons.
pub type ButtonSet = Bitmask<Button>;

/// Analog stick axes in standard gamepad order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] =
        [Axis::LeftX, Axis::LeftY, Axis::RightX, Axis::RightY];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::LeftX => 0,
            Axis::LeftY => 1,
            Axis::RightX => 2,
            Axis::RightY => 3,
        }
    }
}

/// Controller meta information that remains stable across events.
#[derive(Debug, Clone)]
pub struct ControllerInfo {
    pub id: ControllerId,
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub supports_rumble: bool,
}

/// Raw state of one controller, read once per frame.
///
/// Axis values are in [-1.0, 1.0]; positive Y points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSnapshot {
    pub id: ControllerId,
    pub buttons: ButtonSet,
    pub axes: [f32; AXIS_COUNT],
}

impl DeviceSnapshot {
    /// A snapshot with nothing held and sticks at rest.
    pub fn new(id: ControllerId) -> Self {
        Self {
            id,
            buttons: ButtonSet::empty(),
            axes: [0.0; AXIS_COUNT],
        }
    }

    /// Build a snapshot from ordered button and axis lists.
    /// Axis values are clamped to [-1.0, 1.0]; NaN reads as rest.
    pub fn from_raw(
        id: ControllerId,
        buttons: [bool; BUTTON_COUNT],
        axes: [f32; AXIS_COUNT],
    ) -> Self {
        let mut set = ButtonSet::empty();
        for (button, held) in Button::ALL.into_iter().zip(buttons) {
            set.set(button, held);
        }
        Self {
            id,
            buttons: set,
            axes: axes.map(normalize_axis),
        }
    }

    #[inline]
    pub fn is_held(&self, button: Button) -> bool {
        self.buttons.contains(button)
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes[axis.index()]
    }

    pub fn with_button(mut self, button: Button, held: bool) -> Self {
        self.buttons.set(button, held);
        self
    }

    pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
        self.axes[axis.index()] = normalize_axis(value);
        self
    }
}

#[inline]
fn normalize_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
