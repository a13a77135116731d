use enigo::{
    Axis, Button, Coordinate,
    Direction::{Click, Press, Release},
    Enigo, InputResult, Mouse, NewConError, Settings,
};

/// Mouse buttons the performer can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

impl From<MouseButton> for Button {
    fn from(value: MouseButton) -> Self {
        match value {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
        }
    }
}

/// OS-level pointer input.
pub struct Performer {
    enigo: Enigo,
}

// SAFETY: the performer is owned by a single event loop thread. The internal
// CGEventSource is only used on the thread that actually performs the input.
unsafe impl Send for Performer {}

impl Performer {
    /// Create a new performer.
    pub fn new() -> Result<Self, NewConError> {
        let settings = Settings::default();
        let enigo = Enigo::new(&settings)?;
        Ok(Self { enigo })
    }

    /// Size of the main display in pixels.
    pub fn display_size(&self) -> InputResult<(i32, i32)> {
        self.enigo.main_display()
    }

    /// Move the pointer to an absolute position on the main display.
    pub fn move_to(&mut self, x: i32, y: i32) -> InputResult<()> {
        self.enigo.move_mouse(x, y, Coordinate::Abs)
    }

    /// Press a mouse button and keep it held.
    pub fn press(&mut self, button: MouseButton) -> InputResult<()> {
        self.enigo.button(button.into(), Press)
    }

    /// Release a previously pressed mouse button.
    pub fn release(&mut self, button: MouseButton) -> InputResult<()> {
        self.enigo.button(button.into(), Release)
    }

    /// Press and release a mouse button.
    pub fn click(&mut self, button: MouseButton) -> InputResult<()> {
        self.enigo.button(button.into(), Click)
    }

    /// Scroll vertically, positive values scroll down.
    /// Uses macOS specific smooth scrolling.
    #[cfg(target_os = "macos")]
    pub fn scroll_y(&mut self, value: i32) -> InputResult<()> {
        self.enigo.smooth_scroll(value, Axis::Vertical)
    }

    /// Scroll vertically by wheel steps, positive values scroll down.
    #[cfg(not(target_os = "macos"))]
    pub fn scroll_y(&mut self, value: i32) -> InputResult<()> {
        self.enigo.scroll(value, Axis::Vertical)
    }
}
