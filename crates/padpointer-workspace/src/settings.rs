use std::time::Duration;

/// Runtime settings of the pointer emulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Interval between two frames of the poll loop.
    pub frame_interval: Duration,
    pub pointer: PointerSettings,
    pub scroll: ScrollSettings,
    /// Fixed viewport. `None` means the main display.
    pub viewport: Option<Viewport>,
    pub feedback: FeedbackSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerSettings {
    /// Cursor travel in pixels per frame at full right stick deflection.
    pub cursor_speed: f32,
    /// Axis values with magnitude at or below this are read as zero.
    pub deadzone: f32,
    /// Delay between the synthetic pointer-down and pointer-up of a click.
    pub click_delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSettings {
    /// Pixels scrolled by a single DPad up/down press.
    pub dpad_step_px: f32,
    /// Pixels per frame at full left stick deflection.
    pub stick_multiplier: f32,
    /// Left stick deflection needed before it scrolls.
    pub stick_threshold: f32,
    /// Pixels per wheel step emitted to the OS.
    pub step_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSettings {
    /// Rumble duration on every mode change, disabled when `None`.
    pub rumble_ms: Option<u16>,
}

pub(crate) const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub(crate) const DEFAULT_CURSOR_SPEED: f32 = 8.0;
pub(crate) const DEFAULT_DEADZONE: f32 = 0.01;
pub(crate) const DEFAULT_CLICK_DELAY_MS: u64 = 50;
pub(crate) const DEFAULT_DPAD_STEP_PX: f32 = 200.0;
pub(crate) const DEFAULT_STICK_MULTIPLIER: f32 = 20.0;
pub(crate) const DEFAULT_STICK_THRESHOLD: f32 = 0.1;

/// macOS smooth scrolling takes pixels, other platforms take wheel notches.
#[cfg(target_os = "macos")]
pub(crate) const DEFAULT_SCROLL_STEP_PX: f32 = 1.0;
#[cfg(not(target_os = "macos"))]
pub(crate) const DEFAULT_SCROLL_STEP_PX: f32 = 40.0;

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            pointer: PointerSettings::default(),
            scroll: ScrollSettings::default(),
            viewport: None,
            feedback: FeedbackSettings::default(),
        }
    }
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            cursor_speed: DEFAULT_CURSOR_SPEED,
            deadzone: DEFAULT_DEADZONE,
            click_delay: Duration::from_millis(DEFAULT_CLICK_DELAY_MS),
        }
    }
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            dpad_step_px: DEFAULT_DPAD_STEP_PX,
            stick_multiplier: DEFAULT_STICK_MULTIPLIER,
            stick_threshold: DEFAULT_STICK_THRESHOLD,
            step_px: DEFAULT_SCROLL_STEP_PX,
        }
    }
}
