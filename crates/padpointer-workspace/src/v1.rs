use std::time::Duration;

use serde::Deserialize;

use crate::settings::{
    FeedbackSettings, PointerSettings, ScrollSettings, Settings, Viewport,
    DEFAULT_CLICK_DELAY_MS, DEFAULT_CURSOR_SPEED, DEFAULT_DEADZONE,
    DEFAULT_DPAD_STEP_PX, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_SCROLL_STEP_PX,
    DEFAULT_STICK_MULTIPLIER, DEFAULT_STICK_THRESHOLD,
};
use crate::SettingsError;

const MAX_FRAME_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsV1 {
    #[allow(dead_code)]
    pub version: u8,
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,
    #[serde(default)]
    pub pointer: SettingsV1Pointer,
    #[serde(default)]
    pub scroll: SettingsV1Scroll,
    #[serde(default)]
    pub viewport: Option<SettingsV1Viewport>,
    #[serde(default)]
    pub feedback: SettingsV1Feedback,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsV1Pointer {
    #[serde(default)]
    pub cursor_speed: Option<f32>,
    #[serde(default)]
    pub deadzone: Option<f32>,
    #[serde(default)]
    pub click_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsV1Scroll {
    #[serde(default)]
    pub dpad_step_px: Option<f32>,
    #[serde(default)]
    pub stick_multiplier: Option<f32>,
    #[serde(default)]
    pub stick_threshold: Option<f32>,
    #[serde(default)]
    pub step_px: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsV1Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsV1Feedback {
    #[serde(default)]
    pub rumble_ms: Option<u16>,
}

impl SettingsV1 {
    pub(crate) fn into_settings(self) -> Result<Settings, SettingsError> {
        let frame_interval_ms =
            self.frame_interval_ms.unwrap_or(DEFAULT_FRAME_INTERVAL_MS);
        if frame_interval_ms == 0 || frame_interval_ms > MAX_FRAME_INTERVAL_MS {
            return Err(invalid(
                "frame_interval_ms",
                format!("must be within 1..={MAX_FRAME_INTERVAL_MS}"),
            ));
        }

        let pointer = PointerSettings {
            cursor_speed: positive(
                "pointer.cursor_speed",
                self.pointer.cursor_speed.unwrap_or(DEFAULT_CURSOR_SPEED),
            )?,
            deadzone: unit_fraction(
                "pointer.deadzone",
                self.pointer.deadzone.unwrap_or(DEFAULT_DEADZONE),
            )?,
            click_delay: Duration::from_millis(
                self.pointer.click_delay_ms.unwrap_or(DEFAULT_CLICK_DELAY_MS),
            ),
        };

        let scroll = ScrollSettings {
            dpad_step_px: positive(
                "scroll.dpad_step_px",
                self.scroll.dpad_step_px.unwrap_or(DEFAULT_DPAD_STEP_PX),
            )?,
            stick_multiplier: positive(
                "scroll.stick_multiplier",
                self.scroll.stick_multiplier.unwrap_or(DEFAULT_STICK_MULTIPLIER),
            )?,
            stick_threshold: unit_fraction(
                "scroll.stick_threshold",
                self.scroll.stick_threshold.unwrap_or(DEFAULT_STICK_THRESHOLD),
            )?,
            step_px: positive(
                "scroll.step_px",
                self.scroll.step_px.unwrap_or(DEFAULT_SCROLL_STEP_PX),
            )?,
        };

        let viewport = match self.viewport {
            Some(SettingsV1Viewport { width, height }) => {
                if width == 0 || height == 0 {
                    return Err(invalid("viewport", "width and height must be non-zero"));
                }
                Some(Viewport { width, height })
            }
            None => None,
        };

        Ok(Settings {
            frame_interval: Duration::from_millis(frame_interval_ms),
            pointer,
            scroll,
            viewport,
            feedback: FeedbackSettings {
                rumble_ms: self.feedback.rumble_ms.filter(|ms| *ms > 0),
            },
        })
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

/// A threshold on normalized axis values, within [0, 1).
fn unit_fraction(field: &'static str, value: f32) -> Result<f32, SettingsError> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(field, format!("expected a value in [0, 1), got {value}")))
    }
}
