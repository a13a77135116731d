mod parse;
mod settings;
mod v1;
mod watcher;
mod workspace;

use thiserror::Error;

pub use parse::parse_settings;
pub use settings::{
    FeedbackSettings, PointerSettings, ScrollSettings, Settings, Viewport,
};
pub use watcher::{SettingsEvent, SettingsEventReceiver, SettingsWatcher, WatcherError};
pub use workspace::Workspace;

/// Errors produced while reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors produced while preparing the workspace directory.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
    #[error("path is not a directory: {0}")]
    PathIsNotDirectory(String),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("watcher error: {0}")]
    WatcherError(#[from] WatcherError),
}
