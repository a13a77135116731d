use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Config, Error as NotifyError, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{
    new_debouncer_opt, DebounceEventResult, DebouncedEventKind, Debouncer,
};
use thiserror::Error;

use crate::{parse_settings, Settings, SettingsError};

const DEBOUNCE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] SettingsError),
}

/// Watches the settings file and reports parsed changes.
pub struct SettingsWatcher {
    #[allow(dead_code)]
    watcher: Debouncer<RecommendedWatcher>,
}

pub enum SettingsEvent {
    Changed(Settings),
    Removed,
    Error(WatcherError),
}

type SettingsEventSender = mpsc::Sender<SettingsEvent>;
pub type SettingsEventReceiver = mpsc::Receiver<SettingsEvent>;

fn send_settings_event(path: &Path, tx: &SettingsEventSender) {
    match fs::read_to_string(path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                let _ = tx.send(SettingsEvent::Changed(settings));
            }
            Err(e) => {
                let _ = tx.send(SettingsEvent::Error(WatcherError::Parse(e)));
            }
        },
        Err(e) => {
            let _ = tx.send(SettingsEvent::Error(WatcherError::Io(e)));
        }
    };
}

impl SettingsWatcher {
    /// Watch `path`. The parent directory is watched so that the file may be
    /// created, replaced or removed while the watcher runs.
    pub fn new_with_sender(
        path: &Path,
        tx: SettingsEventSender,
    ) -> Result<Self, WatcherError> {
        let path_c: PathBuf = path.to_owned();
        let file_name = path.file_name().map(|name| name.to_owned());
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_owned();

        let debouncer_config = notify_debouncer_mini::Config::default()
            .with_timeout(DEBOUNCE_TIMEOUT)
            .with_notify_config(Config::default());
        let mut debouncer = new_debouncer_opt::<_, RecommendedWatcher>(
            debouncer_config,
            move |events: DebounceEventResult| match events {
                Ok(events) => {
                    let touched = events.iter().any(|event| {
                        matches!(
                            event.kind,
                            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                        ) && event.path.file_name() == file_name.as_deref()
                    });
                    if !touched {
                        return;
                    }
                    if path_c.exists() {
                        send_settings_event(&path_c, &tx);
                    } else {
                        let _ = tx.send(SettingsEvent::Removed);
                    }
                }
                Err(error) => {
                    let _ = tx.send(SettingsEvent::Error(WatcherError::Notify(error)));
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self { watcher: debouncer })
    }

    pub fn new(path: &Path) -> Result<(Self, SettingsEventReceiver), WatcherError> {
        let (tx, rx) = mpsc::channel();

        Ok((Self::new_with_sender(path, tx)?, rx))
    }
}
