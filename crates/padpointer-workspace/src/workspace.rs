use std::path::{Path, PathBuf};

use crate::{parse_settings, Settings, SettingsEventReceiver, SettingsWatcher, WorkspaceError};

#[cfg(target_os = "macos")]
const DEFAULT_WORKSPACE_PATH: &str = "Library/Application Support/padpointer";
#[cfg(not(target_os = "macos"))]
const DEFAULT_WORKSPACE_PATH: &str = ".config/padpointer";

const SETTINGS_FILE_NAME: &str = "pp_settings.yaml";

/// Directory holding the settings file and the control socket.
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub fn new(path: Option<&Path>) -> Result<Self, WorkspaceError> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        } else if !path.is_dir() {
            return Err(WorkspaceError::PathIsNotDirectory(
                path.display().to_string(),
            ));
        }

        Ok(Self { path })
    }

    /// Read the settings file. A missing file yields the defaults.
    pub fn load_settings(&self) -> Result<Settings, WorkspaceError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(parse_settings(&content)?)
    }

    pub fn start_settings_watcher(
        &self,
    ) -> Result<(SettingsWatcher, SettingsEventReceiver), WorkspaceError> {
        Ok(SettingsWatcher::new(&self.settings_path())?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path.join(SETTINGS_FILE_NAME)
    }

    pub fn default_path() -> Result<PathBuf, WorkspaceError> {
        let path = std::env::var("HOME")
            .map(PathBuf::from)
            .map(|p| p.join(DEFAULT_WORKSPACE_PATH))
            .map_err(|_| WorkspaceError::EnvVarNotSet("HOME".to_string()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("padpointer-workspace-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn creates_missing_directory_and_defaults_settings() {
        let dir = scratch_dir("create");
        let workspace = Workspace::new(Some(&dir)).expect("workspace should open");
        assert!(dir.is_dir());
        assert_eq!(
            workspace.load_settings().expect("defaults"),
            Settings::default()
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reads_settings_file() {
        let dir = scratch_dir("read");
        let workspace = Workspace::new(Some(&dir)).expect("workspace should open");
        std::fs::write(
            workspace.settings_path(),
            "version: 1\npointer:\n  cursor_speed: 3\n",
        )
        .expect("write settings");
        let settings = workspace.load_settings().expect("settings should parse");
        assert_eq!(settings.pointer.cursor_speed, 3.0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_file_path() {
        let dir = scratch_dir("file");
        std::fs::create_dir_all(&dir).expect("create dir");
        let file = dir.join("not-a-dir");
        std::fs::write(&file, "").expect("write file");
        assert!(matches!(
            Workspace::new(Some(&file)),
            Err(WorkspaceError::PathIsNotDirectory(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
