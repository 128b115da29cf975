//! Engine settings and layered JSON loading.
//!
//! Settings come from two layers: the in-code defaults, overlaid by an
//! optional JSON file. Every field is `#[serde(default)]`, so the file only
//! needs the keys it wants to change:
//!
//! ```json
//! { "width": 1024, "display": "Borderless", "max_skipped_updates": 0 }
//! ```
//!
//! A missing file is normal (first run, no overrides) and just logs a warning.
//! A file that exists but can't be read or parsed is an [`EngineError`].

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How the host should present the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
    Borderless,
}

/// Window and simulation-rate settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub width: u32,
    pub height: u32,
    pub display: DisplayMode,
    pub vsync: bool,
    /// Fixed simulation rate. Must be non-zero.
    pub updates_per_second: u32,
    /// Most ticks run per frame; `0` means unbounded.
    pub max_skipped_updates: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            display: DisplayMode::Windowed,
            vsync: true,
            updates_per_second: 60,
            max_skipped_updates: 5,
        }
    }
}

impl EngineSettings {
    /// Defaults overlaid by the JSON file at `path`, if it exists.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        load_layered(path)
    }
}

/// Load a `T` from JSON at `path`, falling back to `T::default()` when the file
/// doesn't exist. Combine with `#[serde(default)]` on `T` so partial files only
/// override the fields they mention.
pub fn load_layered<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> Result<T, EngineError> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::warn!("no settings file at {}, using defaults", path.display());
            return Ok(T::default());
        }
        Err(source) => {
            return Err(EngineError::SettingsIo {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let settings = serde_json::from_str(&text).map_err(|source| EngineError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.updates_per_second, 60);
        assert_eq!(settings.max_skipped_updates, 5);
        assert_eq!(settings.display, DisplayMode::Windowed);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = EngineSettings::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 1024, "display": "Borderless", "max_skipped_updates": 0 }}"#).unwrap();

        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.display, DisplayMode::Borderless);
        assert_eq!(settings.max_skipped_updates, 0);
        assert_eq!(settings.height, 480);
        assert_eq!(settings.updates_per_second, 60);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ width: ").unwrap();
        let err = EngineSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::SettingsParse { .. }));
        assert!(err.to_string().starts_with("failed to parse settings from"));
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineSettings::load(dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::SettingsIo { .. }));
    }
}
