//! Settings persistence: load and save `settings.toml`.
//!
//! Files live in the platform config folder:
//! - macOS: ~/Library/Application Support/com.elimu-online.Elimu-Online/
//! - Windows: %APPDATA%/elimu-online/Elimu Online/config/
//! - Linux: ~/.config/elimuonline/
//!
//! The session written by `elimu login` sits next to the settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::Settings;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "elimu-online";
const APP_NAME: &str = "Elimu Online";
const CONFIG_FILENAME: &str = "settings.toml";
const SESSION_FILENAME: &str = "session.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Path of the settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Path of the stored login session, if the platform has a config folder.
pub fn session_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(SESSION_FILENAME))
}

/// Load settings from the platform config folder.
///
/// Falls back to defaults when the folder cannot be determined or the file
/// is missing or unreadable.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Load settings from `path`, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Save settings to the platform config folder and return the path written.
///
/// # Errors
///
/// Returns an error if the folder cannot be determined or written.
pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    let path = settings_path().context("could not determine settings path")?;
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// Save settings to `path`, creating its parent folder.
///
/// # Errors
///
/// Returns an error if the folder or file cannot be written.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    let content = toml::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(path, content)
        .with_context(|| format!("failed to write settings file {}", path.display()))?;

    tracing::info!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingKey;

    #[test]
    fn test_session_sits_next_to_settings() {
        if let (Some(settings), Some(session)) = (settings_path(), session_path()) {
            assert_eq!(settings.parent(), session.parent());
            assert!(session.ends_with(SESSION_FILENAME));
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);

        let mut settings = Settings::default();
        settings.set(SettingKey::Host, "localhost").unwrap();
        settings
            .set(SettingKey::BaseUrl, "http://127.0.0.1:9000/api")
            .unwrap();
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join(CONFIG_FILENAME));
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "host = [not toml").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }
}
