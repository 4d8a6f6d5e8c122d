//! Settings persistence in the platform config directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::settings::Settings;

const SETTINGS_FILE: &str = "settings.json";

/// Config directory for Glasspane, created on demand.
pub fn glasspane_config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("Glasspane");
    if !dir.exists() {
        fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

pub fn settings_path() -> Option<PathBuf> {
    glasspane_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Load settings from disk, falling back to defaults on any failure.
/// Unknown fields are ignored and missing ones take their serde defaults,
/// so older files keep working.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        return Settings::default();
    };
    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings file {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = settings_path().context("No config directory available")?;
    let contents =
        serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write settings to {:?}", path))?;
    tracing::debug!(path = ?path, "Settings saved");
    Ok(())
}
