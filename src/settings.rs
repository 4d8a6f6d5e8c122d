use std::time::Duration;

use serde::{Deserialize, Serialize};

use glasspane_core::config;

/// Application settings persisted in the config directory.
///
/// Applied opacity values are deliberately not part of this: transparency
/// state never survives a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds between automatic enumeration passes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Default state of the "show only .exe processes" filter
    #[serde(default = "default_show_only_executables")]
    pub show_only_executables: bool,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,
}

fn default_refresh_interval_secs() -> u64 {
    config::refresh::DEFAULT_INTERVAL_SECS
}

fn default_show_only_executables() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

fn default_log_retention_days() -> u32 {
    config::logging::DEFAULT_RETENTION_DAYS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            show_only_executables: default_show_only_executables(),
            log_level: default_log_level(),
            log_to_file: default_log_to_file(),
            log_retention_days: default_log_retention_days(),
        }
    }
}

impl Settings {
    /// Refresh period, clamped to the supported minimum.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval_secs
                .max(config::refresh::MIN_INTERVAL_SECS),
        )
    }
}
