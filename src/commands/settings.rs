use tauri::State;

use glasspane_core::logging;

use crate::settings::Settings;
use crate::{settings_io, AppState};

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    state
        .settings
        .lock()
        .map(|s| s.clone())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn save_settings(state: State<'_, AppState>, settings: Settings) -> Result<(), String> {
    settings_io::save_settings(&settings).map_err(|e| e.to_string())?;

    // Reload the log filter if the level changed.
    if let Ok(level) = settings.log_level.parse::<logging::LogLevel>() {
        if let Err(e) = logging::init_logging(level, settings.log_to_file) {
            log::warn!("Failed to reload log level: {}", e);
        }
    }

    let mut guard = state.settings.lock().map_err(|e| e.to_string())?;
    *guard = settings;
    Ok(())
}

#[tauri::command]
pub fn get_logs_path() -> Result<String, String> {
    logging::get_logs_dir()
        .map(|p| p.display().to_string())
        .map_err(|e| e.to_string())
}
