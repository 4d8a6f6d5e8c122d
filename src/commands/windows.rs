//! Window list and opacity commands.
//!
//! Thin glue: every gesture becomes a core `Command` dispatched through the
//! controller, and errors come back as strings for the frontend's blocking
//! dialogs.

use serde::Serialize;
use tauri::{AppHandle, State};

use glasspane_core::controller::Command;
use glasspane_core::platform::WindowHandle;

use crate::{refresh_loop, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct AvailableRow {
    pub handle: WindowHandle,
    pub label: String,
    pub title: String,
    pub executable: String,
    pub is_executable_backed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedRow {
    pub handle: WindowHandle,
    pub label: String,
    pub title: String,
    pub percent: u8,
}

fn dispatch(state: &AppState, command: Command) -> Result<String, String> {
    let mut controller = state.controller.lock().map_err(|e| e.to_string())?;
    controller
        .handle(command)
        .map(|outcome| outcome.status_message())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn list_windows(
    state: State<'_, AppState>,
    show_only_executables: bool,
) -> Result<Vec<AvailableRow>, String> {
    let controller = state.controller.lock().map_err(|e| e.to_string())?;
    Ok(controller
        .registry()
        .visible_candidates(show_only_executables)
        .into_iter()
        .map(|entry| AvailableRow {
            handle: entry.handle,
            label: entry.display_label(),
            title: entry.title.clone(),
            executable: entry.process_label().to_string(),
            is_executable_backed: entry.is_executable_backed,
        })
        .collect())
}

#[tauri::command]
pub fn list_applied(state: State<'_, AppState>) -> Result<Vec<AppliedRow>, String> {
    let controller = state.controller.lock().map_err(|e| e.to_string())?;
    Ok(controller
        .registry()
        .applied()
        .into_iter()
        .map(|entry| AppliedRow {
            handle: entry.handle,
            label: entry.display_label(),
            title: entry.title.clone(),
            percent: entry.opacity_percent,
        })
        .collect())
}

#[tauri::command]
pub fn select_window(
    state: State<'_, AppState>,
    handle: Option<isize>,
) -> Result<String, String> {
    dispatch(&state, Command::Select(handle.map(WindowHandle)))
}

#[tauri::command]
pub fn set_opacity(state: State<'_, AppState>, percent: u8) -> Result<String, String> {
    dispatch(&state, Command::SetOpacity(percent))
}

#[tauri::command]
pub fn apply_opacity(state: State<'_, AppState>) -> Result<String, String> {
    dispatch(&state, Command::Apply)
}

#[tauri::command]
pub fn reset_selected(state: State<'_, AppState>) -> Result<String, String> {
    dispatch(&state, Command::ResetSelected)
}

#[tauri::command]
pub fn reset_all(state: State<'_, AppState>) -> Result<String, String> {
    dispatch(&state, Command::ResetAll)
}

/// Manual refresh; shares the snapshot/merge path with the timer. Async so
/// the enumeration pass stays off the main thread.
#[tauri::command]
pub async fn refresh_windows(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<usize, String> {
    let state = state.inner().clone();
    let entries = tauri::async_runtime::spawn_blocking({
        let state = state.clone();
        move || refresh_loop::build_snapshot(&state)
    })
    .await
    .map_err(|e| e.to_string())?
    .map_err(|e| e.to_string())?;

    // Merge on the main thread, same as the periodic loop.
    let count = entries.len();
    let app_for_merge = app.clone();
    let state_for_merge = state.clone();
    app.run_on_main_thread(move || {
        refresh_loop::merge_snapshot(&app_for_merge, &state_for_merge, entries);
    })
    .map_err(|e| e.to_string())?;
    Ok(count)
}
