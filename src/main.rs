// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::atomic::Ordering;

mod app_bootstrap;
mod app_state;
mod commands;
mod refresh_loop;
mod settings;
mod settings_io;

pub(crate) use app_state::AppState;

fn main() {
    // Logging and panic hook come up before anything touches the OS
    let initial_settings = app_bootstrap::load_initial_settings();
    app_bootstrap::init_logging(&initial_settings);
    app_bootstrap::install_panic_hook();

    let app_state = app_bootstrap::build_app_state(initial_settings);
    let state_for_setup = app_state.clone();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(app_state.clone())
        .invoke_handler(commands::handlers())
        .setup(move |app| {
            refresh_loop::spawn(app.handle().clone(), state_for_setup.clone());
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");

    // Normal exit: stop the refresh thread and leave every window as-is;
    // applied opacities are intentionally not persisted or restored.
    app_state.refresh_stop.store(true, Ordering::SeqCst);
    log::info!("Application exiting normally");
}
