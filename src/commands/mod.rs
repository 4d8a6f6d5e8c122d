pub mod settings;
pub mod system;
pub mod windows;

pub fn handlers() -> impl Fn(tauri::ipc::Invoke<tauri::Wry>) -> bool + Send + Sync + 'static {
    tauri::generate_handler![
        windows::list_windows,
        windows::list_applied,
        windows::select_window,
        windows::set_opacity,
        windows::apply_opacity,
        windows::reset_selected,
        windows::reset_all,
        windows::refresh_windows,
        settings::get_settings,
        settings::save_settings,
        settings::get_logs_path,
        system::get_app_version,
    ]
}
