fn main() {
    // Tauri context is only needed when the app shell is built.
    if std::env::var_os("CARGO_FEATURE_APP").is_some() {
        tauri_build::build();
    }
}
