use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use glasspane_core::controller::Controller;
use glasspane_core::logging;
use glasspane_core::platform;
use glasspane_core::registry::WindowRegistry;

use crate::settings::Settings;
use crate::{settings_io, AppState};

/// Load settings early so the log level is known before anything else runs.
pub(crate) fn load_initial_settings() -> Settings {
    settings_io::load_settings()
}

/// Initialize logging from settings.
pub(crate) fn init_logging(settings: &Settings) {
    let log_level = settings
        .log_level
        .parse::<logging::LogLevel>()
        .unwrap_or(logging::LogLevel::Info);

    if let Err(e) = logging::init_logging(log_level, settings.log_to_file) {
        eprintln!("Failed to initialize logging: {}", e);
    } else {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            platform = std::env::consts::OS,
            log_level = %log_level,
            refresh_interval_secs = settings.refresh_interval_secs,
            show_only_executables = settings.show_only_executables,
            "Glasspane started"
        );
    }

    if settings.log_to_file {
        logging::auto_cleanup_old_logs(settings.log_retention_days);
    }
}

/// Set up panic hook so crashes still land in the log.
pub(crate) fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(?panic_info, "Application panic detected");
        default_panic(panic_info);
    }));
}

/// Wire up the OS collaborators and the controller-owned registry.
pub(crate) fn build_app_state(settings: Settings) -> AppState {
    let (enumerator, inspector, backend) = platform::system_collaborators();
    let registry = WindowRegistry::new(backend);

    AppState {
        controller: Arc::new(Mutex::new(Controller::new(registry))),
        settings: Arc::new(Mutex::new(settings)),
        enumerator: Arc::from(enumerator),
        inspector: Arc::from(inspector),
        refresh_in_flight: Arc::new(AtomicBool::new(false)),
        refresh_stop: Arc::new(AtomicBool::new(false)),
    }
}
