use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use glasspane_core::controller::Controller;
use glasspane_core::platform::{ProcessInspector, WindowEnumerator};

use crate::settings::Settings;

/// Shared application state handed to Tauri via `.manage()`.
///
/// The controller (and the registry inside it) is the single point of
/// mutation; the background refresh thread only produces snapshots and
/// merges them under this lock on the main thread.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) controller: Arc<Mutex<Controller>>,
    pub(crate) settings: Arc<Mutex<Settings>>,
    pub(crate) enumerator: Arc<dyn WindowEnumerator>,
    pub(crate) inspector: Arc<dyn ProcessInspector>,
    /// Set while a refresh pass is in flight; overlapping ticks are skipped.
    pub(crate) refresh_in_flight: Arc<AtomicBool>,
    /// Raised on shutdown so the refresh thread exits.
    pub(crate) refresh_stop: Arc<AtomicBool>,
}
