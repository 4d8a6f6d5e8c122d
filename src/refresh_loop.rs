//! Periodic window re-enumeration.
//!
//! A single background thread produces candidate snapshots at a fixed
//! interval; the merge into the registry happens on the main thread so UI
//! state is only ever mutated from one context. Ticks never overlap: if a
//! pass is still in flight the next tick is skipped, not queued.

use std::sync::atomic::Ordering;

use tauri::{AppHandle, Emitter};

use glasspane_core::config;
use glasspane_core::registry::{self, WindowEntry};

use crate::AppState;

/// Event the frontend listens to for re-rendering both lists.
pub(crate) const WINDOWS_CHANGED_EVENT: &str = "windows-changed";

/// Enumerate and filter, off the UI-owning context. Pure snapshot
/// production: registry state is untouched here.
pub(crate) fn build_snapshot(state: &AppState) -> anyhow::Result<Vec<WindowEntry>> {
    let raw = state.enumerator.snapshot()?;
    Ok(registry::build_candidates(raw, state.inspector.as_ref()))
}

/// Merge a snapshot under the controller lock and notify the frontend.
pub(crate) fn merge_snapshot(app: &AppHandle, state: &AppState, entries: Vec<WindowEntry>) {
    let count = entries.len();
    match state.controller.lock() {
        Ok(mut controller) => controller.registry_mut().merge_snapshot(entries),
        Err(e) => {
            log::warn!("Controller lock unavailable, dropping snapshot: {}", e);
            return;
        }
    }
    tracing::debug!(windows = count, "Merged enumeration snapshot");
    if let Err(e) = app.emit(WINDOWS_CHANGED_EVENT, count) {
        log::warn!("Failed to emit {}: {}", WINDOWS_CHANGED_EVENT, e);
    }
}

/// Start the refresh thread; runs until `refresh_stop` is raised at exit.
pub(crate) fn spawn(app: AppHandle, state: AppState) {
    std::thread::spawn(move || {
        tracing::debug!("Refresh thread started");
        loop {
            let interval = state
                .settings
                .lock()
                .map(|s| s.refresh_interval())
                .unwrap_or_else(|_| {
                    std::time::Duration::from_secs(config::refresh::DEFAULT_INTERVAL_SECS)
                });
            std::thread::sleep(interval);

            if state.refresh_stop.load(Ordering::SeqCst) {
                break;
            }
            if state.refresh_in_flight.swap(true, Ordering::SeqCst) {
                // Previous pass still running; skip this tick.
                continue;
            }

            match build_snapshot(&state) {
                Ok(entries) => {
                    let app_for_merge = app.clone();
                    let state_for_merge = state.clone();
                    let marshalled = app.run_on_main_thread(move || {
                        merge_snapshot(&app_for_merge, &state_for_merge, entries);
                        state_for_merge
                            .refresh_in_flight
                            .store(false, Ordering::SeqCst);
                    });
                    if marshalled.is_err() {
                        // Main thread is gone; the app is shutting down.
                        state.refresh_in_flight.store(false, Ordering::SeqCst);
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("Window enumeration failed: {}", e);
                    state.refresh_in_flight.store(false, Ordering::SeqCst);
                }
            }
        }
        tracing::debug!("Refresh thread stopped");
    });
}
