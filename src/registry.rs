//! Window registry: discoverable windows plus the applied-opacity set.
//!
//! Entries are rebuilt wholesale on every refresh; only the applied set
//! survives across passes. Identity is keyed by the OS window handle, with
//! the full (untruncated) title retained for display and for the
//! dedupe/exclusion rules.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config;
use crate::error::OpacityError;
use crate::opacity::{alpha_from_percent, OpacityBackend};
use crate::platform::{ProcessInspector, RawWindow, WindowHandle};

/// One discoverable top-level window, rebuilt fresh each enumeration pass.
#[derive(Debug, Clone)]
pub struct WindowEntry {
    pub handle: WindowHandle,
    /// OS-reported caption at enumeration time, never truncated here.
    pub title: String,
    pub process_id: Option<u32>,
    pub executable_path: Option<PathBuf>,
    pub executable_name: Option<String>,
    /// True when the resolved image path ends in the executable suffix.
    pub is_executable_backed: bool,
}

impl WindowEntry {
    /// Process label for sorting and display; placeholder when the owning
    /// process could not be resolved.
    pub fn process_label(&self) -> &str {
        self.executable_name
            .as_deref()
            .unwrap_or(config::filter::UNRESOLVED_PROCESS_LABEL)
    }

    /// Row label for the available list, truncated for rendering only.
    pub fn display_label(&self) -> String {
        let label = match self.executable_name.as_deref() {
            Some(exe) => format!("{} - {}", exe, self.title),
            None => self.title.clone(),
        };
        config::truncate_label(&label, config::display::AVAILABLE_LABEL_MAX)
    }
}

/// A window the user gave a non-default opacity. Never persisted.
#[derive(Debug, Clone)]
pub struct AppliedOpacity {
    pub handle: WindowHandle,
    pub title: String,
    /// User-chosen percent, 0-100.
    pub opacity_percent: u8,
    /// Always the deterministic half-up rounding of `opacity_percent`.
    pub alpha: u8,
}

impl AppliedOpacity {
    /// Row label for the applied list, e.g. `"Notepad (40%)"`.
    pub fn display_label(&self) -> String {
        let title = config::truncate_label(&self.title, config::display::APPLIED_TITLE_MAX);
        format!("{} ({}%)", title, self.opacity_percent)
    }
}

/// Turn a raw enumeration snapshot into the filtered, ordered candidate set.
///
/// Policy, applied in order: self-exclusion by title marker, executable
/// classification from the resolved image path, allow-list rescue for
/// unresolved processes, dedupe by title keeping the first occurrence,
/// case-insensitive sort by executable name.
pub fn build_candidates(
    raw: Vec<RawWindow>,
    inspector: &dyn ProcessInspector,
) -> Vec<WindowEntry> {
    let mut entries: Vec<WindowEntry> = Vec::new();
    let mut seen_titles: Vec<String> = Vec::new();

    for window in raw {
        let title_lower = window.title.to_lowercase();

        if config::filter::SELF_TITLE_MARKERS
            .iter()
            .any(|marker| title_lower.contains(marker))
        {
            continue;
        }

        let executable_path = window.process_id.and_then(|pid| inspector.executable_path(pid));
        let executable_name = executable_path.as_deref().and_then(executable_basename);
        let is_executable_backed = executable_path
            .as_deref()
            .map(|p| {
                p.to_string_lossy()
                    .to_lowercase()
                    .ends_with(config::filter::EXECUTABLE_SUFFIX)
            })
            .unwrap_or(false);

        if !is_executable_backed {
            // Unresolved processes survive only via the allow-list of
            // well-known interactive applications.
            let allow_listed = executable_path.is_none()
                && config::filter::UNRESOLVED_TITLE_ALLOW_LIST
                    .iter()
                    .any(|fragment| title_lower.contains(fragment));
            if !allow_listed {
                continue;
            }
        }

        // Dedupe by title, first occurrence wins
        if seen_titles.iter().any(|t| t == &window.title) {
            continue;
        }
        seen_titles.push(window.title.clone());

        entries.push(WindowEntry {
            handle: window.handle,
            title: window.title,
            process_id: window.process_id,
            executable_path,
            executable_name,
            is_executable_backed,
        });
    }

    entries.sort_by(|a, b| {
        let left = (a.process_label().to_lowercase(), a.title.to_lowercase());
        let right = (b.process_label().to_lowercase(), b.title.to_lowercase());
        left.cmp(&right)
    });
    entries
}

/// Last component of an image path. Inspected paths are Windows-style
/// strings and `Path::file_name` only splits on the host separator, so
/// split on both kinds explicitly.
fn executable_basename(path: &std::path::Path) -> Option<String> {
    path.to_string_lossy()
        .rsplit(['\\', '/'])
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Outcome of a reset-all pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSummary {
    pub attempted: usize,
    pub failed: usize,
}

/// In-memory window state plus the layered-window write path.
///
/// Mutated only from the UI-owning context; background refreshes hand in
/// immutable snapshots through [`WindowRegistry::merge_snapshot`].
pub struct WindowRegistry {
    backend: Box<dyn OpacityBackend>,
    available: Vec<WindowEntry>,
    applied: BTreeMap<WindowHandle, AppliedOpacity>,
}

impl WindowRegistry {
    pub fn new(backend: Box<dyn OpacityBackend>) -> Self {
        Self {
            backend,
            available: Vec::new(),
            applied: BTreeMap::new(),
        }
    }

    /// Replace the candidate set with a freshly built snapshot.
    pub fn merge_snapshot(&mut self, entries: Vec<WindowEntry>) {
        self.available = entries;
    }

    /// Full candidate set from the last refresh, before applied-set
    /// exclusion.
    pub fn available(&self) -> &[WindowEntry] {
        &self.available
    }

    /// Candidates eligible for the available list: anything already in the
    /// applied set (by handle or by title) is excluded so a logical window
    /// never appears in both lists at once.
    pub fn visible_candidates(&self, show_only_executables: bool) -> Vec<&WindowEntry> {
        self.available
            .iter()
            .filter(|entry| !self.applied.contains_key(&entry.handle))
            .filter(|entry| !self.applied.values().any(|a| a.title == entry.title))
            .filter(|entry| !show_only_executables || entry.is_executable_backed)
            .collect()
    }

    /// Applied entries ordered by title for stable display.
    pub fn applied(&self) -> Vec<&AppliedOpacity> {
        let mut entries: Vec<&AppliedOpacity> = self.applied.values().collect();
        entries.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        entries
    }

    pub fn applied_is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn find_available(&self, handle: WindowHandle) -> Option<&WindowEntry> {
        self.available.iter().find(|entry| entry.handle == handle)
    }

    pub fn find_applied(&self, handle: WindowHandle) -> Option<&AppliedOpacity> {
        self.applied.get(&handle)
    }

    /// Apply `percent` opacity to a window. Validates the percent before
    /// any OS call; on backend failure the registry is left unchanged.
    /// Re-applying to an already-applied window overwrites its entry.
    pub fn apply(&mut self, handle: WindowHandle, percent: u8) -> Result<u8, OpacityError> {
        let alpha = alpha_from_percent(percent)?;

        let title = self
            .find_available(handle)
            .map(|entry| entry.title.clone())
            .or_else(|| self.applied.get(&handle).map(|a| a.title.clone()))
            .ok_or(OpacityError::UnknownWindow)?;

        self.backend.set_alpha(handle, alpha)?;

        self.applied.insert(
            handle,
            AppliedOpacity {
                handle,
                title,
                opacity_percent: percent,
                alpha,
            },
        );
        Ok(alpha)
    }

    /// Restore one window to full opacity.
    ///
    /// Policy (fixed, documented): the applied entry is removed once the
    /// restore has been attempted, whether or not the OS call succeeded. A
    /// window whose handle went stale cannot be restored later anyway, and
    /// keeping the entry would wedge it in the applied list forever. The
    /// error is still surfaced to the caller.
    pub fn reset_one(&mut self, handle: WindowHandle) -> Result<(), OpacityError> {
        if !self.applied.contains_key(&handle) {
            return Err(OpacityError::NotTracked);
        }
        let result = self.backend.clear_alpha(handle);
        self.applied.remove(&handle);
        result
    }

    /// Best-effort restore of every applied window, then clear the set
    /// unconditionally. A failure on one entry never prevents attempting
    /// the rest; vanished targets are skipped silently.
    pub fn reset_all(&mut self) -> Result<ResetSummary, OpacityError> {
        if self.applied.is_empty() {
            return Err(OpacityError::NothingToReset);
        }

        let mut summary = ResetSummary {
            attempted: 0,
            failed: 0,
        };
        for (handle, entry) in &self.applied {
            summary.attempted += 1;
            if let Err(err) = self.backend.clear_alpha(*handle) {
                summary.failed += 1;
                if err.is_skippable_in_bulk() {
                    log::debug!("reset-all: skipping '{}' ({})", entry.title, err);
                } else {
                    log::warn!("reset-all: failed to restore '{}' ({})", entry.title, err);
                }
            }
        }
        self.applied.clear();
        Ok(summary)
    }
}
