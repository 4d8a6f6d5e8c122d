//! Command dispatch between the presentation layer and the registry.
//!
//! Every user gesture arrives as a discrete [`Command`] consumed by
//! [`Controller::handle`], so the whole interaction surface can be tested
//! without a live GUI. The controller owns the registry; nothing else
//! mutates it.

use crate::config;
use crate::error::OpacityError;
use crate::platform::WindowHandle;
use crate::registry::{ResetSummary, WindowRegistry};

/// Discrete user gestures from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select a window in either list (or clear the selection).
    Select(Option<WindowHandle>),
    /// Slider moved; remembered until the next apply.
    SetOpacity(u8),
    /// Apply the pending opacity to the selected window.
    Apply,
    /// Restore the selected window to full opacity.
    ResetSelected,
    /// Best-effort restore of every applied window.
    ResetAll,
}

/// What happened, for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(String),
    SelectionCleared,
    OpacityPending(u8),
    Applied { title: String, percent: u8 },
    ResetOne(String),
    ResetAll(ResetSummary),
}

impl Outcome {
    /// Status message string consumed by the presentation layer.
    pub fn status_message(&self) -> String {
        match self {
            Outcome::Selected(title) => format!("Selected: {}", title),
            Outcome::SelectionCleared => "Selection cleared".to_string(),
            Outcome::OpacityPending(percent) => format!("Opacity set to {}%", percent),
            Outcome::Applied { title, percent } => {
                format!("Applied {}% opacity to {}", percent, title)
            }
            Outcome::ResetOne(title) => format!("Restored {}", title),
            Outcome::ResetAll(summary) => {
                if summary.failed == 0 {
                    format!("Restored {} windows", summary.attempted)
                } else {
                    format!(
                        "Restored {} windows ({} already gone)",
                        summary.attempted - summary.failed,
                        summary.failed
                    )
                }
            }
        }
    }
}

pub struct Controller {
    registry: WindowRegistry,
    selected: Option<WindowHandle>,
    pending_percent: u8,
}

impl Controller {
    pub fn new(registry: WindowRegistry) -> Self {
        Self {
            registry,
            selected: None,
            pending_percent: config::alpha::DEFAULT_PERCENT,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WindowRegistry {
        &mut self.registry
    }

    pub fn selected(&self) -> Option<WindowHandle> {
        self.selected
    }

    pub fn pending_percent(&self) -> u8 {
        self.pending_percent
    }

    pub fn handle(&mut self, command: Command) -> Result<Outcome, OpacityError> {
        match command {
            Command::Select(None) => {
                self.selected = None;
                Ok(Outcome::SelectionCleared)
            }
            Command::Select(Some(handle)) => {
                let title = self
                    .registry
                    .find_available(handle)
                    .map(|entry| entry.title.clone())
                    .or_else(|| {
                        self.registry
                            .find_applied(handle)
                            .map(|entry| entry.title.clone())
                    })
                    .ok_or(OpacityError::UnknownWindow)?;
                self.selected = Some(handle);
                Ok(Outcome::Selected(title))
            }
            Command::SetOpacity(percent) => {
                // Slider values outside the contract are rejected here too,
                // before they can ever reach an apply.
                if percent > 100 {
                    return Err(OpacityError::InvalidOpacity(percent));
                }
                self.pending_percent = percent;
                Ok(Outcome::OpacityPending(percent))
            }
            Command::Apply => {
                let handle = self.selected.ok_or(OpacityError::NoSelection)?;
                let percent = self.pending_percent;
                self.registry.apply(handle, percent)?;
                let title = self
                    .registry
                    .find_applied(handle)
                    .map(|entry| entry.title.clone())
                    .unwrap_or_default();
                Ok(Outcome::Applied { title, percent })
            }
            Command::ResetSelected => {
                let handle = self.selected.ok_or(OpacityError::NoSelection)?;
                let title = self
                    .registry
                    .find_applied(handle)
                    .map(|entry| entry.title.clone())
                    .ok_or(OpacityError::NotTracked)?;
                self.registry.reset_one(handle)?;
                Ok(Outcome::ResetOne(title))
            }
            Command::ResetAll => {
                let summary = self.registry.reset_all()?;
                Ok(Outcome::ResetAll(summary))
            }
        }
    }
}
