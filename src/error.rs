//! Error taxonomy for opacity operations.
//!
//! Single-target operations surface these to the user via a blocking
//! notification; bulk operations (reset-all) treat `TargetVanished` as a
//! silent skip. Nothing here is retried automatically.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpacityError {
    /// The referenced window handle no longer exists. Skipped silently in
    /// bulk operations, surfaced for single-target ones.
    #[error("the window no longer exists")]
    TargetVanished,

    /// Percent outside [0, 100]. Rejected before any OS call is made.
    #[error("opacity must be between 0 and 100, got {0}")]
    InvalidOpacity(u8),

    /// User invoked apply/reset without a selected entry.
    #[error("no window is selected")]
    NoSelection,

    /// Selected window is not in the applied set (reset-one on an
    /// untracked window).
    #[error("the selected window has no opacity applied")]
    NotTracked,

    /// Selected window disappeared from both lists between refreshes.
    #[error("the selected window is no longer listed")]
    UnknownWindow,

    /// Reset-all invoked with an empty applied set. Informational, no-op.
    #[error("no windows have an opacity applied")]
    NothingToReset,

    /// Layered-window calls are only available on Windows; placeholder
    /// backends on other platforms report this.
    #[error("layered windows are not supported on this platform")]
    Unsupported,

    /// Any other OS-level failure (style bit or alpha call rejected for a
    /// live handle).
    #[error("window manager call failed: {0}")]
    Os(String),
}

impl OpacityError {
    /// Whether a bulk operation should keep going after this failure.
    pub fn is_skippable_in_bulk(&self) -> bool {
        matches!(self, OpacityError::TargetVanished | OpacityError::Os(_))
    }
}
