//! Alpha math and the layered-window backend seam.
//!
//! The registry talks to the OS through [`OpacityBackend`] so the state
//! machine can be exercised in tests with a recording fake.

use crate::config;
use crate::error::OpacityError;
use crate::platform::WindowHandle;

/// Convert a user-facing percent to a layered-window alpha value.
///
/// Re-validates the range even though the slider already constrains it:
/// out-of-range input is a caller contract violation and must fail with
/// `InvalidOpacity` before any OS call. Rounding is half-up, so
/// `50 -> 128`.
pub fn alpha_from_percent(percent: u8) -> Result<u8, OpacityError> {
    if percent > 100 {
        return Err(OpacityError::InvalidOpacity(percent));
    }
    let alpha = (f64::from(percent) / 100.0 * f64::from(config::alpha::FULL)).round();
    Ok(alpha as u8)
}

/// Contract for the two OS write operations the applier needs.
///
/// `set_alpha` must mark the window layered first (idempotent) and then set
/// the alpha channel; `clear_alpha` restores full opacity. Both fail with
/// `TargetVanished` when the handle went stale.
pub trait OpacityBackend: Send {
    fn set_alpha(&self, handle: WindowHandle, alpha: u8) -> Result<(), OpacityError>;

    fn clear_alpha(&self, handle: WindowHandle) -> Result<(), OpacityError> {
        self.set_alpha(handle, config::alpha::FULL)
    }
}
