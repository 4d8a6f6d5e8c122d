//! Application Configuration Constants
//!
//! Centralized configuration for magic numbers, labels, timings, and defaults.

/// Opacity / alpha configuration
pub mod alpha {
    /// Alpha value of a fully opaque window
    pub const FULL: u8 = 255;

    /// Default slider position when nothing has been applied yet
    pub const DEFAULT_PERCENT: u8 = 100;
}

/// Refresh loop configuration
pub mod refresh {
    /// Default interval between enumeration passes (seconds)
    pub const DEFAULT_INTERVAL_SECS: u64 = 3;

    /// Lower bound accepted from settings; anything smaller is clamped
    pub const MIN_INTERVAL_SECS: u64 = 1;
}

/// Window filtering policy
pub mod filter {
    /// Title fragments identifying our own windows (self-exclusion).
    /// Matched case-insensitively against enumerated titles.
    pub const SELF_TITLE_MARKERS: &[&str] = &["glasspane", "transparency controller"];

    /// Title fragments that keep a window listed even when its owning
    /// process could not be resolved (permission denied / process gone).
    pub const UNRESOLVED_TITLE_ALLOW_LIST: &[&str] = &[
        "cursor", "code", "notepad", "chrome", "firefox", "edge", "opera",
    ];

    /// Process label shown for windows whose process could not be resolved
    pub const UNRESOLVED_PROCESS_LABEL: &str = "System";

    /// Suffix marking an executable-backed process image
    pub const EXECUTABLE_SUFFIX: &str = ".exe";
}

/// Presentation configuration
pub mod display {
    /// Maximum characters of an available-list label before truncation
    pub const AVAILABLE_LABEL_MAX: usize = 60;

    /// Maximum characters of an applied-list title before truncation
    pub const APPLIED_TITLE_MAX: usize = 45;

    /// Appended to truncated labels
    pub const ELLIPSIS: &str = "...";
}

/// Logging configuration
pub mod logging {
    /// Days to keep rotated log files before cleanup
    pub const DEFAULT_RETENTION_DAYS: u32 = 30;
}

/// Truncate a display label, keeping the full string untouched elsewhere.
/// Registry state always keys on the untruncated title; this exists purely
/// for rendering.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let keep = max.saturating_sub(display::ELLIPSIS.len());
    let truncated: String = label.chars().take(keep).collect();
    format!("{}{}", truncated, display::ELLIPSIS)
}
