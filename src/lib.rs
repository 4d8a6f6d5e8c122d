//! Glasspane - per-window transparency control
//!
//! Core library: window registry, opacity math, and the OS collaborator
//! seams. The Tauri shell in `main.rs` is a thin presentation layer on top.

// Configuration constants
pub mod config;

// Error taxonomy
pub mod error;

// Tracing setup, daily rotation, retention cleanup
pub mod logging;

// Command dispatch (presentation -> registry)
pub mod controller;

// Alpha math + layered-window backend seam
pub mod opacity;

// OS collaborators (enumerator, process inspector, layered backend)
pub mod platform;

// Window registry and filtering policy
pub mod registry;

// Re-export commonly used types
pub use controller::{Command, Controller, Outcome};
pub use error::OpacityError;
pub use platform::{RawWindow, WindowHandle};
pub use registry::{AppliedOpacity, WindowEntry, WindowRegistry};
