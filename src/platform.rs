//! OS collaborator seams: window enumeration, process inspection, and the
//! layered-window backend.
//!
//! The Windows implementation lives behind `cfg(windows)`; other platforms
//! get placeholder implementations so the library builds and tests
//! everywhere. Callers must tolerate handles that disappear between
//! enumeration and use: any call against a stale handle reports
//! `TargetVanished` and is never fatal.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::opacity::OpacityBackend;

/// Opaque OS window reference. A lookup key into OS state, valid only as
/// long as the window exists; never an ownership relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub isize);

/// One (handle, title, pid) triple from a single enumeration pass.
#[derive(Debug, Clone)]
pub struct RawWindow {
    pub handle: WindowHandle,
    pub title: String,
    /// `None` when the OS reported no owning process for the window.
    pub process_id: Option<u32>,
}

/// Produces a fresh snapshot of visible top-level windows on every call.
pub trait WindowEnumerator: Send + Sync {
    fn snapshot(&self) -> anyhow::Result<Vec<RawWindow>>;
}

/// Resolves a process id to its executable image path. Failure
/// (permission denied, process gone) is non-fatal and reported as `None`.
pub trait ProcessInspector: Send + Sync {
    fn executable_path(&self, pid: u32) -> Option<PathBuf>;
}

// --- Windows implementation ----------------------------------------------

#[cfg(windows)]
mod windows_impl {
    use std::path::PathBuf;

    use windows::core::PWSTR;
    use windows::Win32::Foundation::{
        CloseHandle, COLORREF, ERROR_INVALID_WINDOW_HANDLE, HWND, LPARAM,
    };
    use windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_CLOAKED};
    use windows::Win32::System::Threading::{
        OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
        PROCESS_QUERY_LIMITED_INFORMATION,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
        GetWindowThreadProcessId, IsWindowVisible, SetLayeredWindowAttributes,
        SetWindowLongPtrW, GWL_EXSTYLE, LWA_ALPHA, WS_EX_LAYERED, WS_EX_TOOLWINDOW,
    };

    use super::{ProcessInspector, RawWindow, WindowEnumerator, WindowHandle};
    use crate::error::OpacityError;
    use crate::opacity::OpacityBackend;

    pub struct SystemEnumerator;

    impl WindowEnumerator for SystemEnumerator {
        fn snapshot(&self) -> anyhow::Result<Vec<RawWindow>> {
            let mut windows: Vec<RawWindow> = Vec::new();

            unsafe {
                // SAFETY: enum_window returns i32 (0=stop, 1=continue), which is
                // compatible with BOOL; the windows crate wraps the same i32.
                let callback_ptr: unsafe extern "system" fn(HWND, LPARAM) -> i32 = enum_window;
                let _ = EnumWindows(
                    Some(std::mem::transmute(callback_ptr)),
                    LPARAM(&mut windows as *mut _ as isize),
                );
            }

            log::debug!("[WinEnum] snapshot yielded {} windows", windows.len());
            Ok(windows)
        }
    }

    /// Callback for EnumWindows - must return non-zero (TRUE) to continue
    unsafe extern "system" fn enum_window(hwnd: HWND, lparam: LPARAM) -> i32 {
        let list_ptr = lparam.0 as *mut Vec<RawWindow>;
        if list_ptr.is_null() {
            return 0; // FALSE - stop enum
        }

        // Skip invisible windows
        if !IsWindowVisible(hwnd).as_bool() {
            return 1;
        }

        // Skip tool windows (utility/notification windows the user does not
        // interact with as applications)
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32;
        if ex_style & WS_EX_TOOLWINDOW.0 != 0 {
            return 1;
        }

        // Skip cloaked windows (not actually visible to the user)
        let mut cloaked: i32 = 0;
        let _ = DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut _ as *mut _,
            std::mem::size_of::<i32>() as u32,
        );
        if cloaked != 0 {
            return 1;
        }

        // Require a non-empty title
        let length = GetWindowTextLengthW(hwnd);
        if length == 0 {
            return 1;
        }
        let mut buffer: Vec<u16> = vec![0; (length + 1) as usize];
        let read = GetWindowTextW(hwnd, &mut buffer);
        if read == 0 {
            return 1;
        }
        buffer.truncate(read as usize);
        let title = String::from_utf16_lossy(&buffer);
        if title.trim().is_empty() {
            return 1;
        }

        let mut pid: u32 = 0;
        GetWindowThreadProcessId(hwnd, Some(&mut pid));

        (*list_ptr).push(RawWindow {
            handle: WindowHandle(hwnd.0 as isize),
            title,
            process_id: (pid != 0).then_some(pid),
        });

        1 // continue enumeration
    }

    pub struct SystemProcessInspector;

    impl ProcessInspector for SystemProcessInspector {
        fn executable_path(&self, pid: u32) -> Option<PathBuf> {
            unsafe {
                let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid).ok()?;

                let mut name = vec![0u16; 512];
                let mut size = name.len() as u32;
                let result = QueryFullProcessImageNameW(
                    process,
                    PROCESS_NAME_WIN32,
                    PWSTR(name.as_mut_ptr()),
                    &mut size,
                );
                let _ = CloseHandle(process);

                result.ok()?;
                Some(PathBuf::from(String::from_utf16_lossy(&name[..size as usize])))
            }
        }
    }

    /// Layered-window write path: OR in WS_EX_LAYERED (idempotent), then
    /// set the alpha channel.
    pub struct SystemOpacityBackend;

    impl OpacityBackend for SystemOpacityBackend {
        fn set_alpha(&self, handle: WindowHandle, alpha: u8) -> Result<(), OpacityError> {
            unsafe {
                let hwnd = HWND(handle.0 as *mut std::ffi::c_void);

                // OR-ing the bit in is idempotent; a stale handle makes the
                // attribute call below fail, which is where we detect it.
                let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
                SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style | WS_EX_LAYERED.0 as isize);

                SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA)
                    .map_err(map_win32_error)
            }
        }
    }

    fn map_win32_error(err: windows::core::Error) -> OpacityError {
        if err.code() == ERROR_INVALID_WINDOW_HANDLE.to_hresult() {
            OpacityError::TargetVanished
        } else {
            OpacityError::Os(err.message())
        }
    }
}

#[cfg(windows)]
pub use windows_impl::{SystemEnumerator, SystemOpacityBackend, SystemProcessInspector};

// --- Placeholder for non-Windows builds ----------------------------------

#[cfg(not(windows))]
mod stub_impl {
    use std::path::PathBuf;

    use super::{ProcessInspector, RawWindow, WindowEnumerator};
    use crate::error::OpacityError;
    use crate::opacity::OpacityBackend;

    pub struct SystemEnumerator;

    impl WindowEnumerator for SystemEnumerator {
        fn snapshot(&self) -> anyhow::Result<Vec<RawWindow>> {
            log::info!("[WinEnum] window enumeration unavailable on this platform");
            Ok(Vec::new())
        }
    }

    pub struct SystemProcessInspector;

    impl ProcessInspector for SystemProcessInspector {
        fn executable_path(&self, _pid: u32) -> Option<PathBuf> {
            None
        }
    }

    pub struct SystemOpacityBackend;

    impl OpacityBackend for SystemOpacityBackend {
        fn set_alpha(
            &self,
            _handle: super::WindowHandle,
            _alpha: u8,
        ) -> Result<(), OpacityError> {
            Err(OpacityError::Unsupported)
        }
    }
}

#[cfg(not(windows))]
pub use stub_impl::{SystemEnumerator, SystemOpacityBackend, SystemProcessInspector};

/// Construct the platform's enumerator/inspector/backend trio.
pub fn system_collaborators() -> (
    Box<dyn WindowEnumerator>,
    Box<dyn ProcessInspector>,
    Box<dyn OpacityBackend>,
) {
    (
        Box::new(SystemEnumerator),
        Box::new(SystemProcessInspector),
        Box::new(SystemOpacityBackend),
    )
}
