use std::sync::{Arc, Mutex};

use glasspane_core::error::OpacityError;
use glasspane_core::opacity::OpacityBackend;
use glasspane_core::platform::WindowHandle;
use glasspane_core::registry::{WindowEntry, WindowRegistry};

/// Recording fake for the layered-window backend. `vanished` handles fail
/// every call with `TargetVanished`.
#[derive(Clone, Default)]
struct FakeBackend {
    calls: Arc<Mutex<Vec<(WindowHandle, u8)>>>,
    vanished: Arc<Mutex<Vec<WindowHandle>>>,
}

impl FakeBackend {
    fn calls(&self) -> Vec<(WindowHandle, u8)> {
        self.calls.lock().unwrap().clone()
    }

    fn mark_vanished(&self, handle: WindowHandle) {
        self.vanished.lock().unwrap().push(handle);
    }
}

impl OpacityBackend for FakeBackend {
    fn set_alpha(&self, handle: WindowHandle, alpha: u8) -> Result<(), OpacityError> {
        if self.vanished.lock().unwrap().contains(&handle) {
            return Err(OpacityError::TargetVanished);
        }
        self.calls.lock().unwrap().push((handle, alpha));
        Ok(())
    }
}

fn entry(handle: isize, title: &str, exe: Option<&str>) -> WindowEntry {
    WindowEntry {
        handle: WindowHandle(handle),
        title: title.to_string(),
        process_id: Some(1000 + handle as u32),
        executable_path: exe.map(|e| format!(r"C:\apps\{}", e).into()),
        executable_name: exe.map(str::to_string),
        is_executable_backed: exe.is_some(),
    }
}

fn registry_with(entries: Vec<WindowEntry>) -> (WindowRegistry, FakeBackend) {
    let backend = FakeBackend::default();
    let mut registry = WindowRegistry::new(Box::new(backend.clone()));
    registry.merge_snapshot(entries);
    (registry, backend)
}

#[test]
fn apply_then_reset_restores_full_opacity_and_clears_state() {
    let (mut registry, backend) = registry_with(vec![entry(1, "Editor", Some("code.exe"))]);
    let handle = WindowHandle(1);

    registry.apply(handle, 40).unwrap();
    assert!(registry.find_applied(handle).is_some());

    registry.reset_one(handle).unwrap();
    assert!(registry.applied_is_empty());

    // Last OS write must be the full-opacity restore
    assert_eq!(backend.calls().last(), Some(&(handle, 255)));
}

#[test]
fn apply_records_percent_and_derived_alpha() {
    let (mut registry, backend) = registry_with(vec![entry(1, "Editor", Some("code.exe"))]);

    let alpha = registry.apply(WindowHandle(1), 50).unwrap();
    assert_eq!(alpha, 128);

    let applied = registry.find_applied(WindowHandle(1)).unwrap();
    assert_eq!(applied.opacity_percent, 50);
    assert_eq!(applied.alpha, 128);
    assert_eq!(backend.calls(), vec![(WindowHandle(1), 128)]);
}

#[test]
fn invalid_percent_fails_before_any_os_call() {
    let (mut registry, backend) = registry_with(vec![entry(1, "Editor", Some("code.exe"))]);

    let err = registry.apply(WindowHandle(1), 150).unwrap_err();
    assert!(matches!(err, OpacityError::InvalidOpacity(150)));
    assert!(backend.calls().is_empty());
    assert!(registry.applied_is_empty());
}

#[test]
fn applied_window_leaves_the_available_list() {
    let (mut registry, _backend) = registry_with(vec![
        entry(1, "Editor", Some("code.exe")),
        entry(2, "Browser", Some("firefox.exe")),
    ]);

    registry.apply(WindowHandle(1), 70).unwrap();

    let candidates = registry.visible_candidates(false);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Browser");
    assert!(registry
        .applied()
        .iter()
        .all(|a| candidates.iter().all(|c| c.title != a.title)));
}

#[test]
fn show_only_executables_hides_allow_listed_entries() {
    let (registry, _backend) = registry_with(vec![
        entry(1, "Editor", Some("code.exe")),
        entry(2, "Chrome Legacy Window", None),
    ]);

    let all = registry.visible_candidates(false);
    assert_eq!(all.len(), 2);

    let exe_only = registry.visible_candidates(true);
    assert_eq!(exe_only.len(), 1);
    assert!(exe_only[0].is_executable_backed);
}

#[test]
fn reset_one_on_vanished_window_still_removes_the_entry() {
    let (mut registry, backend) = registry_with(vec![entry(1, "Editor", Some("code.exe"))]);
    let handle = WindowHandle(1);

    registry.apply(handle, 30).unwrap();
    backend.mark_vanished(handle);

    let err = registry.reset_one(handle).unwrap_err();
    assert!(matches!(err, OpacityError::TargetVanished));
    // Removal-on-best-effort policy: the entry never lingers
    assert!(registry.applied_is_empty());
}

#[test]
fn reset_all_is_best_effort_and_always_clears() {
    let (mut registry, backend) = registry_with(vec![
        entry(1, "One", Some("a.exe")),
        entry(2, "Two", Some("b.exe")),
        entry(3, "Three", Some("c.exe")),
    ]);
    for handle in 1..=3 {
        registry.apply(WindowHandle(handle), 25).unwrap();
    }
    backend.mark_vanished(WindowHandle(2));

    let summary = registry.reset_all().unwrap();
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.failed, 1);
    assert!(registry.applied_is_empty());

    // The failure on window 2 did not stop the restore of 1 and 3
    let restores: Vec<_> = backend
        .calls()
        .into_iter()
        .filter(|(_, alpha)| *alpha == 255)
        .collect();
    assert_eq!(restores, vec![(WindowHandle(1), 255), (WindowHandle(3), 255)]);
}

#[test]
fn reset_all_with_every_target_vanished_still_empties_the_set() {
    let (mut registry, backend) = registry_with(vec![
        entry(1, "One", Some("a.exe")),
        entry(2, "Two", Some("b.exe")),
    ]);
    registry.apply(WindowHandle(1), 10).unwrap();
    registry.apply(WindowHandle(2), 10).unwrap();
    backend.mark_vanished(WindowHandle(1));
    backend.mark_vanished(WindowHandle(2));

    let summary = registry.reset_all().unwrap();
    assert_eq!(summary.failed, 2);
    assert!(registry.applied_is_empty());
}

#[test]
fn reset_all_on_empty_set_reports_nothing_to_reset() {
    let (mut registry, _backend) = registry_with(vec![entry(1, "One", Some("a.exe"))]);
    assert!(matches!(
        registry.reset_all(),
        Err(OpacityError::NothingToReset)
    ));
}

#[test]
fn reapply_overwrites_the_existing_entry() {
    let (mut registry, _backend) = registry_with(vec![entry(1, "Editor", Some("code.exe"))]);
    let handle = WindowHandle(1);

    registry.apply(handle, 80).unwrap();
    registry.apply(handle, 20).unwrap();

    let applied = registry.find_applied(handle).unwrap();
    assert_eq!(applied.opacity_percent, 20);
    assert_eq!(applied.alpha, 51);
    assert_eq!(registry.applied().len(), 1);
}

#[test]
fn backend_failure_leaves_registry_unchanged_on_apply() {
    let (mut registry, backend) = registry_with(vec![entry(1, "Editor", Some("code.exe"))]);
    backend.mark_vanished(WindowHandle(1));

    let err = registry.apply(WindowHandle(1), 50).unwrap_err();
    assert!(matches!(err, OpacityError::TargetVanished));
    assert!(registry.applied_is_empty());
}
