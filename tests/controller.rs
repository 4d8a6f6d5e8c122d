use std::sync::{Arc, Mutex};

use glasspane_core::controller::{Command, Controller, Outcome};
use glasspane_core::error::OpacityError;
use glasspane_core::opacity::OpacityBackend;
use glasspane_core::platform::WindowHandle;
use glasspane_core::registry::{WindowEntry, WindowRegistry};

#[derive(Clone, Default)]
struct FakeBackend {
    calls: Arc<Mutex<Vec<(WindowHandle, u8)>>>,
}

impl OpacityBackend for FakeBackend {
    fn set_alpha(&self, handle: WindowHandle, alpha: u8) -> Result<(), OpacityError> {
        self.calls.lock().unwrap().push((handle, alpha));
        Ok(())
    }
}

fn entry(handle: isize, title: &str) -> WindowEntry {
    WindowEntry {
        handle: WindowHandle(handle),
        title: title.to_string(),
        process_id: Some(4242),
        executable_path: Some(r"C:\apps\demo.exe".into()),
        executable_name: Some("demo.exe".to_string()),
        is_executable_backed: true,
    }
}

fn controller_with(entries: Vec<WindowEntry>) -> Controller {
    let mut registry = WindowRegistry::new(Box::new(FakeBackend::default()));
    registry.merge_snapshot(entries);
    Controller::new(registry)
}

#[test]
fn apply_without_selection_is_rejected() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);
    assert!(matches!(
        controller.handle(Command::Apply),
        Err(OpacityError::NoSelection)
    ));
}

#[test]
fn reset_without_selection_is_rejected() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);
    assert!(matches!(
        controller.handle(Command::ResetSelected),
        Err(OpacityError::NoSelection)
    ));
}

#[test]
fn select_then_apply_uses_the_pending_percent() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);

    controller.handle(Command::Select(Some(WindowHandle(1)))).unwrap();
    controller.handle(Command::SetOpacity(35)).unwrap();
    let outcome = controller.handle(Command::Apply).unwrap();

    assert_eq!(
        outcome,
        Outcome::Applied {
            title: "Editor".to_string(),
            percent: 35
        }
    );
    let applied = controller
        .registry()
        .find_applied(WindowHandle(1))
        .unwrap();
    assert_eq!(applied.opacity_percent, 35);
}

#[test]
fn selecting_an_unknown_handle_fails() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);
    assert!(matches!(
        controller.handle(Command::Select(Some(WindowHandle(99)))),
        Err(OpacityError::UnknownWindow)
    ));
    assert_eq!(controller.selected(), None);
}

#[test]
fn out_of_range_slider_value_is_rejected() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);
    assert!(matches!(
        controller.handle(Command::SetOpacity(130)),
        Err(OpacityError::InvalidOpacity(130))
    ));
    // Pending percent keeps its previous value
    assert_eq!(controller.pending_percent(), 100);
}

#[test]
fn reset_selected_requires_a_tracked_window() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);
    controller.handle(Command::Select(Some(WindowHandle(1)))).unwrap();

    assert!(matches!(
        controller.handle(Command::ResetSelected),
        Err(OpacityError::NotTracked)
    ));
}

#[test]
fn applied_windows_stay_selectable_for_reset() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);

    controller.handle(Command::Select(Some(WindowHandle(1)))).unwrap();
    controller.handle(Command::SetOpacity(60)).unwrap();
    controller.handle(Command::Apply).unwrap();

    // The window left the available list but remains selectable in the
    // applied list under the same handle.
    let outcome = controller
        .handle(Command::Select(Some(WindowHandle(1))))
        .unwrap();
    assert_eq!(outcome, Outcome::Selected("Editor".to_string()));

    let outcome = controller.handle(Command::ResetSelected).unwrap();
    assert_eq!(outcome, Outcome::ResetOne("Editor".to_string()));
    assert!(controller.registry().applied_is_empty());
}

#[test]
fn reset_all_outcome_reports_counts() {
    let mut controller = controller_with(vec![entry(1, "One"), entry(2, "Two")]);

    for handle in [1, 2] {
        controller
            .handle(Command::Select(Some(WindowHandle(handle))))
            .unwrap();
        controller.handle(Command::Apply).unwrap();
    }

    let outcome = controller.handle(Command::ResetAll).unwrap();
    match &outcome {
        Outcome::ResetAll(summary) => {
            assert_eq!(summary.attempted, 2);
            assert_eq!(summary.failed, 0);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(outcome.status_message().contains("Restored 2 windows"));
}

#[test]
fn reset_all_on_empty_set_is_informational() {
    let mut controller = controller_with(vec![entry(1, "One")]);
    assert!(matches!(
        controller.handle(Command::ResetAll),
        Err(OpacityError::NothingToReset)
    ));
}

#[test]
fn clearing_selection_reports_it() {
    let mut controller = controller_with(vec![entry(1, "Editor")]);
    controller.handle(Command::Select(Some(WindowHandle(1)))).unwrap();
    let outcome = controller.handle(Command::Select(None)).unwrap();
    assert_eq!(outcome, Outcome::SelectionCleared);
    assert_eq!(controller.selected(), None);
}
