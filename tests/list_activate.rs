//! Switching a row on applies it and makes it the active profile.

mod common;

use common::MockBackend;
use hostswap::dialog::{DialogChoice, DialogKind, Notice};
use hostswap::list::ProfileList;
use hostswap::profile::ProfileId;
use hostswap::state::HostStore;

fn loaded(backend: &MockBackend) -> (HostStore, ProfileList) {
    let mut store = HostStore::new();
    let mut list = ProfileList::new();
    list.initialize(&mut store, backend);
    (store, list)
}

#[test]
fn toggle_asks_first() {
    let backend = MockBackend::new("")
        .with_profile("home", "a")
        .with_profile("work", "b");
    let (_, mut list) = loaded(&backend);
    backend.clear_calls();

    list.request_activate(ProfileId::Ordinal(2));

    let dialog = list.dialog().current().unwrap();
    assert_eq!(dialog.kind, DialogKind::Confirm);
    assert_eq!(dialog.notice, Notice::ConfirmApply);
    assert!(backend.calls().is_empty());
}

#[test]
fn confirm_applies_toggled_row_even_when_another_is_selected() {
    let backend = MockBackend::new("")
        .with_profile("home", "a")
        .with_profile("work", "b")
        .with_active("home");
    let (mut store, mut list) = loaded(&backend);
    list.select(ProfileId::Ordinal(1), &mut store);
    backend.clear_calls();

    list.request_activate(ProfileId::Ordinal(2));
    list.resolve_dialog(DialogChoice::Confirm, &mut store, &backend);

    assert_eq!(
        backend.calls(),
        vec!["apply_profile:work", "save_active_name:work"]
    );
    assert_eq!(store.current_active_name(), "work");
    assert_eq!(backend.system(), "b");
    let active: Vec<_> = list.entries().iter().filter(|p| p.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "work");
    assert!(!list.dialog().is_open());
}

#[test]
fn cancel_changes_nothing() {
    let backend = MockBackend::new("").with_profile("work", "b");
    let (mut store, mut list) = loaded(&backend);
    backend.clear_calls();

    list.request_activate(ProfileId::Ordinal(1));
    list.resolve_dialog(DialogChoice::Cancel, &mut store, &backend);

    assert!(backend.calls().is_empty());
    assert_eq!(store.current_active_name(), "");
    assert!(!list.dialog().is_open());
}

#[test]
fn apply_failure_shows_error_and_keeps_active() {
    let backend = MockBackend::new("")
        .with_profile("home", "a")
        .with_profile("work", "b")
        .with_active("home");
    backend.fail("apply_profile");
    let (mut store, mut list) = loaded(&backend);

    list.request_activate(ProfileId::Ordinal(2));
    list.resolve_dialog(DialogChoice::Confirm, &mut store, &backend);

    assert_eq!(store.current_active_name(), "home");
    assert!(!backend.called("save_active_name"));
    let dialog = list.dialog().current().unwrap();
    assert_eq!(dialog.notice, Notice::ApplyFailed);
    assert_eq!(list.get(ProfileId::Ordinal(1)).map(|p| p.active), Some(true));
}

#[test]
fn sentinel_has_no_toggle() {
    let backend = MockBackend::new("");
    let (_, mut list) = loaded(&backend);

    list.request_activate(ProfileId::Init);

    assert!(!list.dialog().is_open());
}
