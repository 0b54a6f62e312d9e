//! Saving: localhost entries, rename bookkeeping, save guard.

mod common;

use common::MockBackend;
use hostswap::dialog::{DialogChoice, DialogKind, Notice};
use hostswap::editor::ContentEditor;
use hostswap::list::ProfileList;
use hostswap::profile::ProfileId;
use hostswap::state::HostStore;

struct Fixture {
    store: HostStore,
    list: ProfileList,
    editor: ContentEditor,
}

fn open(backend: &MockBackend) -> Fixture {
    let mut store = HostStore::new();
    let mut list = ProfileList::new();
    list.initialize(&mut store, backend);
    let mut editor = ContentEditor::new();
    editor.update(&store, backend);
    Fixture {
        store,
        list,
        editor,
    }
}

impl Fixture {
    fn select(&mut self, id: ProfileId, backend: &MockBackend) {
        self.list.select(id, &mut self.store);
        self.editor.update(&self.store, backend);
    }

    fn acknowledge(&mut self, backend: &MockBackend) {
        self.editor
            .resolve_dialog(DialogChoice::Confirm, &mut self.store, backend);
    }
}

#[test]
fn missing_localhost_entries_are_prepended() {
    let backend = MockBackend::new("");
    let mut fx = open(&backend);
    let id = fx.list.add();
    fx.list.commit_rename(id, &mut fx.store);
    fx.editor.update(&fx.store, &backend);

    fx.editor.edit(&fx.store, "foo bar");
    assert!(fx.editor.save(&mut fx.store, &backend));

    assert_eq!(
        backend.profile("host1").unwrap(),
        "::1 localhost\n255.255.255.255 broadcasthost\n127.0.0.1 localhost\nfoo bar"
    );
    assert_eq!(fx.editor.content(), backend.profile("host1").unwrap());
}

#[test]
fn saving_twice_never_duplicates_entries() {
    let backend = MockBackend::new("").with_profile("work", "10.0.0.1 git.corp");
    let mut fx = open(&backend);
    fx.select(ProfileId::Ordinal(1), &backend);

    fx.editor.save(&mut fx.store, &backend);
    fx.acknowledge(&backend);
    fx.editor.save(&mut fx.store, &backend);
    fx.acknowledge(&backend);

    let saved = backend.profile("work").unwrap();
    for entry in hostswap::hosts::CANONICAL_ENTRIES {
        assert_eq!(saved.matches(entry).count(), 1, "{entry}");
    }
}

#[test]
fn success_dialog_releases_guard_on_acknowledge() {
    let backend = MockBackend::new("").with_profile("work", "a");
    let mut fx = open(&backend);
    fx.select(ProfileId::Ordinal(1), &backend);

    assert!(fx.editor.save(&mut fx.store, &backend));
    assert!(fx.editor.is_saving());
    let dialog = fx.editor.dialog().current().unwrap();
    assert_eq!(dialog.kind, DialogKind::Success);
    assert_eq!(dialog.notice, Notice::Saved);

    assert!(!fx.editor.save(&mut fx.store, &backend), "guard blocks re-entry");

    fx.acknowledge(&backend);
    assert!(!fx.editor.is_saving());
    assert!(!fx.editor.dialog().is_open());
}

#[test]
fn failure_shows_error_and_releases_guard() {
    let backend = MockBackend::new("").with_profile("work", "a");
    backend.fail("save_profile");
    let mut fx = open(&backend);
    fx.select(ProfileId::Ordinal(1), &backend);

    assert!(!fx.editor.save(&mut fx.store, &backend));

    assert!(!fx.editor.is_saving());
    assert_eq!(
        fx.editor.dialog().current().map(|d| d.notice.clone()),
        Some(Notice::SaveFailed)
    );
}

#[test]
fn renaming_active_profile_moves_active_name() {
    let backend = MockBackend::new("")
        .with_profile("work", "a")
        .with_active("work");
    let mut fx = open(&backend);
    let id = ProfileId::Ordinal(1);
    fx.list.begin_rename(id);
    fx.list.rename_input(id, "office");
    fx.list.commit_rename(id, &mut fx.store);
    fx.editor.update(&fx.store, &backend);

    fx.editor.save(&mut fx.store, &backend);
    fx.list.update(&mut fx.store, &backend);

    assert_eq!(backend.active(), "office");
    assert_eq!(fx.store.current_active_name(), "office");
    assert!(backend.profile("work").is_none());
    assert!(backend.profile("office").unwrap().ends_with("\na"), "content survives the rename");
    assert!(fx.list.get(id).unwrap().active);
}

#[test]
fn renaming_inactive_profile_keeps_active_name() {
    let backend = MockBackend::new("")
        .with_profile("home", "a")
        .with_profile("work", "b")
        .with_active("home");
    let mut fx = open(&backend);
    let id = ProfileId::Ordinal(2);
    fx.list.begin_rename(id);
    fx.list.rename_input(id, "office");
    fx.list.commit_rename(id, &mut fx.store);
    fx.editor.update(&fx.store, &backend);

    fx.editor.save(&mut fx.store, &backend);

    assert!(!backend.called("save_active_name"));
    assert_eq!(fx.store.current_active_name(), "home");
}

#[test]
fn old_name_is_forgotten_after_save() {
    let backend = MockBackend::new("").with_profile("work", "a");
    let mut fx = open(&backend);
    let id = ProfileId::Ordinal(1);
    fx.list.begin_rename(id);
    fx.list.rename_input(id, "office");
    fx.list.commit_rename(id, &mut fx.store);
    fx.editor.update(&fx.store, &backend);

    if fx.editor.save(&mut fx.store, &backend) {
        fx.list.mark_saved(id);
    }

    assert_eq!(fx.store.selected_profile().old_name, None);
    assert_eq!(fx.list.get(id).unwrap().old_name, None);
}

#[test]
fn sentinel_cannot_be_saved() {
    let backend = MockBackend::new("127.0.0.1 localhost\n");
    let mut fx = open(&backend);

    assert!(!fx.editor.save(&mut fx.store, &backend));
    assert!(!backend.called("save_profile"));
}
