//! Content editor for the selected profile.
//!
//! Per profile: unsaved-new -> saved -> active. A profile leaves `active`
//! only when another one is applied, and can only be deleted while not active.

use crate::backend::{HostsBackend, SaveRequest};
use crate::dialog::{DialogChoice, DialogSlot, Notice};
use crate::hosts::ensure_canonical_entries;
use crate::state::HostStore;

/// Effects the editor's dialogs can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Release the save guard once the success notice is acknowledged.
    FinishSave,
    /// Record `name` as active and reload the live system file.
    FinishApply { name: String },
    /// Delete the selected profile (after confirmation).
    DeleteCurrent,
}

#[derive(Debug, Default)]
pub struct ContentEditor {
    default_content: String,
    content: String,
    is_saving: bool,
    /// The selected profile could not be read; saving would overwrite it.
    load_failed: bool,
    default_loaded: bool,
    seen_selection_revision: Option<u64>,
    dialog: DialogSlot<EditorAction>,
}

impl ContentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Last fetched text of the live system hosts file.
    pub fn default_content(&self) -> &str {
        &self.default_content
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// False while a save is in flight or the selected profile failed to load.
    pub fn can_save(&self) -> bool {
        !self.is_saving && !self.load_failed
    }

    pub fn dialog(&self) -> &DialogSlot<EditorAction> {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut DialogSlot<EditorAction> {
        &mut self.dialog
    }

    /// The live system file is shown read-only.
    pub fn is_read_only(&self, store: &HostStore) -> bool {
        store.selected_profile().is_sentinel()
    }

    /// Per-frame upkeep: fetch the live file once, then follow selection changes.
    pub fn update(&mut self, store: &HostStore, backend: &dyn HostsBackend) {
        if !self.default_loaded {
            self.default_loaded = true;
            self.load_default(store, backend);
        }
        if self.seen_selection_revision != Some(store.selection_revision()) {
            self.load_selected(store, backend);
        }
    }

    /// Fetch the live system hosts file; failures fall back to empty text.
    pub fn load_default(&mut self, store: &HostStore, backend: &dyn HostsBackend) {
        self.default_content = match backend.read_system_hosts() {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to read system hosts file");
                String::new()
            }
        };
        if self.is_read_only(store) {
            self.content = self.default_content.clone();
        }
    }

    /// Show the selected profile: cached live text for the sentinel, saved text otherwise.
    pub fn load_selected(&mut self, store: &HostStore, backend: &dyn HostsBackend) {
        self.seen_selection_revision = Some(store.selection_revision());
        let selected = store.selected_profile();
        self.load_failed = false;
        if selected.is_sentinel() {
            self.content = self.default_content.clone();
            return;
        }
        // Until a rename is saved the file still lives under the old name.
        let source = selected
            .old_name
            .as_deref()
            .filter(|old| *old != selected.name)
            .unwrap_or(selected.name.as_str());
        match backend.read_profile(source) {
            Ok(content) => self.content = content,
            Err(e) => {
                tracing::error!(name = %selected.name, error = %format!("{e:#}"), "failed to read host file");
                self.content.clear();
                self.load_failed = true;
            }
        }
    }

    /// Replace the text being edited. Ignored while the live file is shown.
    pub fn edit(&mut self, store: &HostStore, text: impl Into<String>) {
        if self.is_read_only(store) {
            return;
        }
        self.content = text.into();
    }

    /// Persist the edited text under the selected profile's name.
    /// Returns true when the profile was written.
    pub fn save(&mut self, store: &mut HostStore, backend: &dyn HostsBackend) -> bool {
        if self.is_saving || self.is_read_only(store) {
            return false;
        }
        if self.load_failed {
            self.dialog.error(Notice::SaveFailed);
            return false;
        }
        self.is_saving = true;

        let selected = store.selected_profile().clone();
        let request = SaveRequest {
            old_name: selected.old_name.clone(),
            name: selected.name.clone(),
            content: ensure_canonical_entries(&self.content),
        };

        let result = backend.save_profile(&request).and_then(|()| {
            let renamed_active = !store.current_active_name().is_empty()
                && request.old_name.as_deref() == Some(store.current_active_name());
            if renamed_active {
                backend.save_active_name(&request.name)?;
                store.set_current_active_name(request.name.clone());
            }
            Ok(())
        });

        match result {
            Ok(()) => {
                // The rename is done; later saves must not remove the old file again.
                let mut saved = selected;
                saved.old_name = None;
                store.set_selected_profile(saved);
                self.seen_selection_revision = Some(store.selection_revision());
                self.content = request.content;
                self.dialog.success(Notice::Saved, Some(EditorAction::FinishSave));
                true
            }
            Err(e) => {
                tracing::error!(name = %request.name, error = %format!("{e:#}"), "failed to save host file");
                self.is_saving = false;
                self.dialog.error(Notice::SaveFailed);
                false
            }
        }
    }

    /// Install the selected profile's saved content as the system hosts file.
    pub fn apply(&mut self, store: &mut HostStore, backend: &dyn HostsBackend) {
        if self.is_read_only(store) {
            return;
        }
        let name = store.selected_profile().name.clone();
        match backend.read_profile(&name) {
            Ok(saved) if saved.is_empty() => {
                self.dialog.error(Notice::CannotApplyEmpty);
            }
            Ok(_) => match backend.apply_profile(&name) {
                Ok(()) => {
                    self.dialog
                        .success(Notice::Applied, Some(EditorAction::FinishApply { name }));
                }
                Err(e) => {
                    tracing::error!(name = %name, error = %format!("{e:#}"), "failed to apply hosts file");
                    self.dialog.error(Notice::ApplyFailed);
                }
            },
            Err(e) => {
                tracing::error!(name = %name, error = %format!("{e:#}"), "failed to read host file before apply");
                self.dialog.error(Notice::ApplyFailed);
            }
        }
        self.is_saving = false;
    }

    /// Delete button: refuse for the active profile, otherwise ask first.
    pub fn request_delete(&mut self, store: &HostStore) {
        if self.is_read_only(store) {
            return;
        }
        if store.selected_is_active() {
            self.dialog.error(Notice::CannotDeleteActive);
            return;
        }
        self.dialog
            .confirm(Notice::ConfirmDelete, EditorAction::DeleteCurrent);
    }

    /// Remove the selected profile and go back to the live system file.
    /// A profile that was never saved is only dropped from the list.
    pub fn delete_current(&mut self, store: &mut HostStore, backend: &dyn HostsBackend) {
        if self.is_read_only(store) {
            return;
        }
        let name = store.selected_profile().name.clone();
        let saved = match backend.read_profile(&name) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::error!(name = %name, error = %format!("{e:#}"), "failed to read host file before delete");
                self.dialog.error(Notice::DeleteFailed);
                return;
            }
        };
        if saved.is_empty() {
            tracing::debug!(name = %name, "discarding unsaved host file");
            store.deselect();
            store.set_initialized(false);
            return;
        }
        match backend.delete_profile(&name) {
            Ok(()) => {
                self.dialog.success(Notice::Deleted, None);
                store.deselect();
                store.set_initialized(false);
            }
            Err(e) => {
                tracing::error!(name = %name, error = %format!("{e:#}"), "failed to delete host file");
                self.dialog.error(Notice::DeleteFailed);
            }
        }
    }

    /// Resolve the open dialog with the user's choice.
    pub fn resolve_dialog(
        &mut self,
        choice: DialogChoice,
        store: &mut HostStore,
        backend: &dyn HostsBackend,
    ) {
        let Some((ticket, effect)) = self.dialog.resolve(choice) else {
            return;
        };
        match effect {
            Some(EditorAction::FinishSave) => self.is_saving = false,
            Some(EditorAction::FinishApply { name }) => self.finish_apply(name, store, backend),
            Some(EditorAction::DeleteCurrent) => self.delete_current(store, backend),
            None => {}
        }
        self.dialog.close(ticket);
    }

    fn finish_apply(&mut self, name: String, store: &mut HostStore, backend: &dyn HostsBackend) {
        if let Err(e) = backend.save_active_name(&name) {
            tracing::error!(name = %name, error = %format!("{e:#}"), "failed to record active host file");
            self.dialog.error(Notice::ApplyFailed);
            return;
        }
        store.set_current_active_name(name);
        self.load_default(store, backend);
    }
}
