//! Profile list: loading, selection, inline rename, activation.

use crate::backend::HostsBackend;
use crate::dialog::{DialogChoice, DialogSlot, Notice};
use crate::profile::{Profile, ProfileId};
use crate::state::HostStore;

/// Effects the list's dialogs can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Install the profile with this id and mark it active.
    Activate(ProfileId),
}

#[derive(Debug, Default)]
pub struct ProfileList {
    entries: Vec<Profile>,
    dialog: DialogSlot<ListAction>,
    seen_active_revision: u64,
    load_failed: bool,
}

impl ProfileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Profile] {
        &self.entries
    }

    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.entries.iter().find(|p| p.id == id)
    }

    /// Id of the first saved entry with this name.
    pub fn find_by_name(&self, name: &str) -> Option<ProfileId> {
        self.entries
            .iter()
            .find(|p| !p.is_sentinel() && p.name == name)
            .map(|p| p.id)
    }

    fn get_mut(&mut self, id: ProfileId) -> Option<&mut Profile> {
        self.entries.iter_mut().find(|p| p.id == id)
    }

    pub fn dialog(&self) -> &DialogSlot<ListAction> {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut DialogSlot<ListAction> {
        &mut self.dialog
    }

    /// Per-frame upkeep: load once while the store is uninitialized, then
    /// follow active-name changes. A failed load is not retried until the
    /// store goes through another initialized cycle.
    pub fn update(&mut self, store: &mut HostStore, backend: &dyn HostsBackend) {
        if store.initialized() {
            self.load_failed = false;
        } else if !self.load_failed {
            self.initialize(store, backend);
            self.load_failed = !store.initialized();
        }
        self.reconcile_active(store);
    }

    /// Fetch profile names and the active name, once per `initialized` cycle.
    /// Failures are logged and leave the list empty.
    pub fn initialize(&mut self, store: &mut HostStore, backend: &dyn HostsBackend) {
        if store.initialized() {
            return;
        }
        let fetched = backend
            .list_profiles()
            .and_then(|names| Ok((names, backend.read_active_name()?)));
        let (names, active_name) = match fetched {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to load host files");
                self.entries.clear();
                return;
            }
        };

        let mut entries = Vec::with_capacity(names.len() + 1);
        entries.push(Profile::sentinel());
        entries.extend(
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Profile::saved(i + 1, name, &active_name)),
        );
        tracing::debug!(count = entries.len() - 1, active = %active_name, "loaded host files");
        self.entries = entries;

        store.set_current_active_name(active_name);
        self.seen_active_revision = store.active_revision();
        store.set_initialized(true);
    }

    /// Recompute `active` flags if the store's active name changed.
    pub fn reconcile_active(&mut self, store: &HostStore) {
        if self.seen_active_revision == store.active_revision() {
            return;
        }
        self.seen_active_revision = store.active_revision();
        let active = store.current_active_name();
        for p in &mut self.entries {
            p.active = !p.is_sentinel() && !active.is_empty() && p.name == active;
        }
    }

    /// Make `id` the profile shown in the editor; unknown ids fall back to the sentinel.
    pub fn select(&self, id: ProfileId, store: &mut HostStore) {
        let profile = self.get(id).cloned().unwrap_or_else(Profile::sentinel);
        store.set_selected_profile(profile);
    }

    /// Append an unsaved profile in rename mode. Returns its id.
    pub fn add(&mut self) -> ProfileId {
        let n = self.entries.len();
        let id = ProfileId::Ordinal(self.next_ordinal());
        self.entries.push(Profile {
            id,
            name: format!("host{n}"),
            old_name: None,
            active: false,
            editing: true,
        });
        id
    }

    fn next_ordinal(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|p| match p.id {
                ProfileId::Ordinal(n) => Some(n),
                ProfileId::Init => None,
            })
            .max()
            .map_or(1, |n| n + 1)
    }

    /// Double-click on a name: switch to inline editing and remember the old name.
    pub fn begin_rename(&mut self, id: ProfileId) {
        if id.is_sentinel() {
            return;
        }
        if let Some(p) = self.get_mut(id) {
            p.editing = true;
            p.old_name = Some(p.name.clone());
        }
    }

    /// Live update of the name field.
    pub fn rename_input(&mut self, id: ProfileId, name: impl Into<String>) {
        if id.is_sentinel() {
            return;
        }
        if let Some(p) = self.get_mut(id) {
            p.name = name.into();
        }
    }

    /// Enter in the name field: leave editing and select the entry.
    pub fn commit_rename(&mut self, id: ProfileId, store: &mut HostStore) {
        let Some(p) = self.get_mut(id) else {
            return;
        };
        p.editing = false;
        let name = p.name.clone();

        let duplicate = self
            .entries
            .iter()
            .any(|other| other.id != id && !other.is_sentinel() && other.name == name);
        if duplicate {
            tracing::warn!(name = %name, "duplicate host file name");
            self.dialog.error(Notice::DuplicateName(name));
        }

        self.select(id, store);
    }

    /// The entry was written under its current name; forget the pre-rename name.
    pub fn mark_saved(&mut self, id: ProfileId) {
        if let Some(p) = self.get_mut(id) {
            p.old_name = None;
        }
    }

    /// Click outside the list: every entry leaves editing, names are kept.
    pub fn cancel_editing(&mut self) {
        for p in &mut self.entries {
            p.editing = false;
        }
    }

    /// Switch on a row: ask before installing it.
    pub fn request_activate(&mut self, id: ProfileId) {
        if id.is_sentinel() || self.get(id).is_none() {
            return;
        }
        self.dialog.confirm(Notice::ConfirmApply, ListAction::Activate(id));
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
        if let Some(ListAction::Activate(id)) = effect {
            self.activate(id, store, backend);
        }
        self.dialog.close(ticket);
    }

    /// Install the toggled row and record it as active.
    fn activate(&mut self, id: ProfileId, store: &mut HostStore, backend: &dyn HostsBackend) {
        let Some(name) = self.get(id).map(|p| p.name.clone()) else {
            return;
        };
        let result = backend
            .apply_profile(&name)
            .and_then(|()| backend.save_active_name(&name));
        if let Err(e) = result {
            tracing::error!(name = %name, error = %format!("{e:#}"), "failed to apply host file");
            self.dialog.error(Notice::ApplyFailed);
            return;
        }
        for p in &mut self.entries {
            p.active = p.id == id;
        }
        store.set_current_active_name(name);
        self.seen_active_revision = store.active_revision();
    }
}
