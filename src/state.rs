//! Shared UI state: selection, active profile name, first-load flag.
//!
//! Components hold the revision they last reacted to and compare it against
//! the store each frame; every setter bumps the revision even when the value
//! is unchanged.

use crate::profile::Profile;

#[derive(Debug, Clone)]
pub struct HostStore {
    selected_profile: Profile,
    current_active_name: String,
    initialized: bool,
    selection_revision: u64,
    active_revision: u64,
}

impl Default for HostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStore {
    pub fn new() -> Self {
        Self {
            selected_profile: Profile::sentinel(),
            current_active_name: String::new(),
            initialized: false,
            selection_revision: 0,
            active_revision: 0,
        }
    }

    pub fn selected_profile(&self) -> &Profile {
        &self.selected_profile
    }

    pub fn current_active_name(&self) -> &str {
        &self.current_active_name
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn selection_revision(&self) -> u64 {
        self.selection_revision
    }

    pub fn active_revision(&self) -> u64 {
        self.active_revision
    }

    pub fn set_selected_profile(&mut self, profile: Profile) {
        self.selected_profile = profile;
        self.selection_revision += 1;
    }

    pub fn set_current_active_name(&mut self, name: impl Into<String>) {
        self.current_active_name = name.into();
        self.active_revision += 1;
    }

    pub fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    /// Go back to the live system file entry.
    pub fn deselect(&mut self) {
        self.set_selected_profile(Profile::sentinel());
    }

    /// Whether the selected profile is the one installed on the system.
    pub fn selected_is_active(&self) -> bool {
        !self.current_active_name.is_empty()
            && self.selected_profile.name == self.current_active_name
    }
}
