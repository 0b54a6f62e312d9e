//! Shared test helpers.

#![allow(dead_code)]

use anyhow::Result;
use hostswap::backend::{HostsBackend, SaveRequest};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a temp directory for use as HOSTSWAP_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_hostswap_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostswap_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

/// Run a closure with HOSTSWAP_HOME set to the given path.
pub fn with_test_env<F, R>(home: &std::path::Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let prev = std::env::var_os("HOSTSWAP_HOME");
    std::env::set_var("HOSTSWAP_HOME", home);
    let r = f();
    match prev {
        Some(v) => std::env::set_var("HOSTSWAP_HOME", v),
        None => std::env::remove_var("HOSTSWAP_HOME"),
    }
    r
}

#[derive(Default)]
struct MockState {
    system: String,
    profiles: BTreeMap<String, String>,
    active: String,
    calls: Vec<String>,
    failing: HashSet<&'static str>,
}

/// In-memory backend that records every call by operation name.
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new(system: &str) -> Self {
        Self {
            state: Mutex::new(MockState {
                system: system.to_string(),
                ..MockState::default()
            }),
        }
    }

    pub fn with_profile(self, name: &str, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(name.to_string(), content.to_string());
        self
    }

    pub fn with_active(self, name: &str) -> Self {
        self.state.lock().unwrap().active = name.to_string();
        self
    }

    /// Make the named operation fail from now on.
    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn called(&self, op: &str) -> bool {
        self.calls().iter().any(|c| c == op || c.starts_with(&format!("{op}:")))
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn profile(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().profiles.get(name).cloned()
    }

    pub fn active(&self) -> String {
        self.state.lock().unwrap().active.clone()
    }

    pub fn system(&self) -> String {
        self.state.lock().unwrap().system.clone()
    }

    fn record(&self, op: &'static str, arg: Option<&str>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(match arg {
            Some(a) => format!("{op}:{a}"),
            None => op.to_string(),
        });
        if state.failing.contains(op) {
            anyhow::bail!("{op} failed");
        }
        Ok(())
    }
}

impl HostsBackend for MockBackend {
    fn read_system_hosts(&self) -> Result<String> {
        self.record("read_system_hosts", None)?;
        Ok(self.system())
    }

    fn read_profile(&self, name: &str) -> Result<String> {
        self.record("read_profile", Some(name))?;
        Ok(self.profile(name).unwrap_or_default())
    }

    fn list_profiles(&self) -> Result<Vec<String>> {
        self.record("list_profiles", None)?;
        Ok(self.state.lock().unwrap().profiles.keys().cloned().collect())
    }

    fn read_active_name(&self) -> Result<String> {
        self.record("read_active_name", None)?;
        Ok(self.active())
    }

    fn save_profile(&self, request: &SaveRequest) -> Result<()> {
        self.record("save_profile", Some(&request.name))?;
        let mut state = self.state.lock().unwrap();
        if let Some(old) = &request.old_name {
            state.profiles.remove(old);
        }
        state
            .profiles
            .insert(request.name.clone(), request.content.clone());
        Ok(())
    }

    fn save_active_name(&self, name: &str) -> Result<()> {
        self.record("save_active_name", Some(name))?;
        self.state.lock().unwrap().active = name.to_string();
        Ok(())
    }

    fn apply_profile(&self, name: &str) -> Result<()> {
        self.record("apply_profile", Some(name))?;
        let mut state = self.state.lock().unwrap();
        let content = state
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("profile '{name}' does not exist"))?;
        state.system = content;
        Ok(())
    }

    fn delete_profile(&self, name: &str) -> Result<()> {
        self.record("delete_profile", Some(name))?;
        let mut state = self.state.lock().unwrap();
        if state.profiles.remove(name).is_none() {
            anyhow::bail!("profile '{name}' does not exist");
        }
        Ok(())
    }
}
