//! Command layer consumed by the list and editor components.
//!
//! The components only ever talk to [`HostsBackend`]; [`LocalBackend`] is the
//! real implementation over profile files and the platform hosts file.

use anyhow::{Context, Result};

use crate::config::{Config, HostswapPaths};
use crate::platform::{default_system_hosts, SystemHosts};
use crate::store::ProfileRepo;

/// Arguments of a profile save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// Name the profile had when a rename started.
    pub old_name: Option<String>,
    pub name: String,
    pub content: String,
}

/// External operations on hosts profiles.
pub trait HostsBackend: Send + Sync {
    /// Text of the live system hosts file.
    fn read_system_hosts(&self) -> Result<String>;
    /// Saved content of a profile; empty when it was never saved.
    fn read_profile(&self, name: &str) -> Result<String>;
    /// Names of all saved profiles.
    fn list_profiles(&self) -> Result<Vec<String>>;
    /// Name of the profile currently installed, or empty.
    fn read_active_name(&self) -> Result<String>;
    /// Persist a profile, renaming from `old_name` if present.
    fn save_profile(&self, request: &SaveRequest) -> Result<()>;
    /// Record which profile is installed.
    fn save_active_name(&self, name: &str) -> Result<()>;
    /// Install a saved profile as the system hosts file.
    fn apply_profile(&self, name: &str) -> Result<()>;
    /// Remove a saved profile.
    fn delete_profile(&self, name: &str) -> Result<()>;
}

/// HostsBackend over the local data directory and system hosts file.
pub struct LocalBackend {
    repo: ProfileRepo,
    system: Box<dyn SystemHosts>,
}

impl LocalBackend {
    pub fn new(paths: HostswapPaths, system: Box<dyn SystemHosts>) -> Self {
        Self {
            repo: ProfileRepo::new(paths),
            system,
        }
    }

    /// Backend for the given paths, honouring the config's hosts file override.
    pub fn from_config(paths: HostswapPaths, config: &Config) -> Self {
        let system = default_system_hosts(config.hosts_file_override());
        Self::new(paths, system)
    }

    pub fn repo(&self) -> &ProfileRepo {
        &self.repo
    }

    pub fn system(&self) -> &dyn SystemHosts {
        self.system.as_ref()
    }
}

impl HostsBackend for LocalBackend {
    fn read_system_hosts(&self) -> Result<String> {
        self.system.read()
    }

    fn read_profile(&self, name: &str) -> Result<String> {
        self.repo.read(name)
    }

    fn list_profiles(&self) -> Result<Vec<String>> {
        self.repo.list()
    }

    fn read_active_name(&self) -> Result<String> {
        self.repo.read_active_name()
    }

    fn save_profile(&self, request: &SaveRequest) -> Result<()> {
        self.repo
            .save(request.old_name.as_deref(), &request.name, &request.content)
            .with_context(|| format!("save profile '{}'", request.name))?;
        tracing::info!(name = %request.name, "saved profile");
        Ok(())
    }

    fn save_active_name(&self, name: &str) -> Result<()> {
        self.repo.save_active_name(name)
    }

    fn apply_profile(&self, name: &str) -> Result<()> {
        let source = self.repo.profile_path(name)?;
        if !source.is_file() {
            anyhow::bail!("profile '{name}' does not exist");
        }
        self.system
            .install(&source)
            .with_context(|| format!("apply profile '{name}'"))?;
        tracing::info!(name = %name, hosts = %self.system.path().display(), "applied profile");
        Ok(())
    }

    fn delete_profile(&self, name: &str) -> Result<()> {
        self.repo.delete(name)?;
        tracing::info!(name = %name, "deleted profile");
        Ok(())
    }
}
