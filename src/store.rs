//! Profile files on disk and the active-name marker.
//!
//! Every profile is one plain text file under `my-hosts/`, named after the
//! profile. The name of the installed profile is kept in `current-host`.

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::config::HostswapPaths;

/// Reasons a profile name cannot be used as a file name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileNameError {
    #[error("profile name is empty")]
    Empty,
    #[error("profile name {0:?} is reserved")]
    Reserved(String),
    #[error("profile name {0:?} contains a path separator")]
    PathSeparator(String),
    #[error("profile name {0:?} contains a NUL byte")]
    Nul(String),
}

/// Validate a profile name before it is used as a path component.
pub fn validate_profile_name(name: &str) -> Result<(), ProfileNameError> {
    if name.trim().is_empty() {
        return Err(ProfileNameError::Empty);
    }
    if name == "." || name == ".." || name.starts_with('.') {
        return Err(ProfileNameError::Reserved(name.to_string()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ProfileNameError::PathSeparator(name.to_string()));
    }
    if name.contains('\0') {
        return Err(ProfileNameError::Nul(name.to_string()));
    }
    Ok(())
}

/// File-backed profile repository.
#[derive(Debug, Clone)]
pub struct ProfileRepo {
    paths: HostswapPaths,
}

impl ProfileRepo {
    pub fn new(paths: HostswapPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &HostswapPaths {
        &self.paths
    }

    /// Path of the file holding a profile's content.
    pub fn profile_path(&self, name: &str) -> Result<PathBuf> {
        validate_profile_name(name)?;
        Ok(self.paths.profiles_dir.join(name))
    }

    /// Profile names, sorted. Missing directory means no profiles.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if self.paths.profiles_dir.is_dir() {
            for e in fs::read_dir(&self.paths.profiles_dir)
                .with_context(|| format!("read {}", self.paths.profiles_dir.display()))?
            {
                let e = e?;
                if !e.file_type()?.is_file() {
                    continue;
                }
                let Ok(name) = e.file_name().into_string() else {
                    continue;
                };
                if name.starts_with('.') {
                    continue;
                }
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Profile content; an unsaved profile reads as the empty string.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.profile_path(name)?;
        if !path.is_file() {
            return Ok(String::new());
        }
        fs::read_to_string(&path).with_context(|| format!("read profile: {}", path.display()))
    }

    /// Write a profile, removing the file under `old_name` first when renaming.
    pub fn save(&self, old_name: Option<&str>, name: &str, content: &str) -> Result<()> {
        let path = self.profile_path(name)?;
        if let Some(old) = old_name.filter(|old| *old != name) {
            let old_path = self.profile_path(old)?;
            if old_path.is_file() {
                fs::remove_file(&old_path)
                    .with_context(|| format!("remove old profile: {}", old_path.display()))?;
                tracing::debug!(old = %old, new = %name, "renamed profile");
            }
        }
        fs::create_dir_all(&self.paths.profiles_dir)?;
        fs::write(&path, content).with_context(|| format!("write profile: {}", path.display()))?;
        Ok(())
    }

    /// Remove a profile; it must exist.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.profile_path(name)?;
        if !path.is_file() {
            anyhow::bail!("profile '{name}' does not exist");
        }
        fs::remove_file(&path).with_context(|| format!("delete profile: {}", path.display()))?;
        Ok(())
    }

    /// Name of the installed profile, or empty when none was ever applied.
    pub fn read_active_name(&self) -> Result<String> {
        let path = &self.paths.active_name_file;
        if !path.is_file() {
            return Ok(String::new());
        }
        let mut file = fs::OpenOptions::new().read(true).open(path)?;
        fs2::FileExt::lock_shared(&file)?;
        let mut s = String::new();
        file.read_to_string(&mut s)
            .with_context(|| format!("read {}", path.display()))?;
        Ok(s.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Record the installed profile name (with exclusive lock).
    pub fn save_active_name(&self, name: &str) -> Result<()> {
        let path = &self.paths.active_name_file;
        if let Some(p) = path.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        fs2::FileExt::lock_exclusive(&file)?;
        file.set_len(0)?;
        file.write_all(name.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
