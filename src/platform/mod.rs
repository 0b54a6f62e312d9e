//! Platform abstraction for the live system hosts file.

use std::path::{Path, PathBuf};

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use anyhow::{Context, Result};

/// Trait for system hosts file operations.
pub trait SystemHosts: Send + Sync {
    /// Location of the hosts file this implementation manages.
    fn path(&self) -> &Path;

    /// Read the live hosts file.
    fn read(&self) -> Result<String> {
        let path = self.path();
        if !path.exists() {
            anyhow::bail!("hosts file {} does not exist", path.display());
        }
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }

    /// Replace the live hosts file with the contents of `source`.
    fn install(&self, source: &Path) -> Result<()>;
}

/// Get platform SystemHosts implementation.
/// If `override_path` is set (HOSTSWAP_HOSTS_FILE or config), uses FileSystemHosts with that path.
pub fn default_system_hosts(override_path: Option<PathBuf>) -> Box<dyn SystemHosts> {
    if let Some(path) = override_path {
        return Box::new(FileSystemHosts::new(path));
    }
    #[cfg(unix)]
    return Box::new(unix::UnixSystemHosts::new());

    #[cfg(windows)]
    return Box::new(windows::WindowsSystemHosts::new());
}

/// SystemHosts that copies into an ordinary file (for tests and dry runs).
#[derive(Clone)]
pub struct FileSystemHosts {
    path: PathBuf,
}

impl FileSystemHosts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SystemHosts for FileSystemHosts {
    fn path(&self) -> &Path {
        &self.path
    }

    fn install(&self, source: &Path) -> Result<()> {
        if let Some(p) = self.path.parent() {
            std::fs::create_dir_all(p)?;
        }
        std::fs::copy(source, &self.path)
            .with_context(|| format!("copy {} to {}", source.display(), self.path.display()))?;
        Ok(())
    }
}
