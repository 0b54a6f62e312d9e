//! Windows platform implementations.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::SystemHosts;

pub const WINDOWS_HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

/// Copies profiles straight over the hosts file; the process must already be elevated.
pub struct WindowsSystemHosts {
    path: PathBuf,
}

impl WindowsSystemHosts {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(WINDOWS_HOSTS_PATH),
        }
    }
}

impl Default for WindowsSystemHosts {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemHosts for WindowsSystemHosts {
    fn path(&self) -> &Path {
        &self.path
    }

    fn install(&self, source: &Path) -> Result<()> {
        std::fs::copy(source, &self.path).with_context(|| {
            format!(
                "copy {} to {} (run as administrator)",
                source.display(),
                self.path.display()
            )
        })?;
        tracing::info!(source = %source.display(), "installed hosts file");
        Ok(())
    }
}
