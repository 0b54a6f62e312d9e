//! Unix (macOS, Linux) platform implementations.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::SystemHosts;

pub const UNIX_HOSTS_PATH: &str = "/etc/hosts";

/// Quote `s` as a single POSIX shell word.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// AppleScript that copies `src` over `dest` as root.
/// The shell command is embedded in an AppleScript string literal, so
/// backslashes and double quotes are escaped after shell quoting.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn admin_copy_script(src: &str, dest: &str) -> String {
    let cmd = format!("cp {} {}", shell_quote(src), shell_quote(dest));
    let literal = cmd.replace('\\', r"\\").replace('"', r#"\""#);
    format!("do shell script \"{literal}\" with administrator privileges")
}

/// Installs profiles over /etc/hosts through the platform's elevation prompt.
pub struct UnixSystemHosts {
    path: PathBuf,
}

impl UnixSystemHosts {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(UNIX_HOSTS_PATH),
        }
    }
}

impl Default for UnixSystemHosts {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemHosts for UnixSystemHosts {
    fn path(&self) -> &Path {
        &self.path
    }

    fn install(&self, source: &Path) -> Result<()> {
        let src = source.to_string_lossy();
        let dest = self.path.to_string_lossy();

        #[cfg(target_os = "macos")]
        let output = Command::new("osascript")
            .args(["-e", &admin_copy_script(&src, &dest)])
            .output()
            .context("osascript cp hosts")?;

        #[cfg(not(target_os = "macos"))]
        let output = Command::new("pkexec")
            .args(["cp", &*src, &*dest])
            .output()
            .context("pkexec cp hosts")?;

        if !output.status.success() {
            anyhow::bail!(
                "failed to install hosts file: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        tracing::info!(source = %src, dest = %dest, "installed hosts file");
        Ok(())
    }
}
