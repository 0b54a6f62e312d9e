//! Configuration loading and path resolution.
//!
//! Supports HOSTSWAP_HOME env var override for testing.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Env var pointing the system hosts file at an ordinary file (tests, dry runs).
pub const HOSTS_FILE_ENV: &str = "HOSTSWAP_HOSTS_FILE";

/// Paths for the hostswap data store.
#[derive(Debug, Clone)]
pub struct HostswapPaths {
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    pub profiles_dir: PathBuf,
    pub active_name_file: PathBuf,
}

impl HostswapPaths {
    /// Build paths from base directory (e.g. ProjectDirs data dir or HOSTSWAP_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        let profiles_dir = base.join("my-hosts");
        let active_name_file = base.join("current-host");
        Self {
            data_dir: base,
            config_file,
            profiles_dir,
            active_name_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default paths (respects HOSTSWAP_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOSTSWAP_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "hostswap", "hostswap") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hostswap")
        };
        Self::from_base(base)
    }
}

/// Main config.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Write profiles to this file instead of the real system hosts file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    /// Default tracing filter when RUST_LOG is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Config {
    /// Load config from paths (with shared lock when file exists).
    pub fn load(paths: &HostswapPaths) -> Result<Config> {
        if paths.config_file.is_file() {
            let mut file = fs::OpenOptions::new()
                .read(true)
                .open(&paths.config_file)
                .with_context(|| format!("open {}", paths.config_file.display()))?;
            fs2::FileExt::lock_shared(&file)?;
            use std::io::Read;
            let mut s = String::new();
            file.read_to_string(&mut s)?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parse {}", paths.config_file.display()))?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &HostswapPaths) -> Result<()> {
        if let Some(p) = paths.config_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&paths.config_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        file.set_len(0)?;
        let s = toml::to_string_pretty(self)?;
        use std::io::Write;
        file.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Hosts file override: HOSTSWAP_HOSTS_FILE wins over config.
    pub fn hosts_file_override(&self) -> Option<PathBuf> {
        std::env::var_os(HOSTS_FILE_ENV)
            .map(PathBuf::from)
            .or_else(|| self.hosts_file.clone())
    }
}
