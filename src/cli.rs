//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use crate::backend::{HostsBackend, LocalBackend};
use crate::config::{Config, HostswapPaths};
use crate::dialog::{DialogChoice, DialogKind};
use crate::editor::ContentEditor;
use crate::list::ProfileList;
use crate::state::HostStore;

#[derive(Parser)]
#[command(name = "hostswap")]
#[command(about = "Switch the system hosts file between saved profiles")]
pub struct Cli {
    /// Without a subcommand the desktop window opens
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List saved profiles; the applied one is marked with '*'
    List,
    /// Print a profile's saved content, or the live hosts file when no name is given
    Show { name: Option<String> },
    /// Save a profile from a file or stdin (localhost entries are added if missing)
    Save {
        name: String,
        /// Read content from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Rename this existing profile to NAME while saving
        #[arg(long, value_name = "OLD")]
        rename_from: Option<String>,
    },
    /// Install a saved profile as the system hosts file
    Apply { name: String },
    /// Delete a saved profile (not allowed for the applied one)
    Delete { name: String },
    /// Print the name of the applied profile
    Active,
    /// Print data directory and hosts file locations
    Paths,
    /// Show or change settings in config.toml
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the current settings
    Show,
    /// Set a setting
    Set { key: ConfigKey, value: String },
    /// Remove a setting, going back to its default
    Unset { key: ConfigKey },
}

/// Settings stored in config.toml.
#[derive(Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// Install profiles into this file instead of the system hosts file
    HostsFile,
    /// Log filter used when RUST_LOG is unset
    LogFilter,
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = HostswapPaths::default_paths();
    let config = Config::load(&paths)?;
    let backend = LocalBackend::from_config(paths.clone(), &config);

    let Some(command) = cli.command else {
        crate::logging::init(config.log_filter.as_deref().unwrap_or("info"));
        return crate::app::run(Box::new(backend));
    };
    crate::logging::init(config.log_filter.as_deref().unwrap_or("warn"));

    match command {
        Commands::List => cmd_list(&backend),
        Commands::Show { name } => cmd_show(&backend, name.as_deref()),
        Commands::Save {
            name,
            file,
            rename_from,
        } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                None => {
                    let mut s = String::new();
                    std::io::stdin().read_to_string(&mut s).context("read stdin")?;
                    s
                }
            };
            cmd_save(&backend, &name, rename_from.as_deref(), content)
        }
        Commands::Apply { name } => cmd_apply(&backend, &name),
        Commands::Delete { name } => cmd_delete(&backend, &name),
        Commands::Active => {
            let active = backend.read_active_name()?;
            if !active.is_empty() {
                println!("{active}");
            }
            Ok(())
        }
        Commands::Paths => {
            println!("data\t{}", paths.data_dir.display());
            println!("profiles\t{}", paths.profiles_dir.display());
            println!("hosts\t{}", backend.system().path().display());
            Ok(())
        }
        Commands::Config { cmd } => cmd_config(&paths, config, cmd),
    }
}

fn cmd_config(paths: &HostswapPaths, mut config: Config, cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        ConfigCmd::Set { key, value } => match key {
            ConfigKey::HostsFile => config.hosts_file = Some(PathBuf::from(value)),
            ConfigKey::LogFilter => config.log_filter = Some(value),
        },
        ConfigCmd::Unset { key } => match key {
            ConfigKey::HostsFile => config.hosts_file = None,
            ConfigKey::LogFilter => config.log_filter = None,
        },
    }
    config.save(paths)?;
    println!("Updated {}", paths.config_file.display());
    Ok(())
}

/// Store and components for one headless command, with the list loaded.
struct Session {
    store: HostStore,
    list: ProfileList,
    editor: ContentEditor,
}

impl Session {
    fn open(backend: &dyn HostsBackend) -> Result<Self> {
        let mut store = HostStore::new();
        let mut list = ProfileList::new();
        list.initialize(&mut store, backend);
        if !store.initialized() {
            anyhow::bail!("could not load saved profiles");
        }
        Ok(Self {
            store,
            list,
            editor: ContentEditor::new(),
        })
    }

    /// Select a saved profile by name and load its content.
    fn select(&mut self, name: &str, backend: &dyn HostsBackend) -> Result<()> {
        let id = self
            .list
            .find_by_name(name)
            .ok_or_else(|| anyhow::anyhow!("profile '{name}' not found"))?;
        self.list.select(id, &mut self.store);
        self.editor.update(&self.store, backend);
        Ok(())
    }

    /// Answer every dialog the editor raises with its confirm button,
    /// printing notices; an error notice fails the command.
    fn settle(&mut self, backend: &dyn HostsBackend) -> Result<()> {
        while let Some((kind, message)) = self
            .editor
            .dialog()
            .current()
            .map(|d| (d.kind, d.notice.message()))
        {
            match kind {
                DialogKind::Error => anyhow::bail!("{message}"),
                DialogKind::Success => println!("{message}"),
                DialogKind::Confirm => {}
            }
            self.editor
                .resolve_dialog(DialogChoice::Confirm, &mut self.store, backend);
        }
        Ok(())
    }
}

fn cmd_list(backend: &dyn HostsBackend) -> Result<()> {
    let session = Session::open(backend)?;
    for p in session.list.entries().iter().filter(|p| !p.is_sentinel()) {
        let marker = if p.active { "*" } else { " " };
        println!("{marker} {}", p.name);
    }
    Ok(())
}

fn cmd_show(backend: &dyn HostsBackend, name: Option<&str>) -> Result<()> {
    let content = match name {
        None => backend.read_system_hosts()?,
        Some(name) => {
            let content = backend.read_profile(name)?;
            if content.is_empty() {
                anyhow::bail!("profile '{name}' has not been saved");
            }
            content
        }
    };
    print!("{content}");
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_save(
    backend: &dyn HostsBackend,
    name: &str,
    rename_from: Option<&str>,
    content: String,
) -> Result<()> {
    let mut session = Session::open(backend)?;
    let target = rename_from.unwrap_or(name);
    let id = match session.list.find_by_name(target) {
        Some(id) => id,
        None if rename_from.is_some() => anyhow::bail!("profile '{target}' not found"),
        None => session.list.add(),
    };

    if rename_from.is_some() {
        session.list.begin_rename(id);
    }
    session.list.rename_input(id, name);
    session.list.commit_rename(id, &mut session.store);
    if let Some(d) = session.list.dialog().current() {
        eprintln!("Warning: {}", d.notice.message());
    }

    session.editor.update(&session.store, backend);
    session.editor.edit(&session.store, content);
    if session.editor.save(&mut session.store, backend) {
        session.list.mark_saved(id);
    }
    session.settle(backend)
}

fn cmd_apply(backend: &dyn HostsBackend, name: &str) -> Result<()> {
    let mut session = Session::open(backend)?;
    session.select(name, backend)?;
    session.editor.apply(&mut session.store, backend);
    session.settle(backend)
}

fn cmd_delete(backend: &dyn HostsBackend, name: &str) -> Result<()> {
    let mut session = Session::open(backend)?;
    session.select(name, backend)?;
    session.editor.request_delete(&session.store);
    session.settle(backend)
}
