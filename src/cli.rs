use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_STORE_FILE, DEFAULT_UNITS_DIR, LauncherConfig};

/// menurun - a menu of discovered program units
#[derive(Parser)]
#[command(name = "menurun")]
#[command(about = "Discovers program units in a directory and runs the one you pick")]
#[command(version)]
pub struct Cli {
    /// Directory scanned for unit_* manifests
    #[arg(long, global = true, default_value = DEFAULT_UNITS_DIR)]
    pub units_dir: PathBuf,

    /// Path of the persistent sequence store
    #[arg(long, global = true, default_value = DEFAULT_STORE_FILE)]
    pub store_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the discovered catalog and exit
    List,
    /// Run a single unit by identifier, without the menu
    Run {
        /// Unit identifier as shown by `list` (e.g. "recaman")
        id: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Launcher paths taken from the command line.
    pub fn launcher_config(&self) -> LauncherConfig {
        LauncherConfig {
            units_dir: self.units_dir.clone(),
            store_file: self.store_file.clone(),
        }
    }
}
