//! Launcher-wide configuration.
//!
//! The discovery directory and the sequence store path are explicit values
//! passed down from the CLI, not module-level globals, so tests can inject
//! temporary locations.

use std::path::PathBuf;

/// Default directory scanned for unit manifests.
pub const DEFAULT_UNITS_DIR: &str = "units";

/// Default path of the persistent sequence store.
pub const DEFAULT_STORE_FILE: &str = "recaman_sequence.json";

/// Paths the launcher operates on.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Directory enumerated by discovery.
    pub units_dir: PathBuf,
    /// On-disk location of the sequence unit's state store.
    pub store_file: PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            units_dir: PathBuf::from(DEFAULT_UNITS_DIR),
            store_file: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl LauncherConfig {
    /// Sequence-engine configuration derived from these paths.
    pub fn sequence_config(&self) -> crate::engine::SequenceConfig {
        crate::engine::SequenceConfig::new(self.store_file.clone())
    }
}
