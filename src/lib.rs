//! menurun library
//!
//! A menu-driven program launcher: units are discovered from a directory of
//! manifests at startup, presented as a numbered menu, and run on selection.
//! The one stateful unit is the persistent Recaman sequence generator.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod menu;
pub mod registry;
pub mod unit;
pub mod units;

// Re-export main types for convenience
pub use config::{DEFAULT_STORE_FILE, DEFAULT_UNITS_DIR, LauncherConfig};
pub use engine::store::{SequenceStore, StoreError};
pub use engine::{DEFAULT_BATCH_SIZE, DEFAULT_HEALTH_THRESHOLD, SequenceConfig, SequenceEngine};
pub use error::{LauncherError, Result};
pub use registry::{Catalog, DiscoveryError, MANIFEST_PREFIX, UnitDescriptor, UnitManifest, discover};
pub use unit::ProgramUnit;
pub use units::{ArithmeticTableUnit, GreetingUnit, RecamanUnit, UnitKind};
