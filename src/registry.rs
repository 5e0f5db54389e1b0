//! Unit discovery and the catalog.
//!
//! Discovery replaces runtime type introspection with an explicit data
//! structure: it enumerates a designated directory, admits candidates by a
//! fixed name-prefix convention, parses each admitted file as a JSON unit
//! manifest, resolves the manifest to exactly one registered `UnitKind`, and
//! builds an ordered catalog of descriptors binding a label to a
//! zero-argument factory.
//!
//! # Admission and ordering
//!
//! - A directory entry is a candidate iff its file name starts with `unit_`.
//!   That is the sole admission rule, a naming convention rather than a
//!   security boundary.
//! - Candidates are scanned in file-name order, so the catalog is stable
//!   across repeated calls with an unchanged directory. Catalog order is
//!   discovery order, not sorted labels.
//!
//! # Manifest format
//!
//! ```json
//! {
//!   "units": [
//!     { "kind": "recaman_sequence", "label": "Recaman's Sequence" }
//!   ]
//! }
//! ```
//!
//! The `units` array must contain exactly one entry. A candidate declaring
//! zero or several is rejected whole: the launcher must never guess and run
//! a unit the manifest's author may not have intended.
//!
//! # Failure isolation
//!
//! A candidate that cannot be read, parsed, or resolved never aborts the
//! scan. Each failure is recorded with its file and reason, reported to the
//! user, and scanning continues with the remaining candidates. Discovery
//! runs once at startup; the catalog is immutable afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LauncherConfig;
use crate::unit::ProgramUnit;
use crate::units::UnitKind;

/// File-name prefix that admits a directory entry as a candidate.
pub const MANIFEST_PREFIX: &str = "unit_";

/// Zero-argument constructor for a fresh unit instance.
pub type UnitFactory = Box<dyn Fn() -> Box<dyn ProgramUnit>>;

/// Per-candidate discovery failures. These are reported, never fatal.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The candidate file could not be read.
    #[error("cannot read unit manifest '{path}': {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// The candidate file is not a valid manifest.
    #[error("invalid unit manifest '{path}': {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    /// The manifest declares zero or several units; exactly one is required.
    #[error("unit manifest '{path}' declares {count} units; exactly one is required")]
    AmbiguousOrMissingUnit { path: PathBuf, count: usize },

    /// The manifest names a kind no factory is registered for.
    #[error("unit manifest '{path}' names unknown kind '{kind}' (registered kinds: {known})")]
    UnknownKind {
        path: PathBuf,
        kind: String,
        known: String,
    },
}

/// On-disk description of one candidate unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitManifest {
    pub units: Vec<UnitEntry>,
}

/// One unit declaration inside a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Name of a registered `UnitKind`, e.g. `recaman_sequence`.
    pub kind: String,
    /// Menu label; defaults to the identifier derived from the file name.
    #[serde(default)]
    pub label: Option<String>,
}

/// Immutable catalog entry binding a label to a unit factory.
pub struct UnitDescriptor {
    id: String,
    label: String,
    kind: UnitKind,
    factory: UnitFactory,
}

impl UnitDescriptor {
    /// Identifier derived from the manifest file name (stem minus prefix).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable menu label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Construct a fresh instance of the unit.
    pub fn instantiate(&self) -> Box<dyn ProgramUnit> {
        (self.factory)()
    }
}

impl fmt::Debug for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The ordered catalog plus the per-candidate failures of the scan.
#[derive(Debug, Default)]
pub struct Catalog {
    descriptors: Vec<UnitDescriptor>,
    failures: Vec<DiscoveryError>,
}

impl Catalog {
    /// Descriptors in discovery order.
    pub fn units(&self) -> &[UnitDescriptor] {
        &self.descriptors
    }

    /// Candidates that failed to load, in discovery order.
    pub fn failures(&self) -> &[DiscoveryError] {
        &self.failures
    }

    /// Descriptor at a 0-based catalog index.
    pub fn get(&self, index: usize) -> Option<&UnitDescriptor> {
        self.descriptors.get(index)
    }

    /// Descriptor with the given identifier.
    pub fn find(&self, id: &str) -> Option<&UnitDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Scan the configured units directory and build the catalog.
///
/// A missing directory yields an empty catalog: the launcher still runs, it
/// just has nothing to offer.
pub fn discover(config: &LauncherConfig) -> crate::error::Result<Catalog> {
    let dir = &config.units_dir;
    if !dir.exists() {
        warn!(dir = %dir.display(), "units directory does not exist; catalog is empty");
        return Ok(Catalog::default());
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let admitted = path.is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(MANIFEST_PREFIX));
        if admitted {
            candidates.push(path);
        } else {
            debug!(entry = %path.display(), "entry does not match naming convention; ignored");
        }
    }
    // File-name order keeps the catalog stable across calls.
    candidates.sort();

    let mut catalog = Catalog::default();
    for path in candidates {
        match load_candidate(&path, config) {
            Ok(descriptor) => {
                debug!(id = descriptor.id(), label = descriptor.label(), "discovered unit");
                catalog.descriptors.push(descriptor);
            }
            Err(err) => {
                warn!("{err}");
                catalog.failures.push(err);
            }
        }
    }

    info!(
        units = catalog.len(),
        failures = catalog.failures.len(),
        dir = %dir.display(),
        "discovery complete"
    );
    Ok(catalog)
}

/// Load one admitted candidate into a descriptor.
fn load_candidate(
    path: &Path,
    config: &LauncherConfig,
) -> Result<UnitDescriptor, DiscoveryError> {
    let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let manifest: UnitManifest =
        serde_json::from_str(&content).map_err(|e| DiscoveryError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if manifest.units.len() != 1 {
        return Err(DiscoveryError::AmbiguousOrMissingUnit {
            path: path.to_path_buf(),
            count: manifest.units.len(),
        });
    }
    let entry = &manifest.units[0];

    let kind = UnitKind::from_str(&entry.kind).map_err(|_| DiscoveryError::UnknownKind {
        path: path.to_path_buf(),
        kind: entry.kind.clone(),
        known: UnitKind::known_kinds(),
    })?;

    let id = derive_id(path);
    let label = entry.label.clone().unwrap_or_else(|| id.clone());
    let factory_config = config.clone();

    Ok(UnitDescriptor {
        id,
        label,
        kind,
        factory: Box::new(move || kind.instantiate(&factory_config)),
    })
}

/// `units/unit_recaman.json` -> `recaman`.
fn derive_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    stem.strip_prefix(MANIFEST_PREFIX).unwrap_or(stem).to_string()
}
