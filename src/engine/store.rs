//! On-disk persistence for the sequence engine.
//!
//! The store is a single pretty-printed JSON array of non-negative integers,
//! written wholly on each persisting run and read wholly on each loading run.
//! Writes go to a temporary file in the store's directory which is fsynced
//! and then renamed over the store, so an interrupted persist never leaves a
//! half-written file behind; the previous state remains the last successfully
//! persisted version.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Errors raised by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store exists but does not hold a usable sequence. Recovery is a
    /// user decision: the engine never deletes data on its own.
    #[error(
        "sequence store '{path}' is corrupt: {reason}. \
         Delete the file by hand to restart the sequence from 0."
    )]
    Corrupt { path: PathBuf, reason: String },

    /// The store could not be read (permissions, hardware, ...).
    #[error("failed to read sequence store '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Persisting failed; the previous on-disk state is untouched.
    #[error("failed to write sequence store '{path}': {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Handle on the sequence store file.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    path: PathBuf,
}

impl SequenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full sequence, or `None` if no store exists yet.
    pub fn load(&self) -> Result<Option<Vec<u64>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let terms: Vec<u64> =
            serde_json::from_str(&content).map_err(|err| StoreError::Corrupt {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;

        debug!(path = %self.path.display(), terms = terms.len(), "loaded sequence store");
        Ok(Some(terms))
    }

    /// Write the full sequence, replacing the store atomically.
    pub fn save(&self, terms: &[u64]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let write_err = |reason: String| StoreError::Write {
            path: self.path.clone(),
            reason,
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| write_err(format!("could not create temporary file: {e}")))?;
        serde_json::to_writer_pretty(&mut tmp, terms)
            .map_err(|e| write_err(format!("could not serialize sequence: {e}")))?;
        tmp.flush()
            .map_err(|e| write_err(format!("could not flush temporary file: {e}")))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| write_err(format!("could not sync temporary file: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| write_err(format!("could not replace store: {}", e.error)))?;

        debug!(path = %self.path.display(), terms = terms.len(), "persisted sequence store");
        Ok(())
    }

    /// Size of the store on disk, or `None` if no store exists.
    pub fn on_disk_size(&self) -> Result<Option<u64>, StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.len())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                path: self.path.clone(),
                source: err,
            }),
        }
    }

    /// Discard the store. Only called on an explicit user decision.
    pub fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Write {
                path: self.path.clone(),
                reason: err.to_string(),
            }),
        }
    }
}
