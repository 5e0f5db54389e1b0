//! Persistent Recamán sequence engine.
//!
//! The one program unit in the repository with real state to manage: a
//! deduplicating Recamán generator whose sequence survives across runs.
//!
//! # Recurrence
//!
//! At step `k` (counted from 1 across the whole life of the store) the
//! candidate is `previous - k`; it is accepted when it is non-negative and
//! not already recorded. Otherwise the value is `previous + k`. Membership is
//! checked on every step regardless of branch: the additive value genuinely
//! can collide with an earlier term (the first time at step 24, where
//! `18 + 24 = 42` repeats the value generated at step 20). A colliding value
//! still becomes `previous` for the next step but is never recorded twice:
//! the store holds each value exactly once, in order of first generation.
//!
//! # State machine
//!
//! Uninitialized → Loaded (`load`) → Extended (`extend`) → Persisted
//! (`persist`) → process exit. Because skipped steps exist, the stored list
//! alone does not pin down the resume point; `load` re-derives the step
//! counter and the membership set by replaying the recurrence against the
//! stored list, which also rejects hand-edited stores as corrupt.

pub mod store;

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use self::store::{SequenceStore, StoreError};

/// New terms appended per run.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Store size that triggers the storage-health prompt.
pub const DEFAULT_HEALTH_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Configuration for one engine instance.
///
/// Passed in at construction so tests can inject temporary paths and tiny
/// thresholds.
#[derive(Debug, Clone)]
pub struct SequenceConfig {
    /// Location of the state store.
    pub store_path: PathBuf,
    /// Terms appended per `extend` invocation.
    pub batch_size: usize,
    /// On-disk size, in bytes, above which the health check fires.
    pub health_threshold: u64,
}

impl SequenceConfig {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            health_threshold: DEFAULT_HEALTH_THRESHOLD,
        }
    }
}

/// In-memory sequence state plus its private store.
///
/// The engine exclusively owns the store; no other component reads or writes
/// it, and all access happens within a single unit run.
#[derive(Debug)]
pub struct SequenceEngine {
    store: SequenceStore,
    terms: Vec<u64>,
    seen: HashSet<u64>,
    /// Recurrence steps taken so far, including skipped ones.
    step: u64,
    /// Most recently generated value, appended or skipped.
    previous: u64,
}

impl SequenceEngine {
    /// Load state from the store, or start an empty sequence.
    ///
    /// The canonical seed 0 is emitted by the first `extend` call, so a
    /// brand-new state holds no terms yet. A store that exists but cannot be
    /// parsed, or whose contents are not a valid prefix of the recurrence,
    /// is a fatal condition for this run: the error tells the user that
    /// deleting the file is the recovery path. The engine never resets
    /// silently.
    pub fn load(config: &SequenceConfig) -> Result<Self, StoreError> {
        let store = SequenceStore::new(config.store_path.clone());

        let Some(terms) = store.load()? else {
            info!(store = %config.store_path.display(), "no store found; starting from an empty sequence");
            return Ok(Self {
                store,
                terms: Vec::new(),
                seen: HashSet::new(),
                step: 0,
                previous: 0,
            });
        };

        let (step, previous, seen) =
            replay(&terms).ok_or_else(|| StoreError::Corrupt {
                path: config.store_path.clone(),
                reason: "contents are not a valid Recaman prefix".to_string(),
            })?;

        debug!(terms = terms.len(), step, "resumed sequence from store");
        Ok(Self {
            store,
            terms,
            seen,
            step,
            previous,
        })
    }

    /// Append exactly `n` new terms and return them.
    ///
    /// On an empty state the first appended term is the canonical seed 0.
    /// Steps whose additive value is already recorded advance the recurrence
    /// without appending, so more than `n` steps may be taken.
    pub fn extend(&mut self, n: usize) -> Vec<u64> {
        let mut appended = Vec::with_capacity(n);
        if self.terms.is_empty() && n > 0 {
            self.terms.push(0);
            self.seen.insert(0);
            self.previous = 0;
            appended.push(0);
        }
        while appended.len() < n {
            self.step += 1;
            let value = next_value(self.previous, self.step, &self.seen);
            self.previous = value;
            if self.seen.insert(value) {
                self.terms.push(value);
                appended.push(value);
            } else {
                debug!(step = self.step, value, "additive value already recorded; not appending");
            }
        }
        appended
    }

    /// Serialize the full ordered sequence back to the store.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.terms)
    }

    /// The full ordered sequence, oldest first.
    pub fn terms(&self) -> &[u64] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Measure the store on disk. Returns the observed size when it exceeds
    /// the configured threshold, so the caller can put the continue-or-reset
    /// decision to the user. Advisory only: never deletes or truncates.
    pub fn health_check(config: &SequenceConfig) -> Result<Option<u64>, StoreError> {
        let store = SequenceStore::new(config.store_path.clone());
        match store.on_disk_size()? {
            Some(size) if size > config.health_threshold => {
                warn!(size, threshold = config.health_threshold, "sequence store over size threshold");
                Ok(Some(size))
            }
            _ => Ok(None),
        }
    }

    /// Discard the store so generation restarts from 0 on the next run.
    ///
    /// Only reachable through the health-check prompt after an explicit user
    /// confirmation; there is no other in-process delete operation.
    pub fn reset_store(config: &SequenceConfig) -> Result<(), StoreError> {
        info!(store = %config.store_path.display(), "resetting sequence store");
        SequenceStore::new(config.store_path.clone()).remove()
    }
}

/// One recurrence step.
fn next_value(previous: u64, step: u64, seen: &HashSet<u64>) -> u64 {
    match previous.checked_sub(step) {
        Some(candidate) if !seen.contains(&candidate) => candidate,
        _ => previous + step,
    }
}

/// Check `terms` is a valid prefix of the deduplicated recurrence and derive
/// the resume state `(step, previous, seen)`.
///
/// Termination: during a run of skipped steps the additive value grows by an
/// ever-larger increment while the recorded set is fixed, so a new value is
/// always reached after finitely many steps.
fn replay(terms: &[u64]) -> Option<(u64, u64, HashSet<u64>)> {
    match terms.first() {
        // An empty list is the never-extended state.
        None => return Some((0, 0, HashSet::new())),
        Some(&0) => {}
        Some(_) => return None,
    }

    let mut seen = HashSet::from([0]);
    let mut previous = 0u64;
    let mut step = 0u64;
    let mut matched = 1usize;

    while matched < terms.len() {
        step += 1;
        let value = next_value(previous, step, &seen);
        previous = value;
        if seen.insert(value) {
            if terms[matched] != value {
                return None;
            }
            matched += 1;
        }
    }

    Some((step, previous, seen))
}
