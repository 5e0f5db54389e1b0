//! Error handling for the launcher.
//!
//! Provides the central error type using thiserror. Module-specific errors
//! (`DiscoveryError`, `StoreError`) convert into it so callers can use one
//! `Result` alias throughout.

use thiserror::Error;

/// Main error type for the launcher.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// IO errors (file operations, console, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sequence store errors (corrupt data, failed writes)
    #[error(transparent)]
    Store(#[from] crate::engine::store::StoreError),

    /// Discovery errors that abort the whole scan (not per-candidate ones)
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A unit identifier that matches nothing in the catalog
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;

impl LauncherError {
    /// Create a discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create an unknown-unit error
    pub fn unknown_unit(id: impl Into<String>) -> Self {
        Self::UnknownUnit(id.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
