//! # Error Types
//!
//! Errors raised by persistence adapters. Absence of state is never an error:
//! loaders return `Ok(None)` on first run.

use thiserror::Error;

/// Persistence failures for known-good and tuning state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    /// Stored state exists but cannot be decoded.
    #[error("Corrupt state in {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// State could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialize(String),
}
