//! Error types for the checkpoint guard
//!
//! Verdicts are never errors: `validate` always yields a `ValidationOutcome`.
//! These errors live on the I/O seams (parsing, chain lookup, persistence,
//! the ingestion queue) and are folded into `Error*` outcomes by the service.

use shared_types::PersistenceError;
use thiserror::Error;

/// Checkpoint guard errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// Checkpoint document could not be decoded
    #[error("Checkpoint parse failed: {reason}")]
    Parse { reason: String },

    /// Chain-state lookup failed
    #[error("Chain lookup failed at height {height}: {reason}")]
    ChainLookup { height: u64, reason: String },

    /// Chain-state lookup exceeded its time budget
    #[error("Chain lookup timed out after {timeout_ms}ms at height {height}")]
    LookupTimeout { height: u64, timeout_ms: u64 },

    /// Known-good state could not be loaded or stored
    #[error("Known-good persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// The per-source ingestion worker is gone
    #[error("Ingestion queue for source '{source_id}' is closed")]
    IngestClosed { source_id: String },
}

/// Result type for checkpoint guard operations
pub type GuardResult<T> = Result<T, GuardError>;
