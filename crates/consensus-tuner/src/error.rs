//! Error types for consensus tuning
//!
//! Rejections are ordinary outcomes of a cycle and are logged, not
//! propagated to the node. `TuningError` exists for the seams that can
//! genuinely fail: applying a single adjustment, persistence and the
//! scheduler lifecycle.

use crate::domain::{DecisionRejection, Parameter};
use shared_types::PersistenceError;
use thiserror::Error;

/// Consensus tuning errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TuningError {
    /// Proposed value lies outside the parameter's safety envelope
    #[error("{parameter} = {value} outside safety envelope [{min}, {max}]")]
    OutOfEnvelope {
        parameter: Parameter,
        value: u32,
        min: u32,
        max: u32,
    },

    /// A whole tuning decision failed batch validation
    #[error("Decision {id} rejected: {reason}")]
    DecisionRejected { id: String, reason: DecisionRejection },

    /// Configured envelope is empty or wider than the hard limits
    #[error("Invalid safety envelope for {parameter}: [{min}, {max}]")]
    InvalidEnvelope { parameter: Parameter, min: u32, max: u32 },

    /// Tuning state could not be loaded or stored
    #[error("Tuning state persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// The periodic scheduler task ended abnormally
    #[error("Tuning scheduler failed: {0}")]
    Scheduler(String),
}

/// Result type for tuning operations
pub type TuningResult<T> = Result<T, TuningError>;
