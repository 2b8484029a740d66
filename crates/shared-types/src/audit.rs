//! # Audit Sink Port
//!
//! Every checkpoint verdict and every tuning decision produces one
//! [`AuditRecord`]. Delivery is best-effort: a failing sink is logged and
//! otherwise ignored, it never changes a verdict.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Component that produced an audit record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditComponent {
    CheckpointGuard,
    ConsensusTuner,
}

impl fmt::Display for AuditComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditComponent::CheckpointGuard => write!(f, "checkpoint-guard"),
            AuditComponent::ConsensusTuner => write!(f, "consensus-tuner"),
        }
    }
}

/// `(timestamp, component, outcome_or_decision, details)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: u64,
    pub component: AuditComponent,
    /// Outcome label (e.g. `AttackEpochRollback`) or decision id.
    pub verdict: String,
    pub details: String,
}

impl AuditRecord {
    pub fn new(
        timestamp: u64,
        component: AuditComponent,
        verdict: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            component,
            verdict: verdict.into(),
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditError {
    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Receiver for audit records.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord) -> Result<(), AuditError>;
}

/// Deliver a record, logging instead of propagating any failure.
pub fn emit_audit<S: AuditSink + ?Sized>(sink: &S, record: AuditRecord) {
    let verdict = record.verdict.clone();
    let component = record.component;
    if let Err(e) = sink.record(record) {
        warn!("[{}] Audit record '{}' dropped: {}", component, verdict, e);
    }
}

/// Writes audit records to the `audit` tracing target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        info!(
            target: "audit",
            timestamp = record.timestamp,
            component = %record.component,
            verdict = %record.verdict,
            "{}",
            record.details
        );
        Ok(())
    }
}

/// In-memory sink (tests, `report` tooling).
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.records.lock().push(record);
        Ok(())
    }
}

impl<T: AuditSink + ?Sized> AuditSink for std::sync::Arc<T> {
    fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        (**self).record(record)
    }
}
