//! # Checkpoint Guard Metrics
//!
//! Prometheus metrics, enabled with the `metrics` feature:
//! ```toml
//! checkpoint-guard = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `checkpoint_validations_total{outcome}` - Counter of verdicts by outcome
//! - `checkpoint_known_good_epoch` - Gauge of the adopted epoch id
//! - `checkpoint_chain_lookup_failures_total` - Counter of failed or timed-out lookups

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter, IntCounterVec, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Verdicts, labeled by outcome
    pub static ref VALIDATIONS: IntCounterVec = register_int_counter_vec!(
        "checkpoint_validations_total",
        "Total number of checkpoint validations",
        &["outcome"]
    )
    .expect("Failed to create VALIDATIONS metric");

    /// Epoch id of the known-good checkpoint
    pub static ref KNOWN_GOOD_EPOCH: IntGauge = register_int_gauge!(
        "checkpoint_known_good_epoch",
        "Epoch id of the last known-good checkpoint"
    )
    .expect("Failed to create KNOWN_GOOD_EPOCH metric");

    /// Chain lookups that failed or timed out
    pub static ref CHAIN_LOOKUP_FAILURES: IntCounter = register_int_counter!(
        "checkpoint_chain_lookup_failures_total",
        "Total number of chain-state lookups that failed or timed out"
    )
    .expect("Failed to create CHAIN_LOOKUP_FAILURES metric");
}

/// Record a verdict
#[cfg(feature = "metrics")]
pub fn record_validation(outcome: &str) {
    VALIDATIONS.with_label_values(&[outcome]).inc();
}

/// Record the adopted epoch
#[cfg(feature = "metrics")]
pub fn set_known_good_epoch(epoch_id: u64) {
    KNOWN_GOOD_EPOCH.set(epoch_id.min(i64::MAX as u64) as i64);
}

/// Record a failed chain lookup
#[cfg(feature = "metrics")]
pub fn record_lookup_failure() {
    CHAIN_LOOKUP_FAILURES.inc();
}

// No-op implementations when metrics feature is disabled

#[cfg(not(feature = "metrics"))]
pub fn record_validation(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_known_good_epoch(_epoch_id: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_lookup_failure() {}
