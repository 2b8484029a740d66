//! # Consensus Tuner Metrics
//!
//! Prometheus metrics, enabled with the `metrics` feature:
//! ```toml
//! consensus-tuner = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `tuning_cycles_total{condition}` - Counter of cycles by diagnosed condition
//! - `tuning_decisions_rejected_total{reason}` - Counter of batches refused by validation
//! - `tuning_adjustments_applied_total` - Counter of applied adjustments
//! - `tuning_adjustments_rejected_total` - Counter of adjustments refused by an envelope
//! - `tuning_quorum_pct`, `tuning_block_time_seconds`, `tuning_difficulty_multiplier` - Live parameters
//! - `network_trust_score` - Trust score at the last assessment

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_gauge, register_int_counter, register_int_counter_vec, register_int_gauge, Gauge,
    IntCounter, IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Cycles, labeled by condition
    pub static ref CYCLES: IntCounterVec = register_int_counter_vec!(
        "tuning_cycles_total",
        "Total number of tuning cycles",
        &["condition"]
    )
    .expect("Failed to create CYCLES metric");

    /// Rejected batches, labeled by reason
    pub static ref DECISIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "tuning_decisions_rejected_total",
        "Total number of tuning decisions rejected by batch validation",
        &["reason"]
    )
    .expect("Failed to create DECISIONS_REJECTED metric");

    pub static ref ADJUSTMENTS_APPLIED: IntCounter = register_int_counter!(
        "tuning_adjustments_applied_total",
        "Total number of applied parameter adjustments"
    )
    .expect("Failed to create ADJUSTMENTS_APPLIED metric");

    pub static ref ADJUSTMENTS_REJECTED: IntCounter = register_int_counter!(
        "tuning_adjustments_rejected_total",
        "Total number of parameter adjustments refused by a safety envelope"
    )
    .expect("Failed to create ADJUSTMENTS_REJECTED metric");

    pub static ref QUORUM_PCT: IntGauge = register_int_gauge!(
        "tuning_quorum_pct",
        "Live quorum percentage"
    )
    .expect("Failed to create QUORUM_PCT metric");

    pub static ref BLOCK_TIME_SECONDS: IntGauge = register_int_gauge!(
        "tuning_block_time_seconds",
        "Live target block time"
    )
    .expect("Failed to create BLOCK_TIME_SECONDS metric");

    pub static ref DIFFICULTY_MULTIPLIER: IntGauge = register_int_gauge!(
        "tuning_difficulty_multiplier",
        "Live difficulty multiplier (percent of base)"
    )
    .expect("Failed to create DIFFICULTY_MULTIPLIER metric");

    pub static ref TRUST_SCORE: Gauge = register_gauge!(
        "network_trust_score",
        "Network trust score at the last assessment"
    )
    .expect("Failed to create TRUST_SCORE metric");
}

#[cfg(feature = "metrics")]
pub fn record_cycle(condition: &str) {
    CYCLES.with_label_values(&[condition]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_decision_rejected(reason: &str) {
    DECISIONS_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_adjustment_applied() {
    ADJUSTMENTS_APPLIED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_adjustment_rejected() {
    ADJUSTMENTS_REJECTED.inc();
}

/// Publish the bounded parameters
#[cfg(feature = "metrics")]
pub fn set_parameters(quorum_pct: u32, block_time_s: u32, difficulty_multiplier: u32) {
    QUORUM_PCT.set(i64::from(quorum_pct));
    BLOCK_TIME_SECONDS.set(i64::from(block_time_s));
    DIFFICULTY_MULTIPLIER.set(i64::from(difficulty_multiplier));
}

#[cfg(feature = "metrics")]
pub fn set_trust_score(score: f64) {
    TRUST_SCORE.set(score);
}

// No-op implementations when metrics feature is disabled

#[cfg(not(feature = "metrics"))]
pub fn record_cycle(_condition: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_decision_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_adjustment_applied() {}

#[cfg(not(feature = "metrics"))]
pub fn record_adjustment_rejected() {}

#[cfg(not(feature = "metrics"))]
pub fn set_parameters(_quorum_pct: u32, _block_time_s: u32, _difficulty_multiplier: u32) {}

#[cfg(not(feature = "metrics"))]
pub fn set_trust_score(_score: f64) {}
