//! Consensus tuner configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Breach thresholds for network health diagnosis.
///
/// Warning levels trip on `>` (or `<` for connectivity), critical levels
/// likewise. The attack/saturation/isolation predicates have their own limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub latency_warning_ms: f64,
    pub latency_critical_ms: f64,
    pub reorg_warning: u64,
    pub reorg_critical: u64,
    pub orphan_warning: u64,
    pub orphan_critical: u64,
    pub connectivity_warning_pct: f64,
    pub connectivity_critical_pct: f64,

    /// `is_under_attack`: Critical and more reorgs than this...
    pub attack_reorgs: u64,
    /// ...or more orphans than this
    pub attack_orphans: u64,
    /// `is_saturated`: throughput above this...
    pub saturation_throughput_tps: f64,
    /// ...and propagation slower than this
    pub saturation_propagation_ms: f64,
    /// `is_isolated`: connectivity below this
    pub isolation_connectivity_pct: f64,
    /// Propagation samples above this are logged
    pub slow_propagation_ms: f64,

    /// Samples kept per rolling window
    pub sample_window: usize,
    /// Orphan and reorg events older than this stop counting
    pub event_horizon_s: u64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            latency_warning_ms: 1_000.0,
            latency_critical_ms: 2_000.0,
            reorg_warning: 3,
            reorg_critical: 6,
            orphan_warning: 10,
            orphan_critical: 20,
            connectivity_warning_pct: 75.0,
            connectivity_critical_pct: 50.0,
            attack_reorgs: 5,
            attack_orphans: 20,
            saturation_throughput_tps: 1_000.0,
            saturation_propagation_ms: 5_000.0,
            isolation_connectivity_pct: 25.0,
            slow_propagation_ms: 5_000.0,
            sample_window: 100,
            event_horizon_s: 24 * 60 * 60,
        }
    }
}

/// Tuning controller configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TunerConfig {
    /// Period of the background tuning cycle
    pub interval: Duration,
    /// Apply validated batches automatically
    pub auto_execute: bool,
    /// Larger batches are rejected outright
    pub max_adjustments_per_decision: usize,
    /// Non-empty batches below this confidence are rejected
    pub min_confidence: f64,
    pub decision_history_cap: usize,
    pub adjustment_history_cap: usize,
    pub parameter_history_cap: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            auto_execute: true,
            max_adjustments_per_decision: 5,
            min_confidence: 0.3,
            decision_history_cap: 256,
            adjustment_history_cap: 1_024,
            parameter_history_cap: 1_024,
        }
    }
}
