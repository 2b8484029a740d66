//! Network metrics, conditions and the pure functions over them.

use crate::config::HealthThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated view of the network at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub average_latency_ms: f64,
    pub peer_connectivity_pct: f64,
    pub orphaned_blocks_24h: u64,
    pub block_reorgs_24h: u64,
    pub propagation_time_ms: f64,
    pub tx_throughput: f64,
    pub hashrate: u64,
    /// Always `trust_score(self)`; recomputed on every aggregation.
    pub trust_score: f64,
}

impl Default for NetworkMetrics {
    fn default() -> Self {
        let mut metrics = Self {
            average_latency_ms: 0.0,
            peer_connectivity_pct: 0.0,
            orphaned_blocks_24h: 0,
            block_reorgs_24h: 0,
            propagation_time_ms: 0.0,
            tx_throughput: 0.0,
            hashrate: 0,
            trust_score: 0.0,
        };
        metrics.refresh_trust();
        metrics
    }
}

impl NetworkMetrics {
    /// Recompute `trust_score` from the other fields.
    pub fn refresh_trust(&mut self) {
        self.trust_score = trust_score(self);
    }

    pub fn with_refreshed_trust(mut self) -> Self {
        self.refresh_trust();
        self
    }
}

/// Ordinal network condition, worst last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NetworkCondition {
    Optimal,
    Degraded,
    Stressed,
    Critical,
}

impl NetworkCondition {
    pub fn label(&self) -> &'static str {
        match self {
            NetworkCondition::Optimal => "OPTIMAL",
            NetworkCondition::Degraded => "DEGRADED",
            NetworkCondition::Stressed => "STRESSED",
            NetworkCondition::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for NetworkCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count threshold breaches and map them onto one condition.
///
/// ≥2 critical → Critical; ≥1 critical or ≥3 warnings → Stressed;
/// ≥1 warning → Degraded; otherwise Optimal.
pub fn diagnose_metrics(metrics: &NetworkMetrics, t: &HealthThresholds) -> NetworkCondition {
    let mut warnings = 0u32;
    let mut criticals = 0u32;

    let mut check = |warn: bool, crit: bool| {
        warnings += u32::from(warn);
        criticals += u32::from(crit);
    };

    check(
        metrics.average_latency_ms > t.latency_warning_ms,
        metrics.average_latency_ms > t.latency_critical_ms,
    );
    check(
        metrics.block_reorgs_24h > t.reorg_warning,
        metrics.block_reorgs_24h > t.reorg_critical,
    );
    check(
        metrics.orphaned_blocks_24h > t.orphan_warning,
        metrics.orphaned_blocks_24h > t.orphan_critical,
    );
    check(
        metrics.peer_connectivity_pct < t.connectivity_warning_pct,
        metrics.peer_connectivity_pct < t.connectivity_critical_pct,
    );

    if criticals >= 2 {
        NetworkCondition::Critical
    } else if criticals >= 1 || warnings >= 3 {
        NetworkCondition::Stressed
    } else if warnings >= 1 {
        NetworkCondition::Degraded
    } else {
        NetworkCondition::Optimal
    }
}

/// Continuous trust in the network, in `[0, 1]`.
///
/// Starts at 1.0, loses a staged latency penalty (0.1 from 100ms, 0.2 from
/// 500ms, 0.4 from 1000ms), up to 0.3 for reorgs (saturating at 10) and up to
/// 0.2 for orphans (saturating at 20), and gains up to 0.1 for connectivity.
pub fn trust_score(metrics: &NetworkMetrics) -> f64 {
    let mut score = 1.0;

    let latency = metrics.average_latency_ms;
    score -= if latency < 100.0 {
        0.0
    } else if latency < 500.0 {
        0.1
    } else if latency < 1_000.0 {
        0.2
    } else {
        0.4
    };

    score -= (metrics.block_reorgs_24h.min(10) as f64 / 10.0) * 0.3;
    score -= (metrics.orphaned_blocks_24h.min(20) as f64 / 20.0) * 0.2;
    score += (metrics.peer_connectivity_pct.clamp(0.0, 100.0) / 100.0) * 0.1;

    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
