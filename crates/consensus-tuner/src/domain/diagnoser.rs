//! Rolling aggregation of raw network observations.

use super::health::{diagnose_metrics, NetworkCondition, NetworkMetrics};
use crate::config::HealthThresholds;
use shared_types::{BoundedLog, TimeSource};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Trust scores kept for trend inspection
const TRUST_HISTORY_WINDOW: usize = 100;

/// Aggregates pushed observations into [`NetworkMetrics`] and a
/// [`NetworkCondition`].
///
/// Latency is a windowed average. Orphans and reorgs are timestamped events
/// counted over the configured horizon (24h by default). Propagation,
/// throughput, connectivity and hashrate keep the latest sample.
///
/// Not synchronized; wrap it (see `adapters::SharedHealthMonitor`) to share
/// between the metrics source and the tuning controller.
pub struct NetworkHealthDiagnoser {
    thresholds: HealthThresholds,
    clock: Arc<dyn TimeSource>,
    latencies: BoundedLog<f64>,
    orphan_events: BoundedLog<u64>,
    reorg_events: BoundedLog<u64>,
    propagation_ms: f64,
    throughput_tps: f64,
    connectivity_pct: f64,
    hashrate: u64,
    trust_history: BoundedLog<f64>,
    last_condition: Option<NetworkCondition>,
}

impl NetworkHealthDiagnoser {
    pub fn new(thresholds: HealthThresholds, clock: Arc<dyn TimeSource>) -> Self {
        let window = thresholds.sample_window;
        Self {
            thresholds,
            clock,
            latencies: BoundedLog::new(window),
            orphan_events: BoundedLog::new(window),
            reorg_events: BoundedLog::new(window),
            propagation_ms: 0.0,
            throughput_tps: 0.0,
            // No evidence of trouble until the first connectivity sample.
            connectivity_pct: 100.0,
            hashrate: 0,
            trust_history: BoundedLog::new(TRUST_HISTORY_WINDOW),
            last_condition: None,
        }
    }

    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }

    // =========================================================================
    // Observations
    // =========================================================================

    pub fn record_latency(&mut self, peer: &str, latency_ms: f64) {
        if !usable(latency_ms) {
            warn!("[consensus-tuner] Ignoring invalid latency sample {} from {}", latency_ms, peer);
            return;
        }
        self.latencies.push(latency_ms);
        debug!("[consensus-tuner] Latency {}ms from {}", latency_ms, peer);
    }

    pub fn record_propagation(&mut self, height: u64, propagation_ms: f64) {
        if !usable(propagation_ms) {
            warn!(
                "[consensus-tuner] Ignoring invalid propagation sample {} for block {}",
                propagation_ms, height
            );
            return;
        }
        self.propagation_ms = propagation_ms;
        if propagation_ms > self.thresholds.slow_propagation_ms {
            warn!(
                "[consensus-tuner] Slow block propagation: block {} took {}ms",
                height, propagation_ms
            );
        }
    }

    pub fn record_orphan(&mut self, height: u64) {
        let now = self.clock.now();
        self.expire_events(now);
        self.orphan_events.push(now);
        warn!(
            "[consensus-tuner] Orphaned block at height {} ({} in window)",
            height,
            self.orphan_events.len()
        );
    }

    pub fn record_reorg(&mut self, height: u64, depth: u64) {
        let now = self.clock.now();
        self.expire_events(now);
        self.reorg_events.push(now);
        warn!(
            "[consensus-tuner] Chain reorganization at height {} (depth {}, {} in window)",
            height,
            depth,
            self.reorg_events.len()
        );
    }

    pub fn record_throughput(&mut self, tps: f64) {
        if !usable(tps) {
            warn!("[consensus-tuner] Ignoring invalid throughput sample {}", tps);
            return;
        }
        self.throughput_tps = tps;
    }

    /// Percentage of expected peers currently connected, clamped to `[0, 100]`.
    pub fn record_connectivity(&mut self, pct: f64) {
        if pct.is_nan() {
            warn!("[consensus-tuner] Ignoring NaN connectivity sample");
            return;
        }
        self.connectivity_pct = pct.clamp(0.0, 100.0);
        if self.connectivity_pct < self.thresholds.connectivity_critical_pct {
            error!(
                "[consensus-tuner] Critical peer connectivity: {:.1}%",
                self.connectivity_pct
            );
        }
    }

    pub fn record_hashrate(&mut self, hashrate: u64) {
        self.hashrate = hashrate;
    }

    fn expire_events(&mut self, now: u64) {
        let cutoff = now.saturating_sub(self.thresholds.event_horizon_s);
        self.orphan_events.drain_front_while(|ts| *ts < cutoff);
        self.reorg_events.drain_front_while(|ts| *ts < cutoff);
    }

    fn events_since(events: &BoundedLog<u64>, cutoff: u64) -> u64 {
        events.iter().filter(|ts| **ts >= cutoff).count() as u64
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Current aggregate view. Does not touch any history.
    pub fn metrics(&self) -> NetworkMetrics {
        let cutoff = self
            .clock
            .now()
            .saturating_sub(self.thresholds.event_horizon_s);

        let average_latency_ms = if self.latencies.is_empty() {
            0.0
        } else {
            self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
        };

        NetworkMetrics {
            average_latency_ms,
            peer_connectivity_pct: self.connectivity_pct,
            orphaned_blocks_24h: Self::events_since(&self.orphan_events, cutoff),
            block_reorgs_24h: Self::events_since(&self.reorg_events, cutoff),
            propagation_time_ms: self.propagation_ms,
            tx_throughput: self.throughput_tps,
            hashrate: self.hashrate,
            trust_score: 0.0,
        }
        .with_refreshed_trust()
    }

    /// Classify the network and record the trust score in the trend window.
    pub fn diagnose(&mut self) -> (NetworkMetrics, NetworkCondition) {
        let metrics = self.metrics();
        let condition = diagnose_metrics(&metrics, &self.thresholds);

        self.trust_history.push(metrics.trust_score);
        if self.last_condition != Some(condition) {
            debug!(
                "[consensus-tuner] Network condition {} (trust {:.2})",
                condition, metrics.trust_score
            );
        }
        self.last_condition = Some(condition);
        (metrics, condition)
    }

    pub fn condition(&self) -> NetworkCondition {
        diagnose_metrics(&self.metrics(), &self.thresholds)
    }

    pub fn trust_score(&self) -> f64 {
        self.metrics().trust_score
    }

    /// Trust scores from previous diagnoses, oldest first.
    pub fn trust_history(&self) -> Vec<f64> {
        self.trust_history.to_vec()
    }

    pub fn last_condition(&self) -> Option<NetworkCondition> {
        self.last_condition
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Critical and a burst of reorgs or orphans.
    pub fn is_under_attack(&self) -> bool {
        let metrics = self.metrics();
        diagnose_metrics(&metrics, &self.thresholds) == NetworkCondition::Critical
            && (metrics.block_reorgs_24h > self.thresholds.attack_reorgs
                || metrics.orphaned_blocks_24h > self.thresholds.attack_orphans)
    }

    /// High throughput with slow propagation.
    pub fn is_saturated(&self) -> bool {
        self.throughput_tps > self.thresholds.saturation_throughput_tps
            && self.propagation_ms > self.thresholds.saturation_propagation_ms
    }

    pub fn is_isolated(&self) -> bool {
        self.connectivity_pct < self.thresholds.isolation_connectivity_pct
    }

    // =========================================================================
    // Threshold tuning
    // =========================================================================

    /// Set the latency warning level; critical becomes twice the warning.
    pub fn set_latency_threshold(&mut self, warning_ms: f64) {
        if !usable(warning_ms) {
            return;
        }
        self.thresholds.latency_warning_ms = warning_ms;
        self.thresholds.latency_critical_ms = warning_ms * 2.0;
    }

    pub fn set_reorg_threshold(&mut self, warning: u64) {
        self.thresholds.reorg_warning = warning;
        self.thresholds.reorg_critical = warning.saturating_mul(2);
    }

    pub fn set_orphan_threshold(&mut self, warning: u64) {
        self.thresholds.orphan_warning = warning;
        self.thresholds.orphan_critical = warning.saturating_mul(2);
    }

    /// Human-readable health summary.
    pub fn health_report(&self) -> String {
        let metrics = self.metrics();
        let condition = diagnose_metrics(&metrics, &self.thresholds);

        let mut out = String::new();
        let _ = writeln!(out, "Network Health Report");
        let _ = writeln!(out, "  Condition:      {}", condition);
        let _ = writeln!(out, "  Trust score:    {:.1}%", metrics.trust_score * 100.0);
        let _ = writeln!(out, "  Avg latency:    {:.1} ms", metrics.average_latency_ms);
        let _ = writeln!(out, "  Connectivity:   {:.1}%", metrics.peer_connectivity_pct);
        let _ = writeln!(out, "  Orphans (24h):  {}", metrics.orphaned_blocks_24h);
        let _ = writeln!(out, "  Reorgs (24h):   {}", metrics.block_reorgs_24h);
        let _ = writeln!(out, "  Propagation:    {:.1} ms", metrics.propagation_time_ms);
        let _ = writeln!(out, "  Throughput:     {:.1} tx/s", metrics.tx_throughput);
        if self.is_under_attack() {
            let _ = writeln!(out, "  ALERT: reorg/orphan pattern consistent with an attack");
        }
        if self.is_isolated() {
            let _ = writeln!(out, "  ALERT: node appears isolated");
        }
        if self.is_saturated() {
            let _ = writeln!(out, "  ALERT: network saturated");
        }
        out
    }
}

fn usable(sample: f64) -> bool {
    sample.is_finite() && sample >= 0.0
}
