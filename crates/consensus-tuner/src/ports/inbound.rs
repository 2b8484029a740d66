//! Driving Ports (API - Inbound)

use crate::domain::{
    ConsensusParameters, NetworkCondition, NetworkMetrics, ParameterAdjustment, TuningDecision,
};
use async_trait::async_trait;

/// Primary consensus tuning API.
#[async_trait]
pub trait ConsensusTuningApi: Send + Sync {
    /// Run one tuning cycle now. Waits for any cycle already in progress.
    async fn force_cycle(&self) -> TuningDecision;

    /// Snapshot of the live parameters.
    fn current_parameters(&self) -> ConsensusParameters;

    fn last_decision(&self) -> Option<TuningDecision>;

    /// Bounded decision history, oldest first.
    fn decision_history(&self) -> Vec<TuningDecision>;

    /// Applied adjustments, oldest first.
    fn adjustment_history(&self) -> Vec<ParameterAdjustment>;

    fn set_auto_execute(&self, enabled: bool);

    fn auto_execute(&self) -> bool;

    /// Human-readable controller summary.
    fn tuning_report(&self) -> String;
}

/// Push side of network health, fed by the node's metrics collector.
pub trait NetworkHealthApi: Send + Sync {
    fn record_latency(&self, peer: &str, latency_ms: f64);

    fn record_propagation(&self, height: u64, propagation_ms: f64);

    fn record_orphan(&self, height: u64);

    fn record_reorg(&self, height: u64, depth: u64);

    fn record_throughput(&self, tps: f64);

    fn record_connectivity(&self, pct: f64);

    fn record_hashrate(&self, hashrate: u64);

    fn metrics(&self) -> NetworkMetrics;

    fn condition(&self) -> NetworkCondition;

    fn is_under_attack(&self) -> bool;

    fn is_saturated(&self) -> bool;

    fn is_isolated(&self) -> bool;

    fn health_report(&self) -> String;
}
