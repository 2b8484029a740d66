//! Shared network health monitor.

use crate::config::HealthThresholds;
use crate::domain::{NetworkCondition, NetworkHealthDiagnoser, NetworkMetrics};
use crate::metrics;
use crate::ports::inbound::NetworkHealthApi;
use crate::ports::outbound::HealthSource;
use parking_lot::Mutex;
use shared_types::TimeSource;
use std::sync::Arc;

/// A [`NetworkHealthDiagnoser`] behind a mutex. Clones share one diagnoser.
#[derive(Clone)]
pub struct SharedHealthMonitor {
    inner: Arc<Mutex<NetworkHealthDiagnoser>>,
}

impl SharedHealthMonitor {
    pub fn new(thresholds: HealthThresholds, clock: Arc<dyn TimeSource>) -> Self {
        Self::from_diagnoser(NetworkHealthDiagnoser::new(thresholds, clock))
    }

    pub fn from_diagnoser(diagnoser: NetworkHealthDiagnoser) -> Self {
        Self {
            inner: Arc::new(Mutex::new(diagnoser)),
        }
    }

    /// Run `f` with exclusive access, e.g. to change thresholds.
    pub fn with_diagnoser<R>(&self, f: impl FnOnce(&mut NetworkHealthDiagnoser) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn trust_history(&self) -> Vec<f64> {
        self.inner.lock().trust_history()
    }
}

impl HealthSource for SharedHealthMonitor {
    fn assess(&self) -> (NetworkMetrics, NetworkCondition) {
        let (metrics, condition) = self.inner.lock().diagnose();
        metrics::set_trust_score(metrics.trust_score);
        (metrics, condition)
    }
}

impl NetworkHealthApi for SharedHealthMonitor {
    fn record_latency(&self, peer: &str, latency_ms: f64) {
        self.inner.lock().record_latency(peer, latency_ms);
    }

    fn record_propagation(&self, height: u64, propagation_ms: f64) {
        self.inner.lock().record_propagation(height, propagation_ms);
    }

    fn record_orphan(&self, height: u64) {
        self.inner.lock().record_orphan(height);
    }

    fn record_reorg(&self, height: u64, depth: u64) {
        self.inner.lock().record_reorg(height, depth);
    }

    fn record_throughput(&self, tps: f64) {
        self.inner.lock().record_throughput(tps);
    }

    fn record_connectivity(&self, pct: f64) {
        self.inner.lock().record_connectivity(pct);
    }

    fn record_hashrate(&self, hashrate: u64) {
        self.inner.lock().record_hashrate(hashrate);
    }

    fn metrics(&self) -> NetworkMetrics {
        self.inner.lock().metrics()
    }

    fn condition(&self) -> NetworkCondition {
        self.inner.lock().condition()
    }

    fn is_under_attack(&self) -> bool {
        self.inner.lock().is_under_attack()
    }

    fn is_saturated(&self) -> bool {
        self.inner.lock().is_saturated()
    }

    fn is_isolated(&self) -> bool {
        self.inner.lock().is_isolated()
    }

    fn health_report(&self) -> String {
        self.inner.lock().health_report()
    }
}
