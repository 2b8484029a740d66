//! Shared builders for the integration and exploit suites.

use checkpoint_guard::adapters::{InMemoryChainState, InMemoryKnownGoodStore};
use checkpoint_guard::{CheckpointSnapshot, CheckpointValidator, GuardConfig};
use consensus_tuner::{
    ConsensusTuningController, HealthThresholds, InMemoryTuningStore, SafetyEnvelopes,
    SharedHealthMonitor, TunerConfig,
};
use shared_types::{ManualTimeSource, MemoryAuditSink};
use std::sync::Arc;

pub type TestGuard = CheckpointValidator<InMemoryChainState, InMemoryKnownGoodStore>;
pub type TestTuner = ConsensusTuningController<SharedHealthMonitor, InMemoryTuningStore>;

/// Both subsystems over in-memory adapters, sharing one clock and audit sink.
pub struct Sentinel {
    pub clock: Arc<ManualTimeSource>,
    pub audit: Arc<MemoryAuditSink>,
    pub chain: Arc<InMemoryChainState>,
    pub known_good: Arc<InMemoryKnownGoodStore>,
    pub guard: Arc<TestGuard>,
    pub health: SharedHealthMonitor,
    pub tuning_store: Arc<InMemoryTuningStore>,
    pub tuner: Arc<TestTuner>,
}

impl Sentinel {
    pub fn new(now: u64) -> Self {
        Self::with_configs(now, GuardConfig::default(), TunerConfig::default())
    }

    pub fn with_configs(now: u64, guard_config: GuardConfig, tuner_config: TunerConfig) -> Self {
        let clock = Arc::new(ManualTimeSource::new(now));
        let audit = Arc::new(MemoryAuditSink::new());
        let chain = Arc::new(InMemoryChainState::new());
        let known_good = Arc::new(InMemoryKnownGoodStore::new());

        let guard = Arc::new(CheckpointValidator::new(
            guard_config,
            chain.clone(),
            known_good.clone(),
            audit.clone(),
            clock.clone(),
        ));

        let health = SharedHealthMonitor::new(HealthThresholds::default(), clock.clone());
        let tuning_store = Arc::new(InMemoryTuningStore::new());
        let tuner = Arc::new(ConsensusTuningController::new(
            tuner_config,
            SafetyEnvelopes::default(),
            Arc::new(health.clone()),
            tuning_store.clone(),
            audit.clone(),
            clock.clone(),
        ));

        Self {
            clock,
            audit,
            chain,
            known_good,
            guard,
            health,
            tuning_store,
            tuner,
        }
    }

    /// Put every hashline of `snapshot` on our chain.
    pub fn confirm_on_chain(&self, snapshot: &CheckpointSnapshot) {
        for (height, hash) in &snapshot.hashlines {
            self.chain.insert(*height, hash.clone());
        }
    }
}

/// `count` hashlines every 100 blocks from height 100, hash derived from height.
pub fn snapshot(epoch: u64, count: u64) -> CheckpointSnapshot {
    CheckpointSnapshot::from_pairs(
        epoch,
        epoch,
        (1..=count).map(|i| (i * 100, format!("{:064x}", i * 100))),
    )
}
