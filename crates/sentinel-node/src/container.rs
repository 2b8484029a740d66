//! # Subsystem Container
//!
//! Builds both subsystems against file-backed state and restores whatever
//! a previous run persisted.
//!
//! ## Initialization Order
//!
//! 1. Shared infrastructure (clock, audit sink)
//! 2. Chain-state lookup (JSON index, or unavailable)
//! 3. Checkpoint guard, then restore known-good
//! 4. Health monitor and tuning controller, then restore tuning state

use crate::config::NodeConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use checkpoint_guard::adapters::{JsonChainIndex, JsonFileKnownGoodStore, UnavailableChainState};
use checkpoint_guard::{ChainStateLookup, CheckpointValidator, GuardResult};
use consensus_tuner::{
    ConsensusTuningController, JsonFileTuningStore, SafetyEnvelopes, SharedHealthMonitor,
};
use shared_types::{AuditSink, SystemTimeSource, TimeSource, TracingAuditSink};
use std::sync::Arc;
use tracing::{info, warn};

/// Chain lookup chosen at startup.
pub enum NodeChainState {
    Index(JsonChainIndex),
    Unavailable(UnavailableChainState),
}

#[async_trait]
impl ChainStateLookup for NodeChainState {
    async fn exists_at_height(&self, hash: &str, height: u64) -> GuardResult<bool> {
        match self {
            NodeChainState::Index(index) => index.exists_at_height(hash, height).await,
            NodeChainState::Unavailable(none) => none.exists_at_height(hash, height).await,
        }
    }
}

pub type Guard = CheckpointValidator<NodeChainState, JsonFileKnownGoodStore>;
pub type Tuner = ConsensusTuningController<SharedHealthMonitor, JsonFileTuningStore>;

/// Both subsystems plus the health monitor the node's metrics source feeds.
pub struct SentinelContainer {
    pub guard: Arc<Guard>,
    pub tuner: Arc<Tuner>,
    pub health: SharedHealthMonitor,
}

impl SentinelContainer {
    /// Build and restore. A corrupt state file is an error: the operator
    /// must inspect it rather than have it silently replaced.
    pub fn build(config: &NodeConfig) -> Result<Self> {
        let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);
        let audit: Arc<dyn AuditSink> = Arc::new(TracingAuditSink);

        let chain = match &config.chain_index {
            Some(path) => NodeChainState::Index(
                JsonChainIndex::open(path)
                    .with_context(|| format!("opening chain index {}", path.display()))?,
            ),
            None => {
                warn!("[sentinel] No chain index configured; new epochs cannot be verified");
                NodeChainState::Unavailable(UnavailableChainState)
            }
        };

        let guard = Arc::new(CheckpointValidator::new(
            config.guard.clone(),
            Arc::new(chain),
            Arc::new(JsonFileKnownGoodStore::new(config.known_good_path())),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        guard
            .restore()
            .with_context(|| format!("restoring {}", config.known_good_path().display()))?;

        let health = SharedHealthMonitor::new(config.health.clone(), Arc::clone(&clock));
        let tuner = Arc::new(ConsensusTuningController::new(
            config.tuner.clone(),
            SafetyEnvelopes::default(),
            Arc::new(health.clone()),
            Arc::new(JsonFileTuningStore::new(config.tuning_state_path())),
            audit,
            clock,
        ));
        tuner
            .restore()
            .with_context(|| format!("restoring {}", config.tuning_state_path().display()))?;

        info!(
            "[sentinel] Subsystems ready (data dir {})",
            config.data_dir.display()
        );
        Ok(Self {
            guard,
            tuner,
            health,
        })
    }
}
