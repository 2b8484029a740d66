//! Checkpoint guard service
//!
//! Wraps the pure classification ladder with the stateful parts: the
//! known-good snapshot, bounded chain lookups, persistence, audit and the
//! per-call report.

use crate::config::GuardConfig;
use crate::domain::{
    classify, CheckpointDelta, CheckpointSnapshot, Classification, LastKnownGood, StateChange,
    ValidationOutcome,
};
use crate::error::{GuardError, GuardResult};
use crate::metrics;
use crate::parse::parse_checkpoint;
use crate::ports::inbound::CheckpointGuardApi;
use crate::ports::outbound::{ChainStateLookup, KnownGoodStore};
use crate::report::ValidationReport;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{emit_audit, AuditComponent, AuditRecord, AuditSink, TimeSource};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of verifying every new hash on our chain.
enum ChainVerdict {
    AllPresent,
    Missing { height: u64 },
    Unavailable(GuardError),
}

struct GuardState {
    known_good: Option<LastKnownGood>,
    last_report: Option<ValidationReport>,
}

/// Checkpoint validator
///
/// Validations are serialized through an async lane so a chain lookup in
/// flight cannot interleave with another call's read of the known-good state.
pub struct CheckpointValidator<C, K>
where
    C: ChainStateLookup,
    K: KnownGoodStore,
{
    config: GuardConfig,
    state: Arc<RwLock<GuardState>>,
    lane: tokio::sync::Mutex<()>,
    chain: Arc<C>,
    store: Arc<K>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn TimeSource>,
}

impl<C, K> CheckpointValidator<C, K>
where
    C: ChainStateLookup,
    K: KnownGoodStore,
{
    pub fn new(
        config: GuardConfig,
        chain: Arc<C>,
        store: Arc<K>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(GuardState {
                known_good: None,
                last_report: None,
            })),
            lane: tokio::sync::Mutex::new(()),
            chain,
            store,
            audit,
            clock,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Load the persisted known-good state. Returns its epoch, or `None` on first run.
    pub fn restore(&self) -> GuardResult<Option<u64>> {
        let loaded = self.store.load()?;
        let epoch = loaded.as_ref().map(|k| k.epoch_id);

        if let Some(known) = loaded {
            info!(
                "[checkpoint-guard] Restored known-good checkpoint: epoch {} ({} hashlines)",
                known.epoch_id,
                known.snapshot.len()
            );
            metrics::set_known_good_epoch(known.epoch_id);
            self.state.write().known_good = Some(known);
        } else {
            info!("[checkpoint-guard] No persisted checkpoint state (first run)");
        }
        Ok(epoch)
    }

    async fn verify_on_chain(&self, delta: &CheckpointDelta) -> ChainVerdict {
        let budget = self.config.chain_lookup_timeout;

        for line in &delta.new_hashes {
            let lookup = self.chain.exists_at_height(&line.hash, line.height);
            match tokio::time::timeout(budget, lookup).await {
                Ok(Ok(true)) => {
                    debug!(
                        "[checkpoint-guard] Height {} hash {} confirmed on chain",
                        line.height, line.hash
                    );
                }
                Ok(Ok(false)) => return ChainVerdict::Missing { height: line.height },
                Ok(Err(e)) => return ChainVerdict::Unavailable(e),
                Err(_) => {
                    return ChainVerdict::Unavailable(GuardError::LookupTimeout {
                        height: line.height,
                        timeout_ms: budget.as_millis() as u64,
                    })
                }
            }
        }
        ChainVerdict::AllPresent
    }

    fn adopt(&self, snapshot: &CheckpointSnapshot, now: u64) {
        let known = LastKnownGood::adopt(snapshot.clone(), now);
        if let Err(e) = self.store.save(&known) {
            warn!(
                "[checkpoint-guard] Failed to persist known-good epoch {}: {}",
                known.epoch_id, e
            );
        }
        metrics::set_known_good_epoch(known.epoch_id);
        info!(
            "[checkpoint-guard] Updated known-good checkpoint: epoch {}",
            known.epoch_id
        );
        self.state.write().known_good = Some(known);
    }

    fn conclude(
        &self,
        now: u64,
        source: &str,
        outcome: ValidationOutcome,
        delta: &CheckpointDelta,
        error: Option<String>,
    ) {
        log_outcome(source, outcome, delta, error.as_deref());
        metrics::record_validation(outcome.label());

        let report = ValidationReport::new(now, source, outcome, delta, error);
        emit_audit(
            self.audit.as_ref(),
            AuditRecord::new(
                now,
                AuditComponent::CheckpointGuard,
                outcome.label(),
                audit_details(source, delta, report.error.as_deref()),
            ),
        );
        self.state.write().last_report = Some(report);
    }
}

fn audit_details(source: &str, delta: &CheckpointDelta, error: Option<&str>) -> String {
    let mut details = format!("source={} {}", source, delta.summary());
    for m in &delta.modified_hashes {
        details.push_str(&format!(
            "; height {} rewritten {} -> {}",
            m.height, m.old_hash, m.new_hash
        ));
    }
    if let Some(error) = error {
        details.push_str(&format!("; error: {}", error));
    }
    details
}

fn log_outcome(source: &str, outcome: ValidationOutcome, delta: &CheckpointDelta, err: Option<&str>) {
    if outcome.is_attack() {
        error!(
            "[checkpoint-guard] 🚨 {} from {}: {}",
            outcome.describe(),
            source,
            delta.summary()
        );
        for m in &delta.modified_hashes {
            error!(
                "[checkpoint-guard]   height {}: {} -> {}",
                m.height, m.old_hash, m.new_hash
            );
        }
    } else if outcome.is_error() {
        warn!(
            "[checkpoint-guard] {} from {}: {}",
            outcome.describe(),
            source,
            err.unwrap_or("no detail")
        );
    } else {
        info!(
            "[checkpoint-guard] ✅ {} from {}: {}",
            outcome.describe(),
            source,
            delta.summary()
        );
    }
}

fn log_advisories(delta: &CheckpointDelta) {
    use crate::domain::{EpochPacing, Staleness};

    match delta.pacing {
        Some(EpochPacing::TooFast) => warn!(
            "[checkpoint-guard] Epoch advanced too fast ({}s since last adoption)",
            delta.time_since_last_epoch
        ),
        Some(EpochPacing::Delayed) => warn!(
            "[checkpoint-guard] Epoch advanced late ({}s) - possible seed offline",
            delta.time_since_last_epoch
        ),
        _ => {}
    }

    match delta.staleness {
        Some(Staleness::Warning) => warn!(
            "[checkpoint-guard] Epoch unchanged for {} minutes",
            delta.time_since_last_epoch / 60
        ),
        Some(Staleness::Critical) => warn!(
            "[checkpoint-guard] CRITICAL: epoch unchanged for {} minutes",
            delta.time_since_last_epoch / 60
        ),
        Some(Staleness::Emergency) => warn!(
            "[checkpoint-guard] EMERGENCY: epoch unchanged for {} minutes - seed nodes may be offline",
            delta.time_since_last_epoch / 60
        ),
        _ => {}
    }
}

#[async_trait]
impl<C, K> CheckpointGuardApi for CheckpointValidator<C, K>
where
    C: ChainStateLookup + 'static,
    K: KnownGoodStore + 'static,
{
    async fn validate(
        &self,
        snapshot: &CheckpointSnapshot,
        source: &str,
    ) -> (ValidationOutcome, CheckpointDelta) {
        let _lane = self.lane.lock().await;
        let now = self.clock.now();
        let known = self.state.read().known_good.clone();

        debug!(
            "[checkpoint-guard] Validating epoch {} from {} ({} hashlines)",
            snapshot.epoch_id,
            source,
            snapshot.len()
        );

        let (outcome, delta, error) = match classify(known.as_ref(), snapshot, now, &self.config) {
            Classification::Decided {
                outcome,
                delta,
                change,
            } => {
                if change == StateChange::Adopt {
                    self.adopt(snapshot, now);
                }
                (outcome, delta, None)
            }
            Classification::VerifyNewHashes { delta } => match self.verify_on_chain(&delta).await {
                ChainVerdict::AllPresent => {
                    self.adopt(snapshot, now);
                    (ValidationOutcome::ValidNewEpoch, delta, None)
                }
                ChainVerdict::Missing { height } => (
                    ValidationOutcome::AttackInvalidHashes,
                    delta,
                    Some(format!("hash at height {} not on chain", height)),
                ),
                ChainVerdict::Unavailable(e) => {
                    metrics::record_lookup_failure();
                    (ValidationOutcome::ErrorBlockchainAccess, delta, Some(e.to_string()))
                }
            },
        };

        log_advisories(&delta);
        self.conclude(now, source, outcome, &delta, error);
        (outcome, delta)
    }

    async fn validate_raw(&self, bytes: &[u8], source: &str) -> (ValidationOutcome, CheckpointDelta) {
        match parse_checkpoint(bytes) {
            Ok(snapshot) => self.validate(&snapshot, source).await,
            Err(e) => {
                let _lane = self.lane.lock().await;
                let now = self.clock.now();
                let delta = CheckpointDelta::default();
                let outcome = ValidationOutcome::ErrorParseFailed;
                self.conclude(now, source, outcome, &delta, Some(e.to_string()));
                (outcome, delta)
            }
        }
    }

    fn known_good(&self) -> Option<LastKnownGood> {
        self.state.read().known_good.clone()
    }

    fn last_report(&self) -> Option<ValidationReport> {
        self.state.read().last_report.clone()
    }
}
