//! Consensus tuning controller
//!
//! One cycle walks `Idle -> Analyzing -> Deciding -> (Validating ->
//! Executing | Skipped) -> Idle` under the state mutex, so cycles never
//! overlap whether they come from the scheduler or from `force_cycle`.

use crate::config::TunerConfig;
use crate::domain::{
    escalation, validate_decision, ConsensusParameters, CyclePhase, ParameterAdjustment,
    ParameterAdjustor, SafetyEnvelopes, TuningDecision, TuningSnapshot,
};
use crate::error::{TuningError, TuningResult};
use crate::metrics;
use crate::ports::inbound::ConsensusTuningApi;
use crate::ports::outbound::{HealthSource, TuningStateStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{emit_audit, AuditComponent, AuditRecord, AuditSink, BoundedLog, TimeSource};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct TunerState {
    adjustor: ParameterAdjustor,
    decisions: BoundedLog<TuningDecision>,
    phase: CyclePhase,
    cycles: u64,
}

impl TunerState {
    fn enter(&mut self, next: CyclePhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal cycle transition {} -> {}",
            self.phase,
            next
        );
        self.phase = next;
    }

    fn snapshot(&self) -> TuningSnapshot {
        TuningSnapshot {
            parameters: self.adjustor.current().clone(),
            adjustment_history: self.adjustor.adjustment_history(),
            parameter_history: self.adjustor.parameter_history(),
            decision_history: self.decisions.to_vec(),
            cycles: self.cycles,
        }
    }
}

/// Closed-loop controller: diagnose, propose, validate, execute.
pub struct ConsensusTuningController<H, S>
where
    H: HealthSource,
    S: TuningStateStore,
{
    config: TunerConfig,
    auto_execute: AtomicBool,
    state: Arc<Mutex<TunerState>>,
    /// Cycle number of the newest snapshot written to the store
    persisted_cycle: Arc<Mutex<u64>>,
    health: Arc<H>,
    store: Arc<S>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn TimeSource>,
}

impl<H, S> ConsensusTuningController<H, S>
where
    H: HealthSource,
    S: TuningStateStore,
{
    pub fn new(
        config: TunerConfig,
        envelopes: SafetyEnvelopes,
        health: Arc<H>,
        store: Arc<S>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        let adjustor = ParameterAdjustor::new(&config, envelopes, clock.clone());
        let state = TunerState {
            adjustor,
            decisions: BoundedLog::new(config.decision_history_cap),
            phase: CyclePhase::Idle,
            cycles: 0,
        };
        let params = state.adjustor.current();
        metrics::set_parameters(params.quorum_pct, params.block_time_s, params.difficulty_multiplier);

        Self {
            auto_execute: AtomicBool::new(config.auto_execute),
            config,
            state: Arc::new(Mutex::new(state)),
            persisted_cycle: Arc::new(Mutex::new(0)),
            health,
            store,
            audit,
            clock,
        }
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    /// Load persisted parameters and histories. Returns the restored cycle
    /// count, or `None` on first run.
    pub fn restore(&self) -> TuningResult<Option<u64>> {
        let Some(snapshot) = self.store.load()? else {
            info!("[consensus-tuner] No persisted tuning state (first run)");
            return Ok(None);
        };

        let mut state = self.state.lock();
        state.adjustor.restore(
            snapshot.parameters,
            snapshot.adjustment_history,
            snapshot.parameter_history,
        )?;
        let mut decisions = BoundedLog::new(self.config.decision_history_cap);
        for decision in snapshot.decision_history {
            decisions.push(decision);
        }
        state.decisions = decisions;
        state.cycles = snapshot.cycles;

        let params = state.adjustor.current();
        metrics::set_parameters(params.quorum_pct, params.block_time_s, params.difficulty_multiplier);
        info!(
            "[consensus-tuner] Restored tuning state: quorum {}%, block time {}s, difficulty {}% after {} cycles",
            params.quorum_pct, params.block_time_s, params.difficulty_multiplier, snapshot.cycles
        );
        Ok(Some(snapshot.cycles))
    }

    /// Write the current state to the store.
    pub fn persist(&self) -> TuningResult<()> {
        let mut persisted = self.persisted_cycle.lock();
        let snapshot = self.state.lock().snapshot();
        self.store.save(&snapshot)?;
        *persisted = (*persisted).max(snapshot.cycles);
        Ok(())
    }

    pub fn snapshot(&self) -> TuningSnapshot {
        self.state.lock().snapshot()
    }

    pub fn cycles(&self) -> u64 {
        self.state.lock().cycles
    }

    pub fn phase(&self) -> CyclePhase {
        self.state.lock().phase
    }

    /// Preview of the parameters the adjustor would choose for `health`.
    pub fn optimal_parameters(&self, health: f64) -> ConsensusParameters {
        self.state.lock().adjustor.optimal_parameters(health)
    }

    /// Run one complete cycle. Blocks while another cycle holds the state,
    /// and while the store writes the result.
    pub fn run_cycle(&self) -> TuningDecision {
        let (decision, pending) = self.cycle();
        if let Some(snapshot) = pending {
            save_if_newer(self.store.as_ref(), &self.persisted_cycle, &snapshot);
        }
        decision
    }

    /// One cycle without the store write. Returns the snapshot to persist
    /// when any adjustment was applied.
    fn cycle(&self) -> (TuningDecision, Option<TuningSnapshot>) {
        let mut state = self.state.lock();

        state.enter(CyclePhase::Analyzing);
        let (health, condition) = self.health.assess();
        metrics::record_cycle(condition.label());

        state.enter(CyclePhase::Deciding);
        let now = self.clock.now();
        state.cycles += 1;
        let mut decision = TuningDecision {
            id: TuningDecision::id_for_cycle(state.cycles),
            condition,
            confidence: health.trust_score,
            adjustments: escalation(condition, state.adjustor.current(), now),
            timestamp: now,
            executed: false,
            rejection: None,
        };
        debug!(
            "[consensus-tuner] {}: condition {}, trust {:.2}, {} proposals",
            decision.id,
            condition,
            decision.confidence,
            decision.adjustments.len()
        );

        let mut applied_any = false;
        if decision.adjustments.is_empty() {
            state.enter(CyclePhase::Skipped);
        } else {
            state.enter(CyclePhase::Validating);
            match validate_decision(
                &decision,
                self.config.max_adjustments_per_decision,
                self.config.min_confidence,
            ) {
                Err(reason) => {
                    metrics::record_decision_rejected(reason.label());
                    let err = TuningError::DecisionRejected {
                        id: decision.id.clone(),
                        reason: reason.clone(),
                    };
                    warn!("[consensus-tuner] {}", err);
                    decision.rejection = Some(reason);
                    state.enter(CyclePhase::Skipped);
                }
                Ok(()) if !self.auto_execute.load(Ordering::SeqCst) => {
                    info!(
                        "[consensus-tuner] {} proposed {} adjustments (auto-execute off, not applied)",
                        decision.id,
                        decision.adjustments.len()
                    );
                    state.enter(CyclePhase::Skipped);
                }
                Ok(()) => {
                    state.enter(CyclePhase::Executing);
                    let mut failures = 0usize;
                    for adjustment in &decision.adjustments {
                        match state.adjustor.apply(adjustment) {
                            Ok(()) => {
                                applied_any = true;
                                metrics::record_adjustment_applied();
                            }
                            Err(e) => {
                                failures += 1;
                                metrics::record_adjustment_rejected();
                                warn!("[consensus-tuner] {}: adjustment failed: {}", decision.id, e);
                            }
                        }
                    }
                    decision.executed = failures == 0;
                }
            }
        }

        if applied_any {
            let params = state.adjustor.current();
            metrics::set_parameters(params.quorum_pct, params.block_time_s, params.difficulty_multiplier);
        }
        log_decision(&decision);
        state.decisions.push(decision.clone());
        state.enter(CyclePhase::Idle);

        let pending = applied_any.then(|| state.snapshot());
        drop(state);

        emit_audit(
            self.audit.as_ref(),
            AuditRecord::new(
                now,
                AuditComponent::ConsensusTuner,
                decision.id.clone(),
                audit_details(&decision),
            ),
        );
        (decision, pending)
    }
}

/// Write `snapshot` unless a later cycle already reached the store.
fn save_if_newer<S: TuningStateStore + ?Sized>(
    store: &S,
    persisted_cycle: &Mutex<u64>,
    snapshot: &TuningSnapshot,
) {
    let mut persisted = persisted_cycle.lock();
    if snapshot.cycles <= *persisted {
        debug!(
            "[consensus-tuner] Skipping stale snapshot from cycle {} (store has {})",
            snapshot.cycles, *persisted
        );
        return;
    }
    match store.save(snapshot) {
        Ok(()) => *persisted = snapshot.cycles,
        Err(e) => warn!("[consensus-tuner] Failed to persist tuning state: {}", e),
    }
}

fn log_decision(decision: &TuningDecision) {
    if decision.executed {
        info!(
            "[consensus-tuner] {} executed: {} adjustments under {} conditions",
            decision.id,
            decision.adjustments.len(),
            decision.condition
        );
        for adjustment in &decision.adjustments {
            info!("[consensus-tuner]   {}", adjustment);
        }
    } else if decision.adjustments.is_empty() {
        debug!(
            "[consensus-tuner] {}: no adjustments needed ({})",
            decision.id, decision.condition
        );
    }
}

fn audit_details(decision: &TuningDecision) -> String {
    let mut details = format!(
        "condition={} confidence={:.2} adjustments={} executed={}",
        decision.condition,
        decision.confidence,
        decision.adjustments.len(),
        decision.executed
    );
    for adjustment in &decision.adjustments {
        let _ = write!(details, "; {}", adjustment);
    }
    if let Some(reason) = &decision.rejection {
        let _ = write!(details, "; rejected: {}", reason);
    }
    details
}

#[async_trait]
impl<H, S> ConsensusTuningApi for ConsensusTuningController<H, S>
where
    H: HealthSource + 'static,
    S: TuningStateStore + 'static,
{
    /// The store write runs on the blocking pool.
    async fn force_cycle(&self) -> TuningDecision {
        let (decision, pending) = self.cycle();
        if let Some(snapshot) = pending {
            let store = Arc::clone(&self.store);
            let persisted_cycle = Arc::clone(&self.persisted_cycle);
            let saved = tokio::task::spawn_blocking(move || {
                save_if_newer(store.as_ref(), &persisted_cycle, &snapshot)
            })
            .await;
            if let Err(e) = saved {
                warn!("[consensus-tuner] Tuning state writer failed: {}", e);
            }
        }
        decision
    }

    fn current_parameters(&self) -> ConsensusParameters {
        self.state.lock().adjustor.current().clone()
    }

    fn last_decision(&self) -> Option<TuningDecision> {
        self.state.lock().decisions.last().cloned()
    }

    fn decision_history(&self) -> Vec<TuningDecision> {
        self.state.lock().decisions.to_vec()
    }

    fn adjustment_history(&self) -> Vec<ParameterAdjustment> {
        self.state.lock().adjustor.adjustment_history()
    }

    fn set_auto_execute(&self, enabled: bool) {
        self.auto_execute.store(enabled, Ordering::SeqCst);
        info!(
            "[consensus-tuner] Auto-execute {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    fn auto_execute(&self) -> bool {
        self.auto_execute.load(Ordering::SeqCst)
    }

    fn tuning_report(&self) -> String {
        let state = self.state.lock();
        let mut out = String::new();
        let _ = writeln!(out, "Consensus Tuning Report");
        let _ = writeln!(out, "  Total decisions:  {}", state.cycles);
        let _ = writeln!(
            out,
            "  Auto-execute:     {}",
            if self.auto_execute.load(Ordering::SeqCst) { "on" } else { "off" }
        );
        let _ = writeln!(out, "  Interval:         {}s", self.config.interval.as_secs());
        if let Some(last) = state.decisions.last() {
            let _ = writeln!(out, "  Last decision:    {}", last.id);
            let _ = writeln!(out, "    Condition:      {}", last.condition);
            let _ = writeln!(out, "    Adjustments:    {}", last.adjustments.len());
            let _ = writeln!(out, "    Executed:       {}", if last.executed { "yes" } else { "no" });
            if let Some(reason) = &last.rejection {
                let _ = writeln!(out, "    Rejected:       {}", reason);
            }
        }
        out.push('\n');
        out.push_str(&state.adjustor.report());
        out
    }
}
