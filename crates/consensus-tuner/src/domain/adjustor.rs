//! Owner of the live consensus parameters.

use super::adjustment::{AdjustmentKind, ParameterAdjustment};
use super::parameters::{ConsensusParameters, Parameter, SafetyEnvelopes};
use crate::config::TunerConfig;
use crate::error::{TuningError, TuningResult};
use shared_types::{BoundedLog, TimeSource};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{info, warn};

/// Proposes, safety-checks and applies parameter adjustments.
///
/// Invariant: every bounded field of `current()` lies inside its envelope.
/// `apply` is the only mutator and re-validates before touching anything.
pub struct ParameterAdjustor {
    params: ConsensusParameters,
    envelopes: SafetyEnvelopes,
    adjustments: BoundedLog<ParameterAdjustment>,
    parameter_history: BoundedLog<ConsensusParameters>,
    applied_total: u64,
    clock: Arc<dyn TimeSource>,
}

impl ParameterAdjustor {
    pub fn new(config: &TunerConfig, envelopes: SafetyEnvelopes, clock: Arc<dyn TimeSource>) -> Self {
        let mut params = ConsensusParameters::default();
        params.timestamp = clock.now();

        let mut parameter_history = BoundedLog::new(config.parameter_history_cap);
        parameter_history.push(params.clone());

        Self {
            params,
            envelopes,
            adjustments: BoundedLog::new(config.adjustment_history_cap),
            parameter_history,
            applied_total: 0,
            clock,
        }
    }

    pub fn current(&self) -> &ConsensusParameters {
        &self.params
    }

    pub fn envelopes(&self) -> &SafetyEnvelopes {
        &self.envelopes
    }

    /// Build an adjustment from the current value. Mutates nothing.
    pub fn propose(
        &self,
        kind: AdjustmentKind,
        new_value: u32,
        reason: impl Into<String>,
    ) -> ParameterAdjustment {
        ParameterAdjustment {
            kind,
            old_value: self.params.get(kind.parameter()),
            new_value,
            confidence: kind.default_confidence(),
            reason: reason.into(),
            timestamp: self.clock.now(),
        }
    }

    /// Like [`propose`](Self::propose) with the direction inferred from the
    /// current value.
    pub fn propose_for(
        &self,
        parameter: Parameter,
        new_value: u32,
        reason: impl Into<String>,
    ) -> ParameterAdjustment {
        let kind = AdjustmentKind::for_change(parameter, self.params.get(parameter), new_value);
        self.propose(kind, new_value, reason)
    }

    /// Whether `adjustment` keeps its parameter inside the envelope.
    pub fn validate(&self, adjustment: &ParameterAdjustment) -> bool {
        self.envelopes
            .permits(adjustment.parameter(), adjustment.new_value)
    }

    /// Apply one adjustment. On error the live parameters are untouched.
    pub fn apply(&mut self, adjustment: &ParameterAdjustment) -> TuningResult<()> {
        let parameter = adjustment.parameter();
        if !self.validate(adjustment) {
            let (min, max) = self
                .envelopes
                .envelope(parameter)
                .map_or((0, u32::MAX), |env| (env.min, env.max));
            warn!(
                "[consensus-tuner] Rejected {}: {} outside [{}, {}]",
                adjustment.kind, adjustment.new_value, min, max
            );
            return Err(TuningError::OutOfEnvelope {
                parameter,
                value: adjustment.new_value,
                min,
                max,
            });
        }

        let now = self.clock.now();
        let old_value = self.params.get(parameter);
        self.params.set(parameter, adjustment.new_value);
        self.params.timestamp = now;
        self.params.last_reason = adjustment.reason.clone();

        self.adjustments.push(ParameterAdjustment {
            old_value,
            timestamp: now,
            ..adjustment.clone()
        });
        self.parameter_history.push(self.params.clone());
        self.applied_total += 1;

        info!(
            "[consensus-tuner] Applied {}: {} {} -> {} ({})",
            adjustment.kind, parameter, old_value, adjustment.new_value, adjustment.reason
        );
        Ok(())
    }

    /// Preview of the parameters suited to a health score in `[0, 1]`.
    /// Never applied; clamped to the envelopes.
    pub fn optimal_parameters(&self, health: f64) -> ConsensusParameters {
        let mut optimal = self.params.clone();
        let q = optimal.quorum_pct;
        let bt = optimal.block_time_s;
        let d = optimal.difficulty_multiplier;

        if health < 0.3 {
            optimal.quorum_pct = (q + 10).min(75);
            optimal.block_time_s = bt.saturating_sub(20).max(60);
            optimal.difficulty_multiplier = (d + 25).min(200);
        } else if health < 0.6 {
            optimal.quorum_pct = (q + 5).min(75);
            optimal.block_time_s = bt.saturating_sub(10).max(60);
            optimal.difficulty_multiplier = (d + 10).min(200);
        } else if health > 0.9 {
            optimal.quorum_pct = q.saturating_sub(5).max(50);
            optimal.block_time_s = (bt + 10).min(180);
            optimal.difficulty_multiplier = d.saturating_sub(10).max(100);
        }

        for parameter in [Parameter::Quorum, Parameter::BlockTime, Parameter::Difficulty] {
            if let Some(env) = self.envelopes.envelope(parameter) {
                let value = optimal.get(parameter).clamp(env.min, env.max);
                optimal.set(parameter, value);
            }
        }
        optimal.last_reason = format!("optimal for health {:.2}", health);
        optimal
    }

    /// Applied adjustments, oldest first.
    pub fn adjustment_history(&self) -> Vec<ParameterAdjustment> {
        self.adjustments.to_vec()
    }

    /// Parameter sets after each applied adjustment, oldest first. Starts with
    /// the initial set.
    pub fn parameter_history(&self) -> Vec<ConsensusParameters> {
        self.parameter_history.to_vec()
    }

    pub fn applied_total(&self) -> u64 {
        self.applied_total
    }

    /// Replace live state with persisted state. Refused if the parameters
    /// fall outside the envelopes.
    pub fn restore(
        &mut self,
        params: ConsensusParameters,
        adjustments: Vec<ParameterAdjustment>,
        parameter_history: Vec<ConsensusParameters>,
    ) -> TuningResult<()> {
        self.envelopes.check(&params)?;

        self.applied_total = adjustments.len() as u64;
        let mut restored_adjustments = BoundedLog::new(self.adjustments.capacity());
        for adjustment in adjustments {
            restored_adjustments.push(adjustment);
        }
        let mut restored_history = BoundedLog::new(self.parameter_history.capacity());
        for entry in parameter_history {
            restored_history.push(entry);
        }
        if restored_history.is_empty() {
            restored_history.push(params.clone());
        }

        self.params = params;
        self.adjustments = restored_adjustments;
        self.parameter_history = restored_history;
        Ok(())
    }

    pub fn report(&self) -> String {
        let p = &self.params;
        let mut out = String::new();
        let _ = writeln!(out, "Consensus Parameters");
        let _ = writeln!(out, "  Quorum:            {}%", p.quorum_pct);
        let _ = writeln!(out, "  Block time:        {}s", p.block_time_s);
        let _ = writeln!(out, "  Difficulty:        {}%", p.difficulty_multiplier);
        let _ = writeln!(out, "  Tx pool size:      {}", p.tx_pool_size);
        let _ = writeln!(out, "  Block size limit:  {}", p.block_size_limit);
        let _ = writeln!(out, "  Peer timeout:      {}s", p.peer_timeout_s);
        let _ = writeln!(out, "  Last change:       {}", p.last_reason);
        let _ = writeln!(out, "  Total adjustments: {}", self.applied_total);
        out
    }
}
