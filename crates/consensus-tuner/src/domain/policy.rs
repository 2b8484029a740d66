//! Escalation table: network condition to proposed adjustments.

use super::adjustment::{AdjustmentKind, ParameterAdjustment};
use super::health::NetworkCondition;
use super::parameters::ConsensusParameters;

/// Proposals for `condition` against the live parameters, in table order.
///
/// Optimal proposes nothing. Every target lies inside the hard limits for any
/// parameters that do.
pub fn escalation(
    condition: NetworkCondition,
    params: &ConsensusParameters,
    now: u64,
) -> Vec<ParameterAdjustment> {
    let q = params.quorum_pct;
    let bt = params.block_time_s;
    let d = params.difficulty_multiplier;

    let mut out = Vec::new();
    let mut push = |kind: AdjustmentKind, old: u32, new: u32, confidence: f64, reason: &str| {
        out.push(
            ParameterAdjustment {
                kind,
                old_value: old,
                new_value: new,
                confidence,
                reason: reason.to_string(),
                timestamp: now,
            }
            .with_confidence(confidence),
        );
    };

    match condition {
        NetworkCondition::Optimal => {}
        NetworkCondition::Degraded => {
            if q < 60 {
                push(
                    AdjustmentKind::QuorumIncrease,
                    q,
                    q + 3,
                    0.75,
                    "Network degraded: modest quorum increase",
                );
            }
        }
        NetworkCondition::Stressed => {
            if q < 65 {
                push(
                    AdjustmentKind::QuorumIncrease,
                    q,
                    (q + 8).min(65),
                    0.80,
                    "Network stressed: raising quorum for safety",
                );
            }
            if bt > 80 {
                push(
                    AdjustmentKind::BlockTimeDecrease,
                    bt,
                    bt.saturating_sub(20).max(60),
                    0.70,
                    "Network stressed: shortening block time",
                );
            }
            if d < 150 {
                push(
                    AdjustmentKind::DifficultyIncrease,
                    d,
                    (d + 15).min(150),
                    0.65,
                    "Network stressed: raising difficulty",
                );
            }
        }
        NetworkCondition::Critical => {
            if q < 75 {
                push(
                    AdjustmentKind::QuorumIncrease,
                    q,
                    75,
                    0.95,
                    "CRITICAL: maximum quorum for network protection",
                );
            }
            if bt > 60 {
                push(
                    AdjustmentKind::BlockTimeDecrease,
                    bt,
                    60,
                    0.90,
                    "CRITICAL: minimum block time for rapid finality",
                );
            }
            if d < 200 {
                push(
                    AdjustmentKind::DifficultyIncrease,
                    d,
                    200,
                    0.85,
                    "CRITICAL: maximum difficulty against attack",
                );
            }
        }
    }
    out
}
