//! Tuning decisions and batch validation.

use super::adjustment::ParameterAdjustment;
use super::health::NetworkCondition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a whole batch was refused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DecisionRejection {
    TooManyAdjustments { count: usize, max: usize },
    LowConfidence { confidence: f64, min: f64 },
}

impl DecisionRejection {
    pub fn label(&self) -> &'static str {
        match self {
            DecisionRejection::TooManyAdjustments { .. } => "too_many_adjustments",
            DecisionRejection::LowConfidence { .. } => "low_confidence",
        }
    }
}

impl fmt::Display for DecisionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionRejection::TooManyAdjustments { count, max } => {
                write!(f, "{} adjustments exceeds the limit of {}", count, max)
            }
            DecisionRejection::LowConfidence { confidence, min } => {
                write!(f, "confidence {:.2} below minimum {:.2}", confidence, min)
            }
        }
    }
}

/// One tuning cycle's output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TuningDecision {
    /// `tuning_<cycle>`
    pub id: String,
    pub condition: NetworkCondition,
    /// Trust score at decision time
    pub confidence: f64,
    pub adjustments: Vec<ParameterAdjustment>,
    pub timestamp: u64,
    /// True only if every adjustment applied
    pub executed: bool,
    #[serde(default)]
    pub rejection: Option<DecisionRejection>,
}

impl TuningDecision {
    pub fn id_for_cycle(cycle: u64) -> String {
        format!("tuning_{}", cycle)
    }
}

/// Batch gate: size cap first, then confidence for non-empty batches.
pub fn validate_decision(
    decision: &TuningDecision,
    max_adjustments: usize,
    min_confidence: f64,
) -> Result<(), DecisionRejection> {
    let count = decision.adjustments.len();
    if count > max_adjustments {
        return Err(DecisionRejection::TooManyAdjustments {
            count,
            max: max_adjustments,
        });
    }
    if count > 0 && (decision.confidence.is_nan() || decision.confidence < min_confidence) {
        return Err(DecisionRejection::LowConfidence {
            confidence: decision.confidence,
            min: min_confidence,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adjustment::AdjustmentKind;
    use proptest::prelude::*;

    fn decision(count: usize, confidence: f64) -> TuningDecision {
        let adj = ParameterAdjustment {
            kind: AdjustmentKind::QuorumIncrease,
            old_value: 51,
            new_value: 54,
            confidence: 0.75,
            reason: "test".into(),
            timestamp: 0,
        };
        TuningDecision {
            id: TuningDecision::id_for_cycle(1),
            condition: NetworkCondition::Degraded,
            confidence,
            adjustments: vec![adj; count],
            timestamp: 0,
            executed: false,
            rejection: None,
        }
    }

    #[test]
    fn test_id_format() {
        assert_eq!(TuningDecision::id_for_cycle(42), "tuning_42");
    }

    #[test]
    fn test_empty_low_confidence_batch_passes() {
        assert!(validate_decision(&decision(0, 0.1), 5, 0.3).is_ok());
    }

    #[test]
    fn test_low_confidence_rejected() {
        assert!(matches!(
            validate_decision(&decision(1, 0.2), 5, 0.3),
            Err(DecisionRejection::LowConfidence { .. })
        ));
        assert!(validate_decision(&decision(1, 0.3), 5, 0.3).is_ok());
        assert!(validate_decision(&decision(1, f64::NAN), 5, 0.3).is_err());
    }

    #[test]
    fn test_oversized_batch_rejected() {
        assert_eq!(
            validate_decision(&decision(6, 0.9), 5, 0.3),
            Err(DecisionRejection::TooManyAdjustments { count: 6, max: 5 })
        );
    }

    proptest! {
        #[test]
        fn prop_accepted_batches_respect_cap(count in 0usize..12, confidence in 0.0f64..1.0) {
            if validate_decision(&decision(count, confidence), 5, 0.3).is_ok() {
                prop_assert!(count <= 5);
                prop_assert!(count == 0 || confidence >= 0.3);
            }
        }
    }
}
