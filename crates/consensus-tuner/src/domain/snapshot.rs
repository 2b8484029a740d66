//! Persisted form of the tuner's state.

use super::adjustment::ParameterAdjustment;
use super::decision::TuningDecision;
use super::parameters::ConsensusParameters;
use serde::{Deserialize, Serialize};

/// Everything needed to resume tuning after a restart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TuningSnapshot {
    pub parameters: ConsensusParameters,
    #[serde(default)]
    pub adjustment_history: Vec<ParameterAdjustment>,
    #[serde(default)]
    pub parameter_history: Vec<ConsensusParameters>,
    #[serde(default)]
    pub decision_history: Vec<TuningDecision>,
    /// Cycles completed so far; the next decision id continues from here
    #[serde(default)]
    pub cycles: u64,
}
