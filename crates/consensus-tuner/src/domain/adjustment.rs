//! Parameter adjustments

use super::parameters::Parameter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an adjustment changes, and in which direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentKind {
    QuorumIncrease,
    QuorumDecrease,
    BlockTimeIncrease,
    BlockTimeDecrease,
    DifficultyIncrease,
    DifficultyDecrease,
    TxPoolIncrease,
    TxPoolDecrease,
    BlockSizeAdjust,
    PeerTimeoutAdjust,
}

impl AdjustmentKind {
    pub fn parameter(&self) -> Parameter {
        match self {
            AdjustmentKind::QuorumIncrease | AdjustmentKind::QuorumDecrease => Parameter::Quorum,
            AdjustmentKind::BlockTimeIncrease | AdjustmentKind::BlockTimeDecrease => {
                Parameter::BlockTime
            }
            AdjustmentKind::DifficultyIncrease | AdjustmentKind::DifficultyDecrease => {
                Parameter::Difficulty
            }
            AdjustmentKind::TxPoolIncrease | AdjustmentKind::TxPoolDecrease => {
                Parameter::TxPoolSize
            }
            AdjustmentKind::BlockSizeAdjust => Parameter::BlockSize,
            AdjustmentKind::PeerTimeoutAdjust => Parameter::PeerTimeout,
        }
    }

    /// Kind moving `parameter` from `current` to `target`. A non-increase is
    /// treated as a decrease.
    pub fn for_change(parameter: Parameter, current: u32, target: u32) -> Self {
        let up = target > current;
        match parameter {
            Parameter::Quorum if up => AdjustmentKind::QuorumIncrease,
            Parameter::Quorum => AdjustmentKind::QuorumDecrease,
            Parameter::BlockTime if up => AdjustmentKind::BlockTimeIncrease,
            Parameter::BlockTime => AdjustmentKind::BlockTimeDecrease,
            Parameter::Difficulty if up => AdjustmentKind::DifficultyIncrease,
            Parameter::Difficulty => AdjustmentKind::DifficultyDecrease,
            Parameter::TxPoolSize if up => AdjustmentKind::TxPoolIncrease,
            Parameter::TxPoolSize => AdjustmentKind::TxPoolDecrease,
            Parameter::BlockSize => AdjustmentKind::BlockSizeAdjust,
            Parameter::PeerTimeout => AdjustmentKind::PeerTimeoutAdjust,
        }
    }

    /// Confidence attached to a proposal when the caller gives none.
    pub fn default_confidence(&self) -> f64 {
        match self.parameter() {
            Parameter::Quorum => 0.85,
            Parameter::BlockTime => 0.80,
            Parameter::Difficulty => 0.75,
            Parameter::TxPoolSize => 0.70,
            Parameter::BlockSize => 0.65,
            Parameter::PeerTimeout => 0.60,
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdjustmentKind::QuorumIncrease => "QUORUM_INCREASE",
            AdjustmentKind::QuorumDecrease => "QUORUM_DECREASE",
            AdjustmentKind::BlockTimeIncrease => "BLOCK_TIME_INCREASE",
            AdjustmentKind::BlockTimeDecrease => "BLOCK_TIME_DECREASE",
            AdjustmentKind::DifficultyIncrease => "DIFFICULTY_INCREASE",
            AdjustmentKind::DifficultyDecrease => "DIFFICULTY_DECREASE",
            AdjustmentKind::TxPoolIncrease => "TX_POOL_INCREASE",
            AdjustmentKind::TxPoolDecrease => "TX_POOL_DECREASE",
            AdjustmentKind::BlockSizeAdjust => "BLOCK_SIZE_ADJUST",
            AdjustmentKind::PeerTimeoutAdjust => "PEER_TIMEOUT_ADJUST",
        };
        f.write_str(label)
    }
}

/// A proposed or applied change to one parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterAdjustment {
    pub kind: AdjustmentKind,
    pub old_value: u32,
    pub new_value: u32,
    /// In `[0, 1]`
    pub confidence: f64,
    pub reason: String,
    pub timestamp: u64,
}

impl ParameterAdjustment {
    pub fn parameter(&self) -> Parameter {
        self.kind.parameter()
    }

    /// Replace the confidence, clamped to `[0, 1]` (NaN becomes 0).
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }
}

impl fmt::Display for ParameterAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} ({:.2}): {}",
            self.kind, self.old_value, self.new_value, self.confidence, self.reason
        )
    }
}
