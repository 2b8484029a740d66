//! Consensus parameters and their safety envelopes.

use crate::error::{TuningError, TuningResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The live consensus-adjacent parameter set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParameters {
    /// Percentage of validators required, within `[50, 75]`
    pub quorum_pct: u32,
    /// Target block interval, within `[60, 180]`
    pub block_time_s: u32,
    /// Percent of base difficulty, within `[50, 200]`
    pub difficulty_multiplier: u32,
    pub tx_pool_size: u32,
    pub block_size_limit: u32,
    pub peer_timeout_s: u32,
    pub timestamp: u64,
    pub last_reason: String,
}

impl Default for ConsensusParameters {
    fn default() -> Self {
        Self {
            quorum_pct: 51,
            block_time_s: 120,
            difficulty_multiplier: 100,
            tx_pool_size: 10_000,
            block_size_limit: 1_000_000,
            peer_timeout_s: 30,
            timestamp: 0,
            last_reason: "initial parameters".to_string(),
        }
    }
}

impl ConsensusParameters {
    pub fn get(&self, parameter: Parameter) -> u32 {
        match parameter {
            Parameter::Quorum => self.quorum_pct,
            Parameter::BlockTime => self.block_time_s,
            Parameter::Difficulty => self.difficulty_multiplier,
            Parameter::TxPoolSize => self.tx_pool_size,
            Parameter::BlockSize => self.block_size_limit,
            Parameter::PeerTimeout => self.peer_timeout_s,
        }
    }

    pub(crate) fn set(&mut self, parameter: Parameter, value: u32) {
        match parameter {
            Parameter::Quorum => self.quorum_pct = value,
            Parameter::BlockTime => self.block_time_s = value,
            Parameter::Difficulty => self.difficulty_multiplier = value,
            Parameter::TxPoolSize => self.tx_pool_size = value,
            Parameter::BlockSize => self.block_size_limit = value,
            Parameter::PeerTimeout => self.peer_timeout_s = value,
        }
    }
}

/// One field of [`ConsensusParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Quorum,
    BlockTime,
    Difficulty,
    TxPoolSize,
    BlockSize,
    PeerTimeout,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::Quorum,
        Parameter::BlockTime,
        Parameter::Difficulty,
        Parameter::TxPoolSize,
        Parameter::BlockSize,
        Parameter::PeerTimeout,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Quorum => "quorum_pct",
            Parameter::BlockTime => "block_time_s",
            Parameter::Difficulty => "difficulty_multiplier",
            Parameter::TxPoolSize => "tx_pool_size",
            Parameter::BlockSize => "block_size_limit",
            Parameter::PeerTimeout => "peer_timeout_s",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive `[min, max]` bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: u32,
    pub max: u32,
}

impl Envelope {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn within(&self, outer: &Envelope) -> bool {
        self.min <= self.max && self.min >= outer.min && self.max <= outer.max
    }
}

/// Hard limits: quorum, block time, difficulty.
pub const HARD_LIMITS: SafetyEnvelopes = SafetyEnvelopes {
    quorum: Envelope::new(50, 75),
    block_time: Envelope::new(60, 180),
    difficulty: Envelope::new(50, 200),
};

/// Envelopes for the bounded parameters.
///
/// Pool size, block size and peer timeout are unbounded here and every value
/// is accepted for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SafetyEnvelopes {
    quorum: Envelope,
    block_time: Envelope,
    difficulty: Envelope,
}

impl Default for SafetyEnvelopes {
    fn default() -> Self {
        HARD_LIMITS
    }
}

impl SafetyEnvelopes {
    /// Narrower envelopes. Anything reaching outside the hard limits, or
    /// empty, is refused.
    pub fn narrowed(quorum: Envelope, block_time: Envelope, difficulty: Envelope) -> TuningResult<Self> {
        for (parameter, env, hard) in [
            (Parameter::Quorum, quorum, HARD_LIMITS.quorum),
            (Parameter::BlockTime, block_time, HARD_LIMITS.block_time),
            (Parameter::Difficulty, difficulty, HARD_LIMITS.difficulty),
        ] {
            if !env.within(&hard) {
                return Err(TuningError::InvalidEnvelope {
                    parameter,
                    min: env.min,
                    max: env.max,
                });
            }
        }
        Ok(Self {
            quorum,
            block_time,
            difficulty,
        })
    }

    pub fn envelope(&self, parameter: Parameter) -> Option<Envelope> {
        match parameter {
            Parameter::Quorum => Some(self.quorum),
            Parameter::BlockTime => Some(self.block_time),
            Parameter::Difficulty => Some(self.difficulty),
            Parameter::TxPoolSize | Parameter::BlockSize | Parameter::PeerTimeout => None,
        }
    }

    pub fn permits(&self, parameter: Parameter, value: u32) -> bool {
        self.envelope(parameter).map_or(true, |env| env.contains(value))
    }

    /// First bounded field of `params` outside its envelope.
    pub fn check(&self, params: &ConsensusParameters) -> TuningResult<()> {
        for parameter in Parameter::ALL {
            let value = params.get(parameter);
            if let Some(env) = self.envelope(parameter) {
                if !env.contains(value) {
                    return Err(TuningError::OutOfEnvelope {
                        parameter,
                        value,
                        min: env.min,
                        max: env.max,
                    });
                }
            }
        }
        Ok(())
    }
}
