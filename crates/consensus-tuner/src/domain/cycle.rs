//! Tuning cycle state machine
//!
//! ```text
//! Idle -> Analyzing -> Deciding -> Validating -> Executing -> Idle
//!                                      |
//!                                      +-> Skipped -> Idle
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CyclePhase {
    #[default]
    Idle,
    Analyzing,
    Deciding,
    Validating,
    Executing,
    Skipped,
}

impl CyclePhase {
    pub fn can_transition_to(&self, next: CyclePhase) -> bool {
        use CyclePhase::*;
        matches!(
            (self, next),
            (Idle, Analyzing)
                | (Analyzing, Deciding)
                | (Deciding, Validating)
                | (Deciding, Skipped)
                | (Validating, Executing)
                | (Validating, Skipped)
                | (Executing, Idle)
                | (Skipped, Idle)
        )
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
