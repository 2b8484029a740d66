//! Last known-good checkpoint.

use crate::domain::snapshot::CheckpointSnapshot;
use serde::{Deserialize, Serialize};

/// The comparison baseline for the next validation.
///
/// Replaced wholesale after a `Valid*` verdict that adopts a snapshot. Never
/// rolled back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastKnownGood {
    pub snapshot: CheckpointSnapshot,
    pub epoch_id: u64,
    /// Local wall-clock time of adoption
    pub observed_at: u64,
}

impl LastKnownGood {
    pub fn adopt(snapshot: CheckpointSnapshot, observed_at: u64) -> Self {
        Self {
            epoch_id: snapshot.epoch_id,
            snapshot,
            observed_at,
        }
    }
}
