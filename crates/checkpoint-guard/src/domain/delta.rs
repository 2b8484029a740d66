//! Difference between the known-good snapshot and an incoming one.

use crate::domain::snapshot::CheckpointSnapshot;
use crate::domain::staleness::{EpochPacing, Staleness};
use serde::{Deserialize, Serialize};

/// A `(height, hash)` checkpoint entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashLine {
    pub height: u64,
    pub hash: String,
}

/// An existing height whose hash was rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedHash {
    pub height: u64,
    pub old_hash: String,
    pub new_hash: String,
}

/// Explanation attached to every validation verdict.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointDelta {
    pub new_hashes: Vec<HashLine>,
    pub modified_hashes: Vec<ModifiedHash>,
    pub removed_hashes: Vec<HashLine>,
    pub previous_epoch_id: u64,
    pub current_epoch_id: u64,
    pub previous_height: u64,
    pub current_height: u64,
    /// Seconds since the known-good snapshot was adopted.
    pub time_since_last_epoch: u64,
    /// Set when the epoch did not move.
    pub staleness: Option<Staleness>,
    /// Set when the epoch advanced.
    pub pacing: Option<EpochPacing>,
}

impl CheckpointDelta {
    /// Delta carrying only the incoming snapshot's identity (no comparison made).
    pub fn for_snapshot(snapshot: &CheckpointSnapshot) -> Self {
        Self {
            current_epoch_id: snapshot.epoch_id,
            current_height: snapshot.tip_height(),
            ..Self::default()
        }
    }

    /// Compare two snapshots height by height.
    pub fn compute(previous: &CheckpointSnapshot, current: &CheckpointSnapshot, elapsed: u64) -> Self {
        let mut delta = Self {
            previous_epoch_id: previous.epoch_id,
            current_epoch_id: current.epoch_id,
            previous_height: previous.tip_height(),
            current_height: current.tip_height(),
            time_since_last_epoch: elapsed,
            ..Self::default()
        };

        for (height, hash) in &current.hashlines {
            match previous.hashlines.get(height) {
                None => delta.new_hashes.push(HashLine {
                    height: *height,
                    hash: hash.clone(),
                }),
                Some(old) if old != hash => delta.modified_hashes.push(ModifiedHash {
                    height: *height,
                    old_hash: old.clone(),
                    new_hash: hash.clone(),
                }),
                Some(_) => {}
            }
        }

        for (height, hash) in &previous.hashlines {
            if !current.hashlines.contains_key(height) {
                delta.removed_hashes.push(HashLine {
                    height: *height,
                    hash: hash.clone(),
                });
            }
        }

        delta
    }

    pub fn has_changes(&self) -> bool {
        !(self.new_hashes.is_empty()
            && self.modified_hashes.is_empty()
            && self.removed_hashes.is_empty())
    }

    /// One-line summary for logs and audit records.
    pub fn summary(&self) -> String {
        format!(
            "epoch {} -> {}, height {} -> {}, new={} modified={} removed={}, elapsed={}s",
            self.previous_epoch_id,
            self.current_epoch_id,
            self.previous_height,
            self.current_height,
            self.new_hashes.len(),
            self.modified_hashes.len(),
            self.removed_hashes.len(),
            self.time_since_last_epoch
        )
    }
}
