//! Checkpoint snapshot value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One downloaded checkpoint file, already parsed.
///
/// `epoch_id` is the generation timestamp of the epoch. Hashlines are keyed
/// by height, so uniqueness and ascending order hold by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointSnapshot {
    pub epoch_id: u64,
    pub generated_at: u64,
    pub hashlines: BTreeMap<u64, String>,
}

impl CheckpointSnapshot {
    pub fn new(epoch_id: u64, generated_at: u64, hashlines: BTreeMap<u64, String>) -> Self {
        Self {
            epoch_id,
            generated_at,
            hashlines,
        }
    }

    /// Build from `(height, hash)` pairs. A repeated height keeps the last hash.
    pub fn from_pairs<I, S>(epoch_id: u64, generated_at: u64, pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let hashlines = pairs.into_iter().map(|(h, s)| (h, s.into())).collect();
        Self::new(epoch_id, generated_at, hashlines)
    }

    /// Highest checkpointed height, 0 when empty.
    pub fn tip_height(&self) -> u64 {
        self.hashlines.keys().next_back().copied().unwrap_or(0)
    }

    pub fn hash_at(&self, height: u64) -> Option<&str> {
        self.hashlines.get(&height).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hashlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashlines.is_empty()
    }

    /// Copy of this snapshot with one more hashline (test and tooling helper).
    pub fn with_hashline(&self, height: u64, hash: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.hashlines.insert(height, hash.into());
        next
    }
}
