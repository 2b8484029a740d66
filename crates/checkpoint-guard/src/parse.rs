//! Checkpoint document codec.
//!
//! Wire format published by the seed nodes:
//!
//! ```json
//! {
//!   "epoch_id": 1700000000,
//!   "generated_at_ts": 1700000000,
//!   "hashlines": [ { "height": 1000, "hash": "9f2c..." } ]
//! }
//! ```
//!
//! Unknown top-level fields (network name, interval) are ignored.

use crate::domain::{CheckpointSnapshot, HashLine};
use crate::error::{GuardError, GuardResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
struct CheckpointDocument {
    epoch_id: u64,
    generated_at_ts: u64,
    #[serde(default)]
    hashlines: Vec<HashLine>,
}

/// Decode a checkpoint document.
///
/// Rejects duplicate heights and empty hashes: either would make the
/// height→hash map ambiguous.
pub fn parse_checkpoint(bytes: &[u8]) -> GuardResult<CheckpointSnapshot> {
    let doc: CheckpointDocument =
        serde_json::from_slice(bytes).map_err(|e| GuardError::Parse {
            reason: e.to_string(),
        })?;

    let mut hashlines = BTreeMap::new();
    for line in doc.hashlines {
        let hash = line.hash.trim();
        if hash.is_empty() {
            return Err(GuardError::Parse {
                reason: format!("empty hash at height {}", line.height),
            });
        }
        if hashlines.insert(line.height, hash.to_string()).is_some() {
            return Err(GuardError::Parse {
                reason: format!("duplicate height {}", line.height),
            });
        }
    }

    Ok(CheckpointSnapshot::new(
        doc.epoch_id,
        doc.generated_at_ts,
        hashlines,
    ))
}

/// Encode a snapshot in the seed-node wire format.
pub fn encode_checkpoint(snapshot: &CheckpointSnapshot) -> GuardResult<Vec<u8>> {
    let doc = CheckpointDocument {
        epoch_id: snapshot.epoch_id,
        generated_at_ts: snapshot.generated_at,
        hashlines: snapshot
            .hashlines
            .iter()
            .map(|(height, hash)| HashLine {
                height: *height,
                hash: hash.clone(),
            })
            .collect(),
    };
    serde_json::to_vec_pretty(&doc).map_err(|e| GuardError::Parse {
        reason: e.to_string(),
    })
}
