//! Human-readable validation report, kept for the most recent call.

use crate::domain::{CheckpointDelta, EpochPacing, Staleness, ValidationOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub timestamp: u64,
    pub source: String,
    pub outcome: ValidationOutcome,
    pub previous_epoch_id: u64,
    pub current_epoch_id: u64,
    pub new_hashes: usize,
    pub modified_hashes: usize,
    pub removed_hashes: usize,
    pub time_since_last_epoch: u64,
    pub staleness: Option<Staleness>,
    pub pacing: Option<EpochPacing>,
    /// Why an `Error*` verdict was reached, when known.
    pub error: Option<String>,
}

impl ValidationReport {
    pub fn new(
        timestamp: u64,
        source: &str,
        outcome: ValidationOutcome,
        delta: &CheckpointDelta,
        error: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            source: source.to_string(),
            outcome,
            previous_epoch_id: delta.previous_epoch_id,
            current_epoch_id: delta.current_epoch_id,
            new_hashes: delta.new_hashes.len(),
            modified_hashes: delta.modified_hashes.len(),
            removed_hashes: delta.removed_hashes.len(),
            time_since_last_epoch: delta.time_since_last_epoch,
            staleness: delta.staleness,
            pacing: delta.pacing,
            error,
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checkpoint Validation Report")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f, "Status: {}", self.outcome.describe())?;
        writeln!(
            f,
            "Epoch: {} -> {}",
            self.previous_epoch_id, self.current_epoch_id
        )?;
        writeln!(f, "Changes:")?;
        writeln!(f, "  New hashes: {}", self.new_hashes)?;
        writeln!(f, "  Modified: {}", self.modified_hashes)?;
        writeln!(f, "  Removed: {}", self.removed_hashes)?;
        writeln!(f, "  Time since epoch: {}s", self.time_since_last_epoch)?;
        if let Some(staleness) = self.staleness {
            writeln!(f, "  Staleness: {}", staleness)?;
        }
        if let Some(pacing) = self.pacing {
            writeln!(f, "  Epoch pacing: {}", pacing)?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "  Error: {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HashLine, ModifiedHash};

    #[test]
    fn test_report_renders_counts() {
        let delta = CheckpointDelta {
            new_hashes: vec![HashLine {
                height: 600,
                hash: "c".into(),
            }],
            modified_hashes: vec![ModifiedHash {
                height: 500,
                old_hash: "aaa".into(),
                new_hash: "bbb".into(),
            }],
            previous_epoch_id: 1000,
            current_epoch_id: 1000,
            time_since_last_epoch: 42,
            ..CheckpointDelta::default()
        };
        let report = ValidationReport::new(
            1042,
            "seed-1",
            ValidationOutcome::AttackModifiedHashes,
            &delta,
            None,
        );

        let text = report.to_string();
        assert!(text.contains("Source: seed-1"));
        assert!(text.contains("ATTACK (existing hashes were modified)"));
        assert!(text.contains("New hashes: 1"));
        assert!(text.contains("Modified: 1"));
        assert!(text.contains("Time since epoch: 42s"));
        assert!(!text.contains("Staleness"));
    }
}
