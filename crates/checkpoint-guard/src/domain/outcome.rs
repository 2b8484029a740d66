//! Validation verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exactly one verdict per validation call.
///
/// `Attack*` verdicts reject the checkpoint. `Error*` verdicts neither accept
/// nor reject it; the next poll retries. Only `Valid*` verdicts may replace
/// the known-good snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// Same file as the known-good one (or the accepted bootstrap snapshot)
    ValidIdentical,
    /// Epoch advanced and every new hash exists on our chain
    ValidNewEpoch,
    /// Epoch did not move; accepted regardless of staleness
    ValidEpochUnchanged,
    /// Epoch id went backwards
    AttackEpochRollback,
    /// A new hash is not on our chain
    AttackInvalidHashes,
    /// An already-checkpointed height changed hash
    AttackModifiedHashes,
    /// Metadata or progression is inconsistent
    AttackEpochTampering,
    ErrorParseFailed,
    ErrorNoPreviousState,
    ErrorBlockchainAccess,
}

impl ValidationOutcome {
    pub const ALL: [ValidationOutcome; 10] = [
        ValidationOutcome::ValidIdentical,
        ValidationOutcome::ValidNewEpoch,
        ValidationOutcome::ValidEpochUnchanged,
        ValidationOutcome::AttackEpochRollback,
        ValidationOutcome::AttackInvalidHashes,
        ValidationOutcome::AttackModifiedHashes,
        ValidationOutcome::AttackEpochTampering,
        ValidationOutcome::ErrorParseFailed,
        ValidationOutcome::ErrorNoPreviousState,
        ValidationOutcome::ErrorBlockchainAccess,
    ];

    pub fn is_valid(&self) -> bool {
        matches!(
            self,
            ValidationOutcome::ValidIdentical
                | ValidationOutcome::ValidNewEpoch
                | ValidationOutcome::ValidEpochUnchanged
        )
    }

    pub fn is_attack(&self) -> bool {
        matches!(
            self,
            ValidationOutcome::AttackEpochRollback
                | ValidationOutcome::AttackInvalidHashes
                | ValidationOutcome::AttackModifiedHashes
                | ValidationOutcome::AttackEpochTampering
        )
    }

    pub fn is_error(&self) -> bool {
        !self.is_valid() && !self.is_attack()
    }

    /// Stable label used in metrics and audit records.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationOutcome::ValidIdentical => "ValidIdentical",
            ValidationOutcome::ValidNewEpoch => "ValidNewEpoch",
            ValidationOutcome::ValidEpochUnchanged => "ValidEpochUnchanged",
            ValidationOutcome::AttackEpochRollback => "AttackEpochRollback",
            ValidationOutcome::AttackInvalidHashes => "AttackInvalidHashes",
            ValidationOutcome::AttackModifiedHashes => "AttackModifiedHashes",
            ValidationOutcome::AttackEpochTampering => "AttackEpochTampering",
            ValidationOutcome::ErrorParseFailed => "ErrorParseFailed",
            ValidationOutcome::ErrorNoPreviousState => "ErrorNoPreviousState",
            ValidationOutcome::ErrorBlockchainAccess => "ErrorBlockchainAccess",
        }
    }

    /// Operator-facing description.
    pub fn describe(&self) -> &'static str {
        match self {
            ValidationOutcome::ValidIdentical => "VALID (identical checkpoint, normal polling)",
            ValidationOutcome::ValidNewEpoch => "VALID (new epoch, new hashes verified on chain)",
            ValidationOutcome::ValidEpochUnchanged => "VALID (same epoch, no new hashes)",
            ValidationOutcome::AttackEpochRollback => "ATTACK (epoch id decreased)",
            ValidationOutcome::AttackInvalidHashes => "ATTACK (new hashes not found on chain)",
            ValidationOutcome::AttackModifiedHashes => "ATTACK (existing hashes were modified)",
            ValidationOutcome::AttackEpochTampering => "ATTACK (epoch metadata or progression tampered)",
            ValidationOutcome::ErrorParseFailed => "ERROR (checkpoint could not be parsed)",
            ValidationOutcome::ErrorNoPreviousState => "ERROR (no known-good checkpoint)",
            ValidationOutcome::ErrorBlockchainAccess => "ERROR (chain state unavailable)",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_outcome_in_exactly_one_class() {
        for outcome in ValidationOutcome::ALL {
            let classes = [outcome.is_valid(), outcome.is_attack(), outcome.is_error()];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{outcome}");
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = ValidationOutcome::ALL.iter().map(|o| o.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ValidationOutcome::ALL.len());
    }
}
