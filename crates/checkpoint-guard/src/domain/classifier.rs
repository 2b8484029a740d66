//! # Checkpoint Classification Ladder
//!
//! Ordered checks, first match wins:
//!
//! ```text
//! no known-good ──policy──→ ErrorNoPreviousState
//!       │
//!       └── metadata sane? ──no──→ AttackEpochTampering
//!                 └──yes──→ ValidIdentical (adopt)
//!
//! identical ──────────────────────→ ValidIdentical
//! epoch < known ──────────────────→ AttackEpochRollback
//! compute delta, grade pacing (advisory)
//! any modified height ────────────→ AttackModifiedHashes
//! same epoch, no new hashes ──────→ ValidEpochUnchanged (+ staleness)
//! newer epoch with new hashes ────→ verify on chain (service)
//! anything else ──────────────────→ AttackEpochTampering
//! ```
//!
//! The modified-hash check strictly precedes acceptance, so a mixed update
//! (one rewritten height plus legitimate new heights) is always rejected.

use crate::config::{BootstrapPolicy, GuardConfig};
use crate::domain::delta::CheckpointDelta;
use crate::domain::known_good::LastKnownGood;
use crate::domain::outcome::ValidationOutcome;
use crate::domain::snapshot::CheckpointSnapshot;
use crate::domain::staleness::{EpochPacing, Staleness};

/// Whether a decided verdict replaces the known-good snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    Keep,
    Adopt,
}

/// Result of the pure part of validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Decided {
        outcome: ValidationOutcome,
        delta: CheckpointDelta,
        change: StateChange,
    },
    /// Newer epoch with new hashes: every entry of `delta.new_hashes` must be
    /// confirmed by the chain before the snapshot can be adopted.
    VerifyNewHashes { delta: CheckpointDelta },
}

impl Classification {
    fn keep(outcome: ValidationOutcome, delta: CheckpointDelta) -> Self {
        Classification::Decided {
            outcome,
            delta,
            change: StateChange::Keep,
        }
    }
}

/// Bootstrap metadata check: `epoch_id == generated_at`, non-zero, and not
/// further ahead of `now` than the allowed skew.
pub fn metadata_is_sane(snapshot: &CheckpointSnapshot, now: u64, max_future_skew_s: u64) -> bool {
    snapshot.epoch_id != 0
        && snapshot.epoch_id == snapshot.generated_at
        && snapshot.epoch_id <= now.saturating_add(max_future_skew_s)
}

/// Classify `snapshot` against the known-good state at wall-clock `now`.
pub fn classify(
    known: Option<&LastKnownGood>,
    snapshot: &CheckpointSnapshot,
    now: u64,
    config: &GuardConfig,
) -> Classification {
    let Some(known) = known else {
        return classify_bootstrap(snapshot, now, config);
    };

    let elapsed = now.saturating_sub(known.observed_at);

    if *snapshot == known.snapshot {
        let mut delta = CheckpointDelta::for_snapshot(snapshot);
        delta.previous_epoch_id = known.epoch_id;
        delta.previous_height = known.snapshot.tip_height();
        delta.time_since_last_epoch = elapsed;
        return Classification::keep(ValidationOutcome::ValidIdentical, delta);
    }

    if snapshot.epoch_id < known.epoch_id {
        let mut delta = CheckpointDelta::for_snapshot(snapshot);
        delta.previous_epoch_id = known.epoch_id;
        delta.previous_height = known.snapshot.tip_height();
        delta.time_since_last_epoch = elapsed;
        return Classification::keep(ValidationOutcome::AttackEpochRollback, delta);
    }

    let mut delta = CheckpointDelta::compute(&known.snapshot, snapshot, elapsed);

    let epoch_advanced = snapshot.epoch_id > known.epoch_id;
    if epoch_advanced {
        delta.pacing = Some(EpochPacing::assess(elapsed, &config.pacing));
    }

    if !delta.modified_hashes.is_empty() {
        return Classification::keep(ValidationOutcome::AttackModifiedHashes, delta);
    }

    if !epoch_advanced && delta.new_hashes.is_empty() {
        delta.staleness = Some(Staleness::grade(elapsed, &config.staleness));
        return Classification::keep(ValidationOutcome::ValidEpochUnchanged, delta);
    }

    if epoch_advanced && !delta.new_hashes.is_empty() {
        return Classification::VerifyNewHashes { delta };
    }

    Classification::keep(ValidationOutcome::AttackEpochTampering, delta)
}

fn classify_bootstrap(snapshot: &CheckpointSnapshot, now: u64, config: &GuardConfig) -> Classification {
    let delta = CheckpointDelta::for_snapshot(snapshot);

    if config.bootstrap_policy == BootstrapPolicy::RequireKnownGood {
        return Classification::keep(ValidationOutcome::ErrorNoPreviousState, delta);
    }

    if !metadata_is_sane(snapshot, now, config.max_future_skew_s) {
        return Classification::keep(ValidationOutcome::AttackEpochTampering, delta);
    }

    Classification::Decided {
        outcome: ValidationOutcome::ValidIdentical,
        delta,
        change: StateChange::Adopt,
    }
}
