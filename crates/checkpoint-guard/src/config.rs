//! Checkpoint guard configuration.
//!
//! Every value has a default matching the hourly checkpoint cadence of the
//! seed network.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when no known-good checkpoint exists yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootstrapPolicy {
    /// Accept the first snapshot whose metadata is sane.
    #[default]
    TrustOnFirstUse,
    /// Refuse to validate until a known-good state has been restored.
    RequireKnownGood,
}

/// Advisory staleness bands for an unchanged epoch (seconds since last adoption).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessThresholds {
    pub normal_max_s: u64,
    pub warning_max_s: u64,
    pub critical_max_s: u64,
}

impl Default for StalenessThresholds {
    fn default() -> Self {
        Self {
            normal_max_s: 1_800,
            warning_max_s: 4_200,
            critical_max_s: 7_200,
        }
    }
}

/// Expected wall-clock spacing between two epochs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingBounds {
    /// An epoch advancing sooner than this is logged as too fast.
    pub min_interval_s: u64,
    /// An epoch advancing later than this is logged as delayed.
    pub max_interval_s: u64,
}

impl Default for PacingBounds {
    fn default() -> Self {
        Self {
            min_interval_s: 1_800,
            max_interval_s: 7_200,
        }
    }
}

/// Checkpoint guard configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    /// How far in the future a bootstrap epoch may lie (seconds)
    pub max_future_skew_s: u64,
    pub staleness: StalenessThresholds,
    pub pacing: PacingBounds,
    /// Budget for a single `exists_at_height` call
    pub chain_lookup_timeout: Duration,
    pub bootstrap_policy: BootstrapPolicy,
    /// Per-source ingestion queue depth
    pub ingest_queue_depth: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_future_skew_s: 300,
            staleness: StalenessThresholds::default(),
            pacing: PacingBounds::default(),
            chain_lookup_timeout: Duration::from_secs(5),
            bootstrap_policy: BootstrapPolicy::default(),
            ingest_queue_depth: 64,
        }
    }
}
