//! Advisory timing grades. Neither grade ever rejects a checkpoint.

use crate::config::{PacingBounds, StalenessThresholds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long an unchanged epoch has gone without a successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Staleness {
    Normal,
    Warning,
    Critical,
    Emergency,
}

impl Staleness {
    pub fn grade(elapsed_s: u64, thresholds: &StalenessThresholds) -> Self {
        if elapsed_s <= thresholds.normal_max_s {
            Staleness::Normal
        } else if elapsed_s <= thresholds.warning_max_s {
            Staleness::Warning
        } else if elapsed_s <= thresholds.critical_max_s {
            Staleness::Critical
        } else {
            Staleness::Emergency
        }
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Staleness::Normal => "normal",
            Staleness::Warning => "warning",
            Staleness::Critical => "critical",
            Staleness::Emergency => "emergency",
        };
        f.write_str(s)
    }
}

/// Whether an epoch advance arrived at a plausible time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochPacing {
    Normal,
    /// Advanced sooner than one epoch interval
    TooFast,
    /// Advanced after missing at least one expected update
    Delayed,
}

impl EpochPacing {
    pub fn assess(elapsed_s: u64, bounds: &PacingBounds) -> Self {
        if elapsed_s < bounds.min_interval_s {
            EpochPacing::TooFast
        } else if elapsed_s > bounds.max_interval_s {
            EpochPacing::Delayed
        } else {
            EpochPacing::Normal
        }
    }
}

impl fmt::Display for EpochPacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EpochPacing::Normal => "normal",
            EpochPacing::TooFast => "too-fast",
            EpochPacing::Delayed => "delayed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staleness_band_edges() {
        let t = StalenessThresholds::default();
        assert_eq!(Staleness::grade(0, &t), Staleness::Normal);
        assert_eq!(Staleness::grade(1_800, &t), Staleness::Normal);
        assert_eq!(Staleness::grade(1_801, &t), Staleness::Warning);
        assert_eq!(Staleness::grade(4_200, &t), Staleness::Warning);
        assert_eq!(Staleness::grade(4_201, &t), Staleness::Critical);
        assert_eq!(Staleness::grade(7_200, &t), Staleness::Critical);
        assert_eq!(Staleness::grade(7_201, &t), Staleness::Emergency);
    }

    #[test]
    fn test_pacing_bounds() {
        let b = PacingBounds::default();
        assert_eq!(EpochPacing::assess(600, &b), EpochPacing::TooFast);
        assert_eq!(EpochPacing::assess(1_800, &b), EpochPacing::Normal);
        assert_eq!(EpochPacing::assess(3_600, &b), EpochPacing::Normal);
        assert_eq!(EpochPacing::assess(7_200, &b), EpochPacing::Normal);
        assert_eq!(EpochPacing::assess(7_201, &b), EpochPacing::Delayed);
    }
}
