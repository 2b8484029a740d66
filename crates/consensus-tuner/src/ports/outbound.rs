//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::{NetworkCondition, NetworkMetrics, TuningSnapshot};
use shared_types::PersistenceError;

/// Where the controller gets its view of the network.
pub trait HealthSource: Send + Sync {
    /// Current metrics and condition. May record the assessment (trust trend).
    fn assess(&self) -> (NetworkMetrics, NetworkCondition);
}

/// Durable storage for parameters and histories.
///
/// Absence of prior state is `Ok(None)`, the normal first-run condition.
pub trait TuningStateStore: Send + Sync {
    fn load(&self) -> Result<Option<TuningSnapshot>, PersistenceError>;

    fn save(&self, snapshot: &TuningSnapshot) -> Result<(), PersistenceError>;
}
