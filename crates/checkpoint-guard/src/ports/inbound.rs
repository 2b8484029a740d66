//! Driving Ports (API - Inbound)

use crate::domain::{CheckpointDelta, CheckpointSnapshot, LastKnownGood, ValidationOutcome};
use crate::report::ValidationReport;
use async_trait::async_trait;

/// Primary checkpoint guard API.
///
/// Every call is total: malformed, adversarial or unverifiable input comes
/// back as a `ValidationOutcome`, never as an error or a panic.
#[async_trait]
pub trait CheckpointGuardApi: Send + Sync {
    /// Classify a parsed snapshot from `source`.
    async fn validate(
        &self,
        snapshot: &CheckpointSnapshot,
        source: &str,
    ) -> (ValidationOutcome, CheckpointDelta);

    /// Parse a checkpoint document and classify it.
    ///
    /// Undecodable input yields `ErrorParseFailed`.
    async fn validate_raw(&self, bytes: &[u8], source: &str) -> (ValidationOutcome, CheckpointDelta);

    /// Current known-good state, if any.
    fn known_good(&self) -> Option<LastKnownGood>;

    /// Report for the most recent validation call.
    fn last_report(&self) -> Option<ValidationReport>;
}
