//! # Domain Layer
//!
//! Pure checkpoint logic: snapshots, deltas, outcomes and the ordered
//! classification ladder. Nothing in here performs I/O; the chain lookup for
//! new hashes is requested by the classifier and carried out by the service.

pub mod classifier;
pub mod delta;
pub mod known_good;
pub mod outcome;
pub mod snapshot;
pub mod staleness;

pub use classifier::{classify, Classification, StateChange};
pub use delta::{CheckpointDelta, HashLine, ModifiedHash};
pub use known_good::LastKnownGood;
pub use outcome::ValidationOutcome;
pub use snapshot::CheckpointSnapshot;
pub use staleness::{EpochPacing, Staleness};
