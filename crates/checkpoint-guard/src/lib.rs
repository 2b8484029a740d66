//! # checkpoint-guard
//!
//! Defends a full node against checkpoint-based attacks by classifying every
//! downloaded checkpoint file against the last known-good one.
//!
//! ## Overview
//!
//! - **Rollback defense**: an older epoch id is always rejected
//! - **Tamper defense**: a rewritten hash at an already-checkpointed height is
//!   always rejected, even when the same file also carries legitimate new hashes
//! - **Forged-hash defense**: new hashes are only adopted once our own chain
//!   confirms every one of them
//! - **Fail-safe lookups**: a slow or failing chain lookup yields
//!   `ErrorBlockchainAccess`; the file is neither adopted nor branded an attack
//!
//! ## Architecture
//!
//! ```text
//! seed / peer ──bytes──→ CheckpointIngestor (one queue per source)
//!                               │
//!                               ↓
//!                     CheckpointValidator ──exists_at_height──→ ChainStateLookup
//!                               │
//!                               ├── LastKnownGood ──save──→ KnownGoodStore
//!                               ├── AuditRecord ──→ AuditSink
//!                               └── (ValidationOutcome, CheckpointDelta)
//! ```
//!
//! ## Outcome Classes
//!
//! | Class | Outcomes | Known-good state |
//! |-------|----------|------------------|
//! | Valid | `ValidIdentical`, `ValidNewEpoch`, `ValidEpochUnchanged` | may be replaced |
//! | Attack | `AttackEpochRollback`, `AttackInvalidHashes`, `AttackModifiedHashes`, `AttackEpochTampering` | untouched |
//! | Error | `ErrorParseFailed`, `ErrorNoPreviousState`, `ErrorBlockchainAccess` | untouched, retried next poll |
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkpoint_guard::{CheckpointValidator, GuardConfig, CheckpointGuardApi};
//!
//! let guard = CheckpointValidator::new(GuardConfig::default(), chain, store, audit, clock);
//! guard.restore()?;
//!
//! let (outcome, delta) = guard.validate_raw(&bytes, "seed-1").await;
//! if outcome.is_attack() {
//!     // penalise the source
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod parse;
pub mod ports;
pub mod report;
pub mod service;

pub use config::{BootstrapPolicy, GuardConfig, PacingBounds, StalenessThresholds};
pub use domain::{
    CheckpointDelta, CheckpointSnapshot, EpochPacing, HashLine, LastKnownGood, ModifiedHash,
    Staleness, ValidationOutcome,
};
pub use error::{GuardError, GuardResult};
pub use ingest::{CheckpointIngestor, IngestedOutcome};
pub use parse::{encode_checkpoint, parse_checkpoint};
pub use ports::inbound::CheckpointGuardApi;
pub use ports::outbound::{ChainStateLookup, KnownGoodStore};
pub use report::ValidationReport;
pub use service::CheckpointValidator;
