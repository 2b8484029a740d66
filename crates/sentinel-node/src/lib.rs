//! # Sentinel Node
//!
//! Runtime wiring for the two defensive subsystems:
//!
//! - **checkpoint-guard**: every checkpoint document found in the checkpoint
//!   directory is classified against the last known-good one
//! - **consensus-tuner**: quorum, block time and difficulty are re-tuned from
//!   network health on a fixed interval
//!
//! ```text
//! <checkpoint_dir>/<source>.json ──poll──→ CheckpointIngestor ──→ CheckpointValidator
//!                                                                      │
//!                                                   known_good.json ◀──┘
//!
//! metrics source ──record_*──→ SharedHealthMonitor ◀──assess── ConsensusTuningController
//!                                                                      │
//!                                                 tuning_state.json ◀──┘
//! ```

pub mod config;
pub mod container;
pub mod poller;
pub mod runtime;

pub use config::{ConfigError, NodeConfig};
pub use container::SentinelContainer;
pub use runtime::SentinelRuntime;
