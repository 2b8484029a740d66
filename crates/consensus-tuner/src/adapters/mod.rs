//! # Adapters
//!
//! - `health_monitor`: thread-safe diagnoser shared by the metrics source and the controller
//! - `state_store`: JSON-file and in-memory tuning state

pub mod health_monitor;
pub mod state_store;

pub use health_monitor::SharedHealthMonitor;
pub use state_store::{InMemoryTuningStore, JsonFileTuningStore};
