//! # Shared Types Crate
//!
//! Types that both defensive subsystems speak.
//!
//! ## Contents
//!
//! - `audit`: the `AuditSink` port and the records every verdict produces
//! - `clock`: the `TimeSource` port (wall-clock seconds)
//! - `bounded`: `BoundedLog<T>`, the capped history used for every log
//! - `json_file`: crash-safe JSON persistence helpers
//! - `errors`: persistence errors shared by the file adapters
//!
//! Neither subsystem touches the other's state. They only share these types.

pub mod audit;
pub mod bounded;
pub mod clock;
pub mod errors;
pub mod json_file;

pub use audit::{
    emit_audit, AuditComponent, AuditError, AuditRecord, AuditSink, MemoryAuditSink,
    TracingAuditSink,
};
pub use bounded::BoundedLog;
pub use clock::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use errors::PersistenceError;
