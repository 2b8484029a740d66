//! # Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: the tuning controller and the health monitor, as the node sees them
//! - `outbound`: where health comes from and where tuning state is kept

pub mod inbound;
pub mod outbound;

pub use inbound::{ConsensusTuningApi, NetworkHealthApi};
pub use outbound::{HealthSource, TuningStateStore};
