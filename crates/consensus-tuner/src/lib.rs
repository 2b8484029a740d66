//! # consensus-tuner
//!
//! Closed-loop tuning of bounded consensus-adjacent parameters (quorum, block
//! time, difficulty multiplier) from measured network health.
//!
//! ## Overview
//!
//! - **Diagnosis**: raw observations are aggregated into `NetworkMetrics`, a
//!   `NetworkCondition` and a trust score
//! - **Escalation**: each condition maps to a fixed set of proposals, stronger
//!   as the network gets worse
//! - **Safety envelopes**: quorum stays in `[50, 75]`, block time in
//!   `[60, 180]`, difficulty in `[50, 200]`; nothing can move them outside
//! - **Batch gate**: more than 5 proposals, or low trust, rejects the whole
//!   decision
//!
//! ## Architecture
//!
//! ```text
//! metrics source ──record_*──→ SharedHealthMonitor (NetworkHealthDiagnoser)
//!                                      │ assess
//!                                      ↓
//! TuningScheduler ──tick──→ ConsensusTuningController
//!                                      │ escalation → validate_decision
//!                                      ↓
//!                              ParameterAdjustor ──apply──→ ConsensusParameters
//!                                      │
//!                                      ├── TuningSnapshot ──save──→ TuningStateStore
//!                                      └── AuditRecord ──→ AuditSink
//! ```
//!
//! ## Escalation Table
//!
//! | Condition | Quorum | Block time | Difficulty |
//! |-----------|--------|------------|------------|
//! | Optimal | - | - | - |
//! | Degraded | +3 if < 60 | - | - |
//! | Stressed | +8 up to 65 | -20 down to 60 if > 80 | +15 up to 150 |
//! | Critical | 75 | 60 | 200 |
//!
//! ## Example
//!
//! ```rust,ignore
//! use consensus_tuner::{ConsensusTuningController, SharedHealthMonitor, TuningScheduler};
//!
//! let monitor = SharedHealthMonitor::new(HealthThresholds::default(), clock.clone());
//! let controller = Arc::new(ConsensusTuningController::new(
//!     TunerConfig::default(), SafetyEnvelopes::default(),
//!     Arc::new(monitor.clone()), store, audit, clock,
//! ));
//! controller.restore()?;
//! let handle = TuningScheduler::spawn(controller.clone(), Duration::from_secs(60));
//! // ...
//! handle.stop().await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod scheduler;
pub mod service;

pub use adapters::{InMemoryTuningStore, JsonFileTuningStore, SharedHealthMonitor};
pub use config::{HealthThresholds, TunerConfig};
pub use domain::{
    AdjustmentKind, ConsensusParameters, CyclePhase, DecisionRejection, Envelope,
    NetworkCondition, NetworkHealthDiagnoser, NetworkMetrics, Parameter, ParameterAdjustment,
    ParameterAdjustor, SafetyEnvelopes, TuningDecision, TuningSnapshot, HARD_LIMITS,
};
pub use error::{TuningError, TuningResult};
pub use ports::inbound::{ConsensusTuningApi, NetworkHealthApi};
pub use ports::outbound::{HealthSource, TuningStateStore};
pub use scheduler::{TuningHandle, TuningScheduler};
pub use service::ConsensusTuningController;
