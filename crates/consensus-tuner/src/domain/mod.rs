//! # Domain Layer
//!
//! - `health`: metrics, conditions and the pure diagnosis / trust functions
//! - `diagnoser`: rolling-window aggregation of raw observations
//! - `parameters`, `adjustment`, `adjustor`: bounded consensus parameters
//! - `policy`: the escalation table mapping condition to proposals
//! - `decision`, `cycle`: tuning decisions and the per-cycle state machine
//! - `snapshot`: the persisted form of all of the above

pub mod adjustment;
pub mod adjustor;
pub mod cycle;
pub mod decision;
pub mod diagnoser;
pub mod health;
pub mod parameters;
pub mod policy;
pub mod snapshot;

pub use adjustment::{AdjustmentKind, ParameterAdjustment};
pub use adjustor::ParameterAdjustor;
pub use cycle::CyclePhase;
pub use decision::{validate_decision, DecisionRejection, TuningDecision};
pub use diagnoser::NetworkHealthDiagnoser;
pub use health::{diagnose_metrics, trust_score, NetworkCondition, NetworkMetrics};
pub use parameters::{ConsensusParameters, Envelope, Parameter, SafetyEnvelopes, HARD_LIMITS};
pub use policy::escalation;
pub use snapshot::TuningSnapshot;
