//! # Integration Flows
//!
//! - `checkpoint_flows`: guard lifecycles across validations, restarts and ingestion
//! - `tuning_flows`: health observations driving parameter changes end to end
//! - `node_flows`: the assembled node against real files

pub mod checkpoint_flows;
pub mod node_flows;
pub mod tuning_flows;
