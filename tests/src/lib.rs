//! # Node Sentinel Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared builders and in-memory wiring
//! ├── integration/      # Cross-crate flows
//! │   ├── checkpoint_flows.rs
//! │   ├── tuning_flows.rs
//! │   └── node_flows.rs
//! └── exploits/         # Attack simulations against the checkpoint guard
//!     └── checkpoint_attacks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sentinel-tests
//! cargo test -p sentinel-tests integration::
//! cargo test -p sentinel-tests exploits::
//! cargo bench -p sentinel-tests
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
