//! # Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: what the rest of the node calls
//! - `outbound`: what the guard needs from the node (chain state, storage)

pub mod inbound;
pub mod outbound;

pub use inbound::CheckpointGuardApi;
pub use outbound::{ChainStateLookup, KnownGoodStore};
