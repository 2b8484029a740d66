//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports for the node binary and for tests.

mod chain_state;
mod known_good_store;

pub use chain_state::{InMemoryChainState, JsonChainIndex, UnavailableChainState};
pub use known_good_store::{InMemoryKnownGoodStore, JsonFileKnownGoodStore};
