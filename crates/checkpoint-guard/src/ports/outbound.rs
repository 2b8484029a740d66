//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::LastKnownGood;
use crate::error::GuardResult;
use async_trait::async_trait;
use shared_types::PersistenceError;

/// The node's own view of the chain.
///
/// Must be safe to call concurrently. The guard bounds every call with
/// `GuardConfig::chain_lookup_timeout`.
#[async_trait]
pub trait ChainStateLookup: Send + Sync {
    /// Whether the block at `height` on our chain has hash `hash`.
    ///
    /// `Ok(false)` means the chain disagrees. `Err` means we could not tell.
    async fn exists_at_height(&self, hash: &str, height: u64) -> GuardResult<bool>;
}

/// Durable storage for the known-good checkpoint.
///
/// Absence of prior state is `Ok(None)`, the normal first-run condition.
pub trait KnownGoodStore: Send + Sync {
    fn load(&self) -> Result<Option<LastKnownGood>, PersistenceError>;

    fn save(&self, state: &LastKnownGood) -> Result<(), PersistenceError>;
}
