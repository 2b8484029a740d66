//! Chain-state lookup adapters.

use crate::domain::HashLine;
use crate::error::{GuardError, GuardResult};
use crate::ports::outbound::ChainStateLookup;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// In-memory height→hash table.
#[derive(Default)]
pub struct InMemoryChainState {
    blocks: RwLock<HashMap<u64, String>>,
}

impl InMemoryChainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, height: u64, hash: impl Into<String>) {
        self.blocks.write().insert(height, hash.into());
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }
}

#[async_trait]
impl ChainStateLookup for InMemoryChainState {
    async fn exists_at_height(&self, hash: &str, height: u64) -> GuardResult<bool> {
        Ok(self
            .blocks
            .read()
            .get(&height)
            .map_or(false, |known| known == hash))
    }
}

/// Chain index exported by the node daemon as a JSON array of
/// `{ "height": .., "hash": .. }` entries.
///
/// The file is re-read on [`JsonChainIndex::reload`] so a long-running
/// sentinel can follow the daemon's exports.
pub struct JsonChainIndex {
    path: PathBuf,
    inner: InMemoryChainState,
}

impl JsonChainIndex {
    pub fn open(path: impl AsRef<Path>) -> GuardResult<Self> {
        let index = Self {
            path: path.as_ref().to_path_buf(),
            inner: InMemoryChainState::new(),
        };
        index.reload()?;
        Ok(index)
    }

    /// Re-read the index file. Returns the number of indexed blocks.
    pub fn reload(&self) -> GuardResult<usize> {
        let bytes = std::fs::read(&self.path).map_err(|e| GuardError::ChainLookup {
            height: 0,
            reason: format!("{}: {}", self.path.display(), e),
        })?;
        let lines: Vec<HashLine> =
            serde_json::from_slice(&bytes).map_err(|e| GuardError::ChainLookup {
                height: 0,
                reason: format!("{}: {}", self.path.display(), e),
            })?;

        let fresh: HashMap<u64, String> = lines.into_iter().map(|l| (l.height, l.hash)).collect();
        let count = fresh.len();
        *self.inner.blocks.write() = fresh;

        info!(
            "[checkpoint-guard] Loaded chain index {} ({} blocks)",
            self.path.display(),
            count
        );
        Ok(count)
    }
}

#[async_trait]
impl ChainStateLookup for JsonChainIndex {
    async fn exists_at_height(&self, hash: &str, height: u64) -> GuardResult<bool> {
        self.inner.exists_at_height(hash, height).await
    }
}

/// Lookup used when no chain source is configured.
///
/// Every call fails, so new epochs come back as `ErrorBlockchainAccess`
/// instead of being accepted unverified.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableChainState;

#[async_trait]
impl ChainStateLookup for UnavailableChainState {
    async fn exists_at_height(&self, _hash: &str, height: u64) -> GuardResult<bool> {
        Err(GuardError::ChainLookup {
            height,
            reason: "no chain index configured".to_string(),
        })
    }
}
