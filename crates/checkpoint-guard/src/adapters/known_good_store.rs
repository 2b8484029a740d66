//! Known-good checkpoint persistence.

use crate::domain::LastKnownGood;
use crate::ports::outbound::KnownGoodStore;
use parking_lot::RwLock;
use shared_types::json_file::{read_json, write_json_atomic};
use shared_types::PersistenceError;
use std::path::{Path, PathBuf};

/// JSON document on disk, replaced atomically on every save.
pub struct JsonFileKnownGoodStore {
    path: PathBuf,
}

impl JsonFileKnownGoodStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KnownGoodStore for JsonFileKnownGoodStore {
    fn load(&self) -> Result<Option<LastKnownGood>, PersistenceError> {
        read_json(&self.path)
    }

    fn save(&self, state: &LastKnownGood) -> Result<(), PersistenceError> {
        write_json_atomic(&self.path, state)
    }
}

/// Volatile store for tests and dry runs.
#[derive(Default)]
pub struct InMemoryKnownGoodStore {
    state: RwLock<Option<LastKnownGood>>,
}

impl InMemoryKnownGoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<LastKnownGood> {
        self.state.read().clone()
    }
}

impl KnownGoodStore for InMemoryKnownGoodStore {
    fn load(&self) -> Result<Option<LastKnownGood>, PersistenceError> {
        Ok(self.state.read().clone())
    }

    fn save(&self, state: &LastKnownGood) -> Result<(), PersistenceError> {
        *self.state.write() = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CheckpointSnapshot;

    #[test]
    fn test_file_store_first_run_then_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileKnownGoodStore::new(dir.path().join("known_good.json"));
        assert_eq!(store.load().unwrap(), None);

        let known = LastKnownGood::adopt(
            CheckpointSnapshot::from_pairs(1000, 1000, [(100, "aaa")]),
            1005,
        );
        store.save(&known).unwrap();
        assert_eq!(store.load().unwrap(), Some(known));
    }

    #[test]
    fn test_file_store_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("known_good.json");
        std::fs::write(&path, b"[]").unwrap();

        let store = JsonFileKnownGoodStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Corrupt { .. })));
    }
}
