//! Tuning state persistence.

use crate::domain::TuningSnapshot;
use crate::ports::outbound::TuningStateStore;
use parking_lot::RwLock;
use shared_types::json_file::{read_json, write_json_atomic};
use shared_types::PersistenceError;
use std::path::{Path, PathBuf};

/// JSON document on disk, replaced atomically on every save.
pub struct JsonFileTuningStore {
    path: PathBuf,
}

impl JsonFileTuningStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TuningStateStore for JsonFileTuningStore {
    fn load(&self) -> Result<Option<TuningSnapshot>, PersistenceError> {
        read_json(&self.path)
    }

    fn save(&self, snapshot: &TuningSnapshot) -> Result<(), PersistenceError> {
        write_json_atomic(&self.path, snapshot)
    }
}

/// Volatile store for tests and dry runs.
#[derive(Default)]
pub struct InMemoryTuningStore {
    state: RwLock<Option<TuningSnapshot>>,
}

impl InMemoryTuningStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<TuningSnapshot> {
        self.state.read().clone()
    }
}

impl TuningStateStore for InMemoryTuningStore {
    fn load(&self) -> Result<Option<TuningSnapshot>, PersistenceError> {
        Ok(self.state.read().clone())
    }

    fn save(&self, snapshot: &TuningSnapshot) -> Result<(), PersistenceError> {
        *self.state.write() = Some(snapshot.clone());
        Ok(())
    }
}
