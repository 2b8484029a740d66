//! # Checkpoint Directory Poller
//!
//! Each checkpoint source publishes its latest document as
//! `<checkpoint_dir>/<source>.json`. Every poll re-reads all of them and
//! queues each through the ingestor under its source name. Re-reading an
//! unchanged file is harmless (it classifies as identical or unchanged) and
//! is how transient lookup failures get retried.

use checkpoint_guard::{CheckpointGuardApi, CheckpointIngestor};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A checkpoint document found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointFile {
    pub source: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

pub struct CheckpointDirectory {
    dir: PathBuf,
}

impl CheckpointDirectory {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// All `*.json` documents, ordered by source. A missing directory is empty.
    pub fn scan(&self) -> io::Result<Vec<CheckpointFile>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("[sentinel] Checkpoint directory {} does not exist yet", self.dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let Some(source) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match std::fs::read(&path) {
                Ok(bytes) => files.push(CheckpointFile {
                    source: source.to_string(),
                    path: path.clone(),
                    bytes,
                }),
                Err(e) => warn!("[sentinel] Could not read {}: {}", path.display(), e),
            }
        }
        files.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(files)
    }

    /// Queue every document. Returns how many were submitted.
    pub async fn poll_once<G>(&self, ingestor: &CheckpointIngestor<G>) -> usize
    where
        G: CheckpointGuardApi + 'static,
    {
        let files = match self.scan() {
            Ok(files) => files,
            Err(e) => {
                warn!("[sentinel] Checkpoint scan of {} failed: {}", self.dir.display(), e);
                return 0;
            }
        };

        let mut submitted = 0;
        for file in files {
            match ingestor.submit_raw(&file.source, file.bytes).await {
                Ok(()) => submitted += 1,
                Err(e) => warn!("[sentinel] {}", e),
            }
        }
        submitted
    }
}
