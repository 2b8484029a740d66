//! # Per-Source Ingestion Queue
//!
//! One single-writer task per checkpoint source. Snapshots from a source are
//! validated strictly in arrival order, so an older file that was delayed in
//! transit can never overtake a newer one and slip through as "new".
//!
//! ```text
//! seed-1 ──▶ [queue] ──▶ worker ──┐
//! seed-2 ──▶ [queue] ──▶ worker ──┼──▶ CheckpointGuardApi::validate ──▶ results
//! peer-x ──▶ [queue] ──▶ worker ──┘
//! ```

use crate::domain::{CheckpointDelta, CheckpointSnapshot, ValidationOutcome};
use crate::error::{GuardError, GuardResult};
use crate::ports::inbound::CheckpointGuardApi;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A verdict delivered by an ingestion worker.
#[derive(Clone, Debug)]
pub struct IngestedOutcome {
    pub source: String,
    pub outcome: ValidationOutcome,
    pub delta: CheckpointDelta,
}

enum Payload {
    Parsed(CheckpointSnapshot),
    Raw(Vec<u8>),
}

/// Fans submissions out to per-source workers.
pub struct CheckpointIngestor<G>
where
    G: CheckpointGuardApi + 'static,
{
    guard: Arc<G>,
    queue_depth: usize,
    lanes: Mutex<HashMap<String, mpsc::Sender<Payload>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    results: mpsc::UnboundedSender<IngestedOutcome>,
}

impl<G> CheckpointIngestor<G>
where
    G: CheckpointGuardApi + 'static,
{
    /// Create an ingestor and the receiver on which verdicts are delivered.
    pub fn new(guard: Arc<G>, queue_depth: usize) -> (Self, mpsc::UnboundedReceiver<IngestedOutcome>) {
        let (results, rx) = mpsc::unbounded_channel();
        (
            Self {
                guard,
                queue_depth: queue_depth.max(1),
                lanes: Mutex::new(HashMap::new()),
                workers: Mutex::new(Vec::new()),
                results,
            },
            rx,
        )
    }

    /// Queue a parsed snapshot from `source`.
    pub async fn submit(&self, source: &str, snapshot: CheckpointSnapshot) -> GuardResult<()> {
        self.enqueue(source, Payload::Parsed(snapshot)).await
    }

    /// Queue a raw checkpoint document from `source`.
    pub async fn submit_raw(&self, source: &str, bytes: Vec<u8>) -> GuardResult<()> {
        self.enqueue(source, Payload::Raw(bytes)).await
    }

    /// Sources that currently have a worker.
    pub fn sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = self.lanes.lock().keys().cloned().collect();
        sources.sort();
        sources
    }

    /// Close every queue and wait for the workers to drain them.
    pub async fn shutdown(self) {
        self.lanes.lock().clear();
        let workers: Vec<JoinHandle<()>> = std::mem::take(&mut *self.workers.lock());
        let count = workers.len();
        for worker in workers {
            let _ = worker.await;
        }
        info!("[checkpoint-guard] Ingestion stopped ({} source workers drained)", count);
    }

    async fn enqueue(&self, source: &str, payload: Payload) -> GuardResult<()> {
        let lane = self.lane_for(source);
        lane.send(payload).await.map_err(|_| GuardError::IngestClosed {
            source_id: source.to_string(),
        })
    }

    fn lane_for(&self, source: &str) -> mpsc::Sender<Payload> {
        let mut lanes = self.lanes.lock();
        if let Some(lane) = lanes.get(source) {
            return lane.clone();
        }

        let (tx, rx) = mpsc::channel(self.queue_depth);
        let handle = tokio::spawn(run_worker(
            source.to_string(),
            rx,
            Arc::clone(&self.guard),
            self.results.clone(),
        ));
        self.workers.lock().push(handle);
        lanes.insert(source.to_string(), tx.clone());
        debug!("[checkpoint-guard] Started ingestion worker for {}", source);
        tx
    }
}

async fn run_worker<G>(
    source: String,
    mut rx: mpsc::Receiver<Payload>,
    guard: Arc<G>,
    results: mpsc::UnboundedSender<IngestedOutcome>,
) where
    G: CheckpointGuardApi + 'static,
{
    while let Some(payload) = rx.recv().await {
        let (outcome, delta) = match payload {
            Payload::Parsed(snapshot) => guard.validate(&snapshot, &source).await,
            Payload::Raw(bytes) => guard.validate_raw(&bytes, &source).await,
        };
        // Nobody listening is fine; the verdict is already audited.
        let _ = results.send(IngestedOutcome {
            source: source.clone(),
            outcome,
            delta,
        });
    }
    debug!("[checkpoint-guard] Ingestion worker for {} stopped", source);
}
