//! # Sentinel Runtime
//!
//! ## Startup Sequence
//!
//! 1. Build the container (subsystems restored from disk)
//! 2. Start the tuning scheduler
//! 3. Start the checkpoint poller feeding the per-source ingestor
//! 4. Start the verdict listener
//!
//! ## Shutdown Sequence
//!
//! 1. Signal the poller and stop the scheduler (the current cycle finishes)
//! 2. Drain the ingestion queues
//! 3. Persist tuning state
//! 4. Write a final Prometheus snapshot to `metrics.prom`

use crate::config::NodeConfig;
use crate::container::SentinelContainer;
use crate::poller::CheckpointDirectory;
use anyhow::{Context, Result};
use checkpoint_guard::{CheckpointIngestor, IngestedOutcome};
use consensus_tuner::TuningScheduler;
use sentinel_telemetry::{log_checkpoint_event, log_event, render_metrics};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// The running sentinel.
pub struct SentinelRuntime {
    config: NodeConfig,
    container: Arc<SentinelContainer>,
}

impl SentinelRuntime {
    pub fn new(config: NodeConfig) -> Result<Self> {
        let container = Arc::new(SentinelContainer::build(&config)?);
        Ok(Self { config, container })
    }

    pub fn container(&self) -> Arc<SentinelContainer> {
        Arc::clone(&self.container)
    }

    /// Run until `shutdown` resolves, then stop everything gracefully.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("===========================================");
        info!("  Node Sentinel v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let tuning = TuningScheduler::spawn(
            Arc::clone(&self.container.tuner),
            self.config.tuner.interval,
        );

        let (ingestor, verdicts) = CheckpointIngestor::new(
            Arc::clone(&self.container.guard),
            self.config.guard.ingest_queue_depth,
        );
        let directory = CheckpointDirectory::new(self.config.checkpoint_dir());
        info!(
            "[sentinel] Watching {} every {}s",
            directory.path().display(),
            self.config.poll_interval.as_secs()
        );
        let poller = tokio::spawn(run_poller(
            directory,
            ingestor,
            self.config.poll_interval,
            shutdown_rx,
        ));
        let listener = tokio::spawn(listen_for_verdicts(verdicts));

        shutdown.await;
        info!("Initiating graceful shutdown...");

        if let Err(e) = shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        let cycles = tuning.stop().await.context("stopping tuning scheduler")?;
        poller.await.context("joining checkpoint poller")?;
        let attacks = listener.await.context("joining verdict listener")?;

        self.container
            .tuner
            .persist()
            .context("persisting tuning state")?;
        self.export_metrics();
        info!(
            "Shutdown complete ({} tuning cycles, {} hostile checkpoints this run)",
            cycles, attacks
        );
        Ok(())
    }

    fn export_metrics(&self) {
        let path = self.config.metrics_path();
        let written = render_metrics()
            .map_err(|e| e.to_string())
            .and_then(|text| std::fs::write(&path, text).map_err(|e| e.to_string()));
        match written {
            Ok(()) => debug!("[sentinel] Metrics written to {}", path.display()),
            Err(e) => log_event!(
                warn,
                "sentinel-node",
                "Could not write metrics snapshot",
                path = %path.display(),
                error = %e
            ),
        }
    }
}

async fn run_poller<G>(
    directory: CheckpointDirectory,
    ingestor: CheckpointIngestor<G>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    G: checkpoint_guard::CheckpointGuardApi + 'static,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let submitted = directory.poll_once(&ingestor).await;
                debug!("[sentinel] Queued {} checkpoint documents", submitted);
            }
            _ = shutdown.changed() => {
                info!("[checkpoint-guard] Shutdown signal received");
                break;
            }
        }
    }
    ingestor.shutdown().await;
}

/// Log verdicts as they arrive. Ends once every ingestion worker is gone.
async fn listen_for_verdicts(mut verdicts: mpsc::UnboundedReceiver<IngestedOutcome>) -> usize {
    let mut attacks = 0;
    while let Some(verdict) = verdicts.recv().await {
        if verdict.outcome.is_attack() {
            attacks += 1;
            log_checkpoint_event!(
                warn,
                "Hostile checkpoint delivered",
                verdict.delta.current_epoch_id,
                verdict.source,
                outcome = %verdict.outcome
            );
        }
    }
    attacks
}
