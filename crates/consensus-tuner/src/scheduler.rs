//! Periodic tuning task
//!
//! ```text
//! interval tick ──→ force_cycle() ──→ (next tick | shutdown)
//! ```
//!
//! A stop request never interrupts a cycle: the loop only waits on the
//! shutdown signal between cycles, so the current one finishes and no new one
//! starts.

use crate::error::{TuningError, TuningResult};
use crate::ports::inbound::ConsensusTuningApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Handle to a running scheduler.
pub struct TuningHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl TuningHandle {
    /// Stop after the cycle in progress, if any. Returns cycles run.
    pub async fn stop(self) -> TuningResult<u64> {
        let _ = self.shutdown_tx.send(true);
        self.task
            .await
            .map_err(|e| TuningError::Scheduler(e.to_string()))
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct TuningScheduler;

impl TuningScheduler {
    /// Run `controller` every `period`, first tick one period from now.
    pub fn spawn<C>(controller: Arc<C>, period: Duration) -> TuningHandle
    where
        C: ConsensusTuningApi + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = period.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut cycles = 0u64;

            info!(
                "[consensus-tuner] Tuning scheduler started (every {}s)",
                period.as_secs()
            );
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }
                if *shutdown_rx.borrow() {
                    break;
                }

                let decision = controller.force_cycle().await;
                cycles += 1;
                debug!(
                    "[consensus-tuner] Scheduled cycle {} finished ({})",
                    decision.id, decision.condition
                );
            }
            info!(
                "[consensus-tuner] Tuning scheduler stopped after {} cycles",
                cycles
            );
            cycles
        });

        TuningHandle { shutdown_tx, task }
    }
}
