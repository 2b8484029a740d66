//! # Checkpoint Guard Flows
//!
//! Multi-step lifecycles of the checkpoint guard: the documented scenario
//! sequence, epoch growth across restarts, and per-source ingestion.

#[cfg(test)]
mod tests {
    use crate::fixtures::{snapshot, Sentinel};
    use checkpoint_guard::adapters::{InMemoryChainState, JsonFileKnownGoodStore};
    use checkpoint_guard::{
        encode_checkpoint, CheckpointGuardApi, CheckpointIngestor, CheckpointSnapshot,
        CheckpointValidator, GuardConfig, Staleness, ValidationOutcome,
    };
    use shared_types::{AuditComponent, ManualTimeSource, MemoryAuditSink};
    use std::sync::Arc;

    // =========================================================================
    // SCENARIO SEQUENCE
    // =========================================================================

    #[tokio::test]
    async fn test_bootstrap_rollback_then_rewrite() {
        let sentinel = Sentinel::new(1000);
        let first = CheckpointSnapshot::from_pairs(1000, 1000, [(100, "x"), (500, "aaa")]);

        let (outcome, _) = sentinel.guard.validate(&first, "seed-1").await;
        assert_eq!(outcome, ValidationOutcome::ValidIdentical);
        assert_eq!(sentinel.guard.known_good().map(|k| k.epoch_id), Some(1000));

        let older = CheckpointSnapshot::from_pairs(999, 999, [(100, "x")]);
        let (outcome, _) = sentinel.guard.validate(&older, "seed-1").await;
        assert_eq!(outcome, ValidationOutcome::AttackEpochRollback);
        assert_eq!(sentinel.guard.known_good().map(|k| k.epoch_id), Some(1000));

        let rewritten = CheckpointSnapshot::from_pairs(1000, 1000, [(100, "x"), (500, "bbb")]);
        let (outcome, delta) = sentinel.guard.validate(&rewritten, "seed-1").await;
        assert_eq!(outcome, ValidationOutcome::AttackModifiedHashes);
        assert_eq!(delta.modified_hashes[0].old_hash, "aaa");
        assert_eq!(delta.modified_hashes[0].new_hash, "bbb");

        let known = sentinel.guard.known_good().unwrap();
        assert_eq!(known.snapshot, first);

        let verdicts: Vec<String> = sentinel
            .audit
            .records()
            .into_iter()
            .filter(|r| r.component == AuditComponent::CheckpointGuard)
            .map(|r| r.verdict)
            .collect();
        assert_eq!(
            verdicts,
            vec!["ValidIdentical", "AttackEpochRollback", "AttackModifiedHashes"]
        );
    }

    // =========================================================================
    // EPOCH GROWTH
    // =========================================================================

    #[tokio::test]
    async fn test_epochs_advance_with_chain_confirmation() {
        let sentinel = Sentinel::new(10_000);
        let mut current = snapshot(10_000, 5);
        sentinel.confirm_on_chain(&current);
        assert_eq!(
            sentinel.guard.validate(&current, "seed-1").await.0,
            ValidationOutcome::ValidIdentical
        );

        for step in 1..=4u64 {
            sentinel.clock.advance(3_600);
            let epoch = 10_000 + step * 3_600;
            let next = CheckpointSnapshot {
                epoch_id: epoch,
                generated_at: epoch,
                ..current.with_hashline(500 + step * 100, format!("hash-{}", step))
            };
            sentinel.confirm_on_chain(&next);

            let (outcome, delta) = sentinel.guard.validate(&next, "seed-1").await;
            assert_eq!(outcome, ValidationOutcome::ValidNewEpoch, "step {}", step);
            assert_eq!(delta.new_hashes.len(), 1);
            assert_eq!(delta.time_since_last_epoch, 3_600);
            current = next;
        }

        assert_eq!(sentinel.guard.known_good().unwrap().snapshot, current);
        assert_eq!(sentinel.known_good.current().unwrap().epoch_id, current.epoch_id);
    }

    #[tokio::test]
    async fn test_unchanged_epoch_grows_stale_but_is_accepted() {
        let sentinel = Sentinel::new(50_000);
        let current = snapshot(50_000, 3);
        sentinel.guard.validate(&current, "seed-1").await;

        let gradings = [
            (600, Staleness::Normal),
            (3_000, Staleness::Warning),
            (6_000, Staleness::Critical),
            (9_000, Staleness::Emergency),
        ];
        let mut elapsed = 0;
        for (at, expected) in gradings {
            sentinel.clock.advance(at - elapsed);
            elapsed = at;
            let (outcome, delta) = sentinel.guard.validate(&current, "seed-1").await;
            assert_eq!(outcome, ValidationOutcome::ValidIdentical);
            assert!(delta.staleness.is_none());

            // Same epoch, one hash dropped: unchanged, graded by age.
            let mut thinner = current.clone();
            thinner.hashlines.remove(&300);
            let (outcome, delta) = sentinel.guard.validate(&thinner, "seed-1").await;
            assert_eq!(outcome, ValidationOutcome::ValidEpochUnchanged);
            assert_eq!(delta.staleness, Some(expected), "after {}s", at);
        }
        assert_eq!(sentinel.guard.known_good().unwrap().observed_at, 50_000);
    }

    // =========================================================================
    // RESTART
    // =========================================================================

    #[tokio::test]
    async fn test_known_good_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("known_good.json");
        let chain = Arc::new(InMemoryChainState::new());
        let clock = Arc::new(ManualTimeSource::new(20_000));

        let build = || {
            CheckpointValidator::new(
                GuardConfig::default(),
                chain.clone(),
                Arc::new(JsonFileKnownGoodStore::new(&path)),
                Arc::new(MemoryAuditSink::new()),
                clock.clone(),
            )
        };

        let first = build();
        assert_eq!(first.restore().unwrap(), None);
        first.validate(&snapshot(20_000, 4), "seed-1").await;
        drop(first);

        let second = build();
        assert_eq!(second.restore().unwrap(), Some(20_000));

        // A replay of an older file after restart is still a rollback.
        let (outcome, _) = second.validate(&snapshot(19_000, 4), "seed-1").await;
        assert_eq!(outcome, ValidationOutcome::AttackEpochRollback);
    }

    // =========================================================================
    // INGESTION
    // =========================================================================

    #[tokio::test]
    async fn test_ingestor_preserves_per_source_order() {
        let sentinel = Sentinel::new(30_000);
        let base = snapshot(30_000, 2);
        let newer = CheckpointSnapshot {
            epoch_id: 33_600,
            generated_at: 33_600,
            ..base.with_hashline(300, "c")
        };
        sentinel.confirm_on_chain(&newer);

        let (ingestor, mut verdicts) = CheckpointIngestor::new(sentinel.guard.clone(), 8);
        ingestor
            .submit_raw("seed-1", encode_checkpoint(&base).unwrap())
            .await
            .unwrap();
        ingestor
            .submit_raw("seed-1", encode_checkpoint(&newer).unwrap())
            .await
            .unwrap();
        // The older document arriving late from the same source.
        ingestor
            .submit_raw("seed-1", encode_checkpoint(&base).unwrap())
            .await
            .unwrap();
        ingestor.submit_raw("peer-x", b"not json".to_vec()).await.unwrap();
        ingestor.shutdown().await;

        let mut seed = Vec::new();
        let mut peer = Vec::new();
        while let Some(v) = verdicts.recv().await {
            match v.source.as_str() {
                "seed-1" => seed.push(v.outcome),
                _ => peer.push(v.outcome),
            }
        }
        assert_eq!(
            seed,
            vec![
                ValidationOutcome::ValidIdentical,
                ValidationOutcome::ValidNewEpoch,
                ValidationOutcome::AttackEpochRollback,
            ]
        );
        assert_eq!(peer, vec![ValidationOutcome::ErrorParseFailed]);
        assert_eq!(sentinel.guard.known_good().unwrap().epoch_id, 33_600);
    }

    #[tokio::test]
    async fn test_report_tracks_last_validation() {
        let sentinel = Sentinel::new(40_000);
        sentinel.guard.validate(&snapshot(40_000, 2), "seed-1").await;
        sentinel.guard.validate(&snapshot(39_000, 2), "seed-2").await;

        let report = sentinel.guard.last_report().unwrap();
        assert_eq!(report.source, "seed-2");
        assert_eq!(report.outcome, ValidationOutcome::AttackEpochRollback);
        let text = report.to_string();
        assert!(text.contains("seed-2"));
    }
}
