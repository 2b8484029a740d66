//! # Checkpoint Attacks
//!
//! | Attack | Expected verdict |
//! |--------|------------------|
//! | Replay of an older epoch | `AttackEpochRollback` |
//! | Rewritten history smuggled in with a legitimate new epoch | `AttackModifiedHashes` |
//! | Forged hashes our chain never saw | `AttackInvalidHashes` |
//! | New hashes under the same epoch id | `AttackEpochTampering` |
//! | Forged bootstrap metadata | `AttackEpochTampering` |
//! | Chain lookup outage | `ErrorBlockchainAccess` (never an attack) |
//! | Arbitrary bytes | no panic, never adopted |

#[cfg(test)]
mod tests {
    use crate::fixtures::{snapshot, Sentinel};
    use async_trait::async_trait;
    use checkpoint_guard::adapters::InMemoryKnownGoodStore;
    use checkpoint_guard::{
        ChainStateLookup, CheckpointGuardApi, CheckpointSnapshot, CheckpointValidator,
        GuardConfig, GuardError, GuardResult, ValidationOutcome,
    };
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use shared_types::{ManualTimeSource, MemoryAuditSink};
    use std::sync::Arc;

    const NOW: u64 = 1_700_000_000;

    async fn established() -> (Sentinel, CheckpointSnapshot) {
        let sentinel = Sentinel::new(NOW);
        let known = snapshot(NOW, 5);
        sentinel.confirm_on_chain(&known);
        let (outcome, _) = sentinel.guard.validate(&known, "seed-1").await;
        assert_eq!(outcome, ValidationOutcome::ValidIdentical);
        sentinel.clock.advance(3_600);
        (sentinel, known)
    }

    fn next_epoch(base: &CheckpointSnapshot, epoch: u64) -> CheckpointSnapshot {
        CheckpointSnapshot {
            epoch_id: epoch,
            generated_at: epoch,
            hashlines: base.hashlines.clone(),
        }
    }

    #[tokio::test]
    async fn test_replay_of_older_epoch() {
        let (sentinel, known) = established().await;
        let replay = snapshot(NOW - 3_600, 4);
        assert_eq!(
            sentinel.guard.validate(&replay, "mitm").await.0,
            ValidationOutcome::AttackEpochRollback
        );
        assert_eq!(sentinel.guard.known_good().unwrap().snapshot, known);
    }

    #[tokio::test]
    async fn test_rewrite_hidden_in_valid_new_epoch() {
        let (sentinel, known) = established().await;
        let mut hostile = next_epoch(&known, NOW + 3_600).with_hashline(600, "new-block");
        hostile.hashlines.insert(300, "attacker-fork".to_string());
        sentinel.chain.insert(600, "new-block");

        let (outcome, delta) = sentinel.guard.validate(&hostile, "seed-evil").await;
        assert_eq!(outcome, ValidationOutcome::AttackModifiedHashes);
        assert_eq!(delta.new_hashes.len(), 1);
        assert_eq!(delta.modified_hashes.len(), 1);
        assert_eq!(sentinel.guard.known_good().unwrap().snapshot, known);
    }

    #[tokio::test]
    async fn test_forged_new_hashes() {
        let (sentinel, known) = established().await;
        let forged = next_epoch(&known, NOW + 3_600).with_hashline(600, "never-mined");
        assert_eq!(
            sentinel.guard.validate(&forged, "seed-evil").await.0,
            ValidationOutcome::AttackInvalidHashes
        );
        assert_eq!(sentinel.guard.known_good().unwrap().epoch_id, NOW);
    }

    #[tokio::test]
    async fn test_new_hashes_under_stale_epoch_id() {
        let (sentinel, known) = established().await;
        let sneaky = known.with_hashline(600, "unannounced");
        sentinel.chain.insert(600, "unannounced");
        assert_eq!(
            sentinel.guard.validate(&sneaky, "seed-evil").await.0,
            ValidationOutcome::AttackEpochTampering
        );
    }

    #[tokio::test]
    async fn test_forged_bootstrap_metadata() {
        let cases = [
            CheckpointSnapshot::from_pairs(NOW, NOW - 1, [(100, "a")]),
            CheckpointSnapshot::from_pairs(0, 0, [(100, "a")]),
            CheckpointSnapshot::from_pairs(NOW + 301, NOW + 301, [(100, "a")]),
        ];
        for forged in cases {
            let sentinel = Sentinel::new(NOW);
            assert_eq!(
                sentinel.guard.validate(&forged, "seed-evil").await.0,
                ValidationOutcome::AttackEpochTampering,
                "{:?}",
                forged
            );
            assert!(sentinel.guard.known_good().is_none());
        }
    }

    /// Chain that can be switched off.
    struct FlakyChain {
        up: Mutex<bool>,
        blocks: Mutex<Vec<(u64, String)>>,
    }

    #[async_trait]
    impl ChainStateLookup for FlakyChain {
        async fn exists_at_height(&self, hash: &str, height: u64) -> GuardResult<bool> {
            if !*self.up.lock() {
                return Err(GuardError::ChainLookup {
                    height,
                    reason: "node daemon restarting".into(),
                });
            }
            Ok(self.blocks.lock().iter().any(|(h, x)| *h == height && x == hash))
        }
    }

    #[tokio::test]
    async fn test_lookup_outage_is_retried_not_punished() {
        let chain = Arc::new(FlakyChain {
            up: Mutex::new(true),
            blocks: Mutex::new(vec![(100, "a".into()), (200, "b".into())]),
        });
        let clock = Arc::new(ManualTimeSource::new(NOW));
        let guard = CheckpointValidator::new(
            GuardConfig::default(),
            chain.clone(),
            Arc::new(InMemoryKnownGoodStore::new()),
            Arc::new(MemoryAuditSink::new()),
            clock.clone(),
        );

        guard
            .validate(&CheckpointSnapshot::from_pairs(NOW, NOW, [(100, "a")]), "seed-1")
            .await;
        clock.advance(3_600);
        let next = CheckpointSnapshot::from_pairs(NOW + 3_600, NOW + 3_600, [(100, "a"), (200, "b")]);

        *chain.up.lock() = false;
        let (outcome, _) = guard.validate(&next, "seed-1").await;
        assert_eq!(outcome, ValidationOutcome::ErrorBlockchainAccess);
        assert!(!outcome.is_attack());
        assert_eq!(guard.known_good().unwrap().epoch_id, NOW);

        *chain.up.lock() = true;
        assert_eq!(guard.validate(&next, "seed-1").await.0, ValidationOutcome::ValidNewEpoch);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_arbitrary_bytes_never_adopted(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                let (sentinel, known) = established().await;
                let (outcome, _) = sentinel.guard.validate_raw(&bytes, "fuzz").await;
                prop_assert!(outcome.is_error() || outcome.is_attack() || outcome.is_valid());
                let now_known = sentinel.guard.known_good().unwrap();
                if !outcome.is_valid() {
                    prop_assert_eq!(now_known.snapshot, known);
                }
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
