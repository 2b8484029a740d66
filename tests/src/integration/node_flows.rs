//! # Node Flows
//!
//! The assembled sentinel against real files: env config, chain index,
//! persisted state and the full runtime.

#[cfg(test)]
mod tests {
    use checkpoint_guard::{encode_checkpoint, CheckpointGuardApi, CheckpointSnapshot, ValidationOutcome};
    use consensus_tuner::{ConsensusTuningApi, NetworkHealthApi};
    use sentinel_node::{NodeConfig, SentinelContainer, SentinelRuntime};
    use std::collections::HashMap;
    use std::path::Path;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn now() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
    }

    fn config_for(dir: &Path, chain_index: Option<&Path>) -> NodeConfig {
        let mut vars = HashMap::new();
        vars.insert("SENTINEL_DATA_DIR".to_string(), dir.display().to_string());
        vars.insert("SENTINEL_POLL_INTERVAL".to_string(), "1".to_string());
        if let Some(index) = chain_index {
            vars.insert("SENTINEL_CHAIN_INDEX".to_string(), index.display().to_string());
        }
        NodeConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    fn write_chain_index(path: &Path, lines: &[(u64, &str)]) {
        let entries: Vec<serde_json::Value> = lines
            .iter()
            .map(|(height, hash)| serde_json::json!({ "height": height, "hash": hash }))
            .collect();
        std::fs::write(path, serde_json::to_vec(&entries).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_container_verifies_against_chain_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("chain_index.json");
        write_chain_index(&index, &[(100, "aaa"), (200, "bbb")]);
        let config = config_for(dir.path(), Some(&index));

        let epoch = now();
        let container = SentinelContainer::build(&config).unwrap();
        let first = CheckpointSnapshot::from_pairs(epoch, epoch, [(100, "aaa")]);
        assert_eq!(
            container.guard.validate(&first, "seed-1").await.0,
            ValidationOutcome::ValidIdentical
        );

        let confirmed = CheckpointSnapshot::from_pairs(epoch + 10, epoch + 10, [(100, "aaa"), (200, "bbb")]);
        assert_eq!(
            container.guard.validate(&confirmed, "seed-1").await.0,
            ValidationOutcome::ValidNewEpoch
        );

        let forged = CheckpointSnapshot::from_pairs(epoch + 20, epoch + 20, [(100, "aaa"), (200, "bbb"), (300, "fff")]);
        assert_eq!(
            container.guard.validate(&forged, "seed-1").await.0,
            ValidationOutcome::AttackInvalidHashes
        );
    }

    #[tokio::test]
    async fn test_container_without_index_never_accepts_unverified_epochs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), None);
        let container = SentinelContainer::build(&config).unwrap();

        let epoch = now();
        container
            .guard
            .validate(&CheckpointSnapshot::from_pairs(epoch, epoch, [(100, "aaa")]), "seed-1")
            .await;
        let next = CheckpointSnapshot::from_pairs(epoch + 1, epoch + 1, [(100, "aaa"), (200, "bbb")]);
        assert_eq!(
            container.guard.validate(&next, "seed-1").await.0,
            ValidationOutcome::ErrorBlockchainAccess
        );
        assert_eq!(container.guard.known_good().unwrap().epoch_id, epoch);
    }

    #[tokio::test]
    async fn test_corrupt_state_file_stops_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), None);
        std::fs::write(config.tuning_state_path(), b"{ truncated").unwrap();
        assert!(SentinelContainer::build(&config).is_err());
    }

    #[tokio::test]
    async fn test_runtime_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), None);
        let epoch = now();

        std::fs::create_dir_all(config.checkpoint_dir()).unwrap();
        let snapshot = CheckpointSnapshot::from_pairs(epoch, epoch, [(100, "aaa"), (200, "bbb")]);
        std::fs::write(
            config.checkpoint_dir().join("seed-1.json"),
            encode_checkpoint(&snapshot).unwrap(),
        )
        .unwrap();
        std::fs::write(config.checkpoint_dir().join("seed-2.json"), b"garbage").unwrap();

        let runtime = SentinelRuntime::new(config.clone()).unwrap();
        let container = runtime.container();
        container.health.record_connectivity(30.0);
        container.health.record_latency("peer-1", 2_500.0);
        container.tuner.force_cycle().await;

        runtime
            .run_until(tokio::time::sleep(Duration::from_millis(300)))
            .await
            .unwrap();
        assert_eq!(container.guard.known_good().unwrap().snapshot, snapshot);

        // Second boot resumes from disk.
        let restarted = SentinelContainer::build(&config).unwrap();
        assert_eq!(restarted.guard.known_good().unwrap().epoch_id, epoch);
        assert_eq!(restarted.tuner.current_parameters().quorum_pct, 75);
        assert_eq!(restarted.tuner.decision_history().len(), 1);
    }
}
