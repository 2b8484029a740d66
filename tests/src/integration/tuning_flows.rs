//! # Consensus Tuning Flows
//!
//! Raw observations pushed through the shared health monitor, diagnosed,
//! escalated and applied by the controller.

#[cfg(test)]
mod tests {
    use crate::fixtures::Sentinel;
    use consensus_tuner::{
        AdjustmentKind, ConsensusParameters, ConsensusTuningApi, DecisionRejection,
        NetworkCondition, NetworkHealthApi, Parameter, ParameterAdjustor, SafetyEnvelopes,
        TunerConfig, TuningScheduler, TuningSnapshot, TuningStateStore,
    };
    use checkpoint_guard::GuardConfig;
    use shared_types::{AuditComponent, ManualTimeSource};
    use std::sync::Arc;
    use std::time::Duration;

    fn under_attack(sentinel: &Sentinel) {
        for height in 0..7 {
            sentinel.health.record_reorg(1_000 + height, 3);
        }
        for height in 0..25 {
            sentinel.health.record_orphan(2_000 + height);
        }
        sentinel.health.record_connectivity(40.0);
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[tokio::test]
    async fn test_attack_profile_forces_protective_limits() {
        let sentinel = Sentinel::new(100_000);
        under_attack(&sentinel);
        assert_eq!(sentinel.health.condition(), NetworkCondition::Critical);
        assert!(sentinel.health.is_under_attack());

        let decision = sentinel.tuner.force_cycle().await;
        assert_eq!(decision.condition, NetworkCondition::Critical);
        assert!((decision.confidence - 0.63).abs() < 1e-9);
        assert!(decision.executed);

        let p = sentinel.tuner.current_parameters();
        assert_eq!((p.quorum_pct, p.block_time_s, p.difficulty_multiplier), (75, 60, 200));
    }

    #[tokio::test]
    async fn test_attack_profile_from_other_starting_points() {
        let starts = [(50, 180, 50), (60, 150, 120), (74, 61, 199), (75, 60, 200)];
        for (quorum, block_time, difficulty) in starts {
            let sentinel = Sentinel::new(100_000);
            sentinel
                .tuning_store
                .save(&TuningSnapshot {
                    parameters: ConsensusParameters {
                        quorum_pct: quorum,
                        block_time_s: block_time,
                        difficulty_multiplier: difficulty,
                        ..Default::default()
                    },
                    adjustment_history: vec![],
                    parameter_history: vec![],
                    decision_history: vec![],
                    cycles: 0,
                })
                .unwrap();
            sentinel.tuner.restore().unwrap();
            under_attack(&sentinel);

            sentinel.tuner.force_cycle().await;
            let p = sentinel.tuner.current_parameters();
            assert_eq!(
                (p.quorum_pct, p.block_time_s, p.difficulty_multiplier),
                (75, 60, 200),
                "starting from {:?}",
                (quorum, block_time, difficulty)
            );
        }
    }

    #[test]
    fn test_quorum_above_envelope_never_validates() {
        let adjustor = ParameterAdjustor::new(
            &TunerConfig::default(),
            SafetyEnvelopes::default(),
            Arc::new(ManualTimeSource::new(0)),
        );
        let adj = adjustor.propose(AdjustmentKind::QuorumIncrease, 80, "operator request");
        assert!(!adjustor.validate(&adj));
        let adj = adjustor.propose_for(Parameter::Quorum, 80, "operator request");
        assert!(!adjustor.validate(&adj));
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    #[tokio::test]
    async fn test_slow_network_escalates_gradually() {
        let sentinel = Sentinel::new(100_000);
        for _ in 0..10 {
            sentinel.health.record_latency("peer-1", 2_400.0);
        }
        assert_eq!(sentinel.health.condition(), NetworkCondition::Stressed);

        let decision = sentinel.tuner.force_cycle().await;
        assert_eq!(decision.adjustments.len(), 3);
        assert!(decision.executed);
        let p = sentinel.tuner.current_parameters();
        assert_eq!((p.quorum_pct, p.block_time_s, p.difficulty_multiplier), (59, 100, 115));

        // Latency recovers: nothing more to do.
        for _ in 0..100 {
            sentinel.health.record_latency("peer-1", 40.0);
        }
        let decision = sentinel.tuner.force_cycle().await;
        assert_eq!(decision.condition, NetworkCondition::Optimal);
        assert!(decision.adjustments.is_empty());
        assert_eq!(sentinel.tuner.current_parameters().quorum_pct, 59);
    }

    #[tokio::test]
    async fn test_hopeless_network_is_not_tuned_blindly() {
        let sentinel = Sentinel::new(100_000);
        sentinel.health.record_latency("peer-1", 5_000.0);
        for height in 0..12 {
            sentinel.health.record_reorg(height, 1);
        }
        for height in 0..30 {
            sentinel.health.record_orphan(height);
        }
        sentinel.health.record_connectivity(0.0);

        let decision = sentinel.tuner.force_cycle().await;
        assert_eq!(decision.condition, NetworkCondition::Critical);
        assert!(matches!(decision.rejection, Some(DecisionRejection::LowConfidence { .. })));
        assert!(!decision.executed);
        assert_eq!(sentinel.tuner.current_parameters().quorum_pct, 51);
    }

    #[tokio::test]
    async fn test_reorgs_age_out_of_the_window() {
        let sentinel = Sentinel::new(100_000);
        for height in 0..5 {
            sentinel.health.record_reorg(height, 2);
        }
        assert_eq!(sentinel.health.condition(), NetworkCondition::Degraded);

        sentinel.clock.advance(25 * 60 * 60);
        assert_eq!(sentinel.health.metrics().block_reorgs_24h, 0);
        assert_eq!(sentinel.health.condition(), NetworkCondition::Optimal);
    }

    #[tokio::test]
    async fn test_every_decision_is_audited() {
        let sentinel = Sentinel::new(100_000);
        sentinel.tuner.force_cycle().await;
        under_attack(&sentinel);
        sentinel.tuner.force_cycle().await;

        let tuning: Vec<String> = sentinel
            .audit
            .records()
            .into_iter()
            .filter(|r| r.component == AuditComponent::ConsensusTuner)
            .map(|r| r.verdict)
            .collect();
        assert_eq!(tuning, vec!["tuning_1", "tuning_2"]);
    }

    #[tokio::test]
    async fn test_dry_run_records_without_applying() {
        let config = TunerConfig {
            auto_execute: false,
            ..TunerConfig::default()
        };
        let sentinel = Sentinel::with_configs(100_000, GuardConfig::default(), config);
        under_attack(&sentinel);

        let decision = sentinel.tuner.force_cycle().await;
        assert_eq!(decision.adjustments.len(), 3);
        assert!(!decision.executed);
        assert_eq!(sentinel.tuner.current_parameters().quorum_pct, 51);
        assert!(sentinel.tuner.tuning_report().contains("Auto-execute:     off"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_drives_the_controller() {
        let sentinel = Sentinel::new(100_000);
        under_attack(&sentinel);

        let handle = TuningScheduler::spawn(sentinel.tuner.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(185)).await;
        let cycles = handle.stop().await.unwrap();

        assert_eq!(cycles, 3);
        assert_eq!(sentinel.tuner.decision_history().len(), 3);
        assert_eq!(sentinel.tuner.current_parameters().quorum_pct, 75);
        // Only the first cycle had anything to change.
        assert_eq!(sentinel.tuner.adjustment_history().len(), 3);
        assert_eq!(sentinel.tuning_store.current().unwrap().cycles, 1);
    }
}
