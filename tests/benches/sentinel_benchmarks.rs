//! # Sentinel Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Checkpoint parse (10k hashlines) | < 10ms |
//! | Classification (10k hashlines) | < 5ms |
//! | Full validation with chain lookups | < 20ms |
//! | Health diagnosis (full window) | < 50us |
//! | Tuning cycle | < 100us |

use checkpoint_guard::adapters::{InMemoryChainState, InMemoryKnownGoodStore};
use checkpoint_guard::domain::{classify, LastKnownGood};
use checkpoint_guard::{
    encode_checkpoint, parse_checkpoint, CheckpointGuardApi, CheckpointSnapshot,
    CheckpointValidator, GuardConfig,
};
use consensus_tuner::{
    ConsensusTuningController, HealthThresholds, InMemoryTuningStore, NetworkHealthApi,
    NetworkHealthDiagnoser, SafetyEnvelopes, SharedHealthMonitor, TunerConfig,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sentinel_tests::fixtures::snapshot;
use shared_types::{ManualTimeSource, TracingAuditSink};
use std::sync::Arc;
use std::time::Duration;

const NOW: u64 = 1_700_000_000;

// ============================================================================
// Checkpoint guard
// ============================================================================

fn bench_checkpoint_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkpoint-parse");

    for count in [100u64, 1_000, 10_000] {
        let bytes = encode_checkpoint(&snapshot(NOW, count)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| black_box(parse_checkpoint(bytes).is_ok()))
        });
    }

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkpoint-classify");
    let config = GuardConfig::default();

    for count in [100u64, 1_000, 10_000] {
        let known = LastKnownGood::adopt(snapshot(NOW, count), NOW);
        let next = snapshot(NOW + 3_600, count + 1);
        let mut tampered = next.clone();
        tampered.hashlines.insert(100, "rewritten".to_string());

        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("advance", count), &next, |b, next| {
            b.iter(|| black_box(classify(Some(&known), next, NOW + 3_600, &config)))
        });
        group.bench_with_input(BenchmarkId::new("tampered", count), &tampered, |b, tampered| {
            b.iter(|| black_box(classify(Some(&known), tampered, NOW + 3_600, &config)))
        });
    }

    group.finish();
}

fn bench_full_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkpoint-validate");
    group.measurement_time(Duration::from_secs(10));
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let known = snapshot(NOW, 10_000);
    let next = snapshot(NOW + 3_600, 10_100);
    let chain = Arc::new(InMemoryChainState::new());
    for (height, hash) in &next.hashlines {
        chain.insert(*height, hash.clone());
    }

    group.bench_function("new_epoch_10k", |b| {
        b.iter_batched(
            || {
                let guard = CheckpointValidator::new(
                    GuardConfig::default(),
                    chain.clone(),
                    Arc::new(InMemoryKnownGoodStore::new()),
                    Arc::new(TracingAuditSink),
                    Arc::new(ManualTimeSource::new(NOW)),
                );
                runtime.block_on(guard.validate(&known, "bench"));
                guard
            },
            |guard| black_box(runtime.block_on(guard.validate(&next, "bench")).0),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Consensus tuner
// ============================================================================

fn degraded_monitor(clock: Arc<ManualTimeSource>) -> SharedHealthMonitor {
    let monitor = SharedHealthMonitor::new(HealthThresholds::default(), clock);
    for i in 0..100 {
        monitor.record_latency("peer", 900.0 + i as f64 * 4.0);
    }
    for height in 0..8 {
        monitor.record_orphan(height);
    }
    monitor.record_reorg(4, 2);
    monitor.record_connectivity(70.0);
    monitor
}

fn bench_diagnosis(c: &mut Criterion) {
    let mut group = c.benchmark_group("network-health");
    let clock = Arc::new(ManualTimeSource::new(NOW));

    let mut diagnoser = NetworkHealthDiagnoser::new(HealthThresholds::default(), clock);
    for i in 0..100 {
        diagnoser.record_latency("peer", 50.0 + i as f64);
        diagnoser.record_orphan(i);
    }

    group.bench_function("diagnose_full_window", |b| {
        b.iter(|| black_box(diagnoser.diagnose()))
    });

    group.finish();
}

fn bench_tuning_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("consensus-tuning");
    let clock = Arc::new(ManualTimeSource::new(NOW));
    let monitor = degraded_monitor(clock.clone());

    let tuner = ConsensusTuningController::new(
        TunerConfig::default(),
        SafetyEnvelopes::default(),
        Arc::new(monitor),
        Arc::new(InMemoryTuningStore::new()),
        Arc::new(TracingAuditSink),
        clock,
    );

    group.bench_function("run_cycle", |b| b.iter(|| black_box(tuner.run_cycle())));

    group.finish();
}

criterion_group!(
    benches,
    bench_checkpoint_parsing,
    bench_classification,
    bench_full_validation,
    bench_diagnosis,
    bench_tuning_cycle,
);
criterion_main!(benches);
