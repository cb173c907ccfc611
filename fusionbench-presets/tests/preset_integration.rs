//! End-to-end: presets driving the fusion benchmark

use std::time::Duration;

use fusionbench_core::{
    benchmark::{StepClock, CONFIDENCE_WEIGHTED},
    Benchmark, BenchmarkSummary, FusionError, MethodSet, SignalStore,
};
use fusionbench_presets::{PresetError, PresetRegistry};

fn biosignal_store(len: usize) -> SignalStore {
    let wave = |freq: f64, amp: f64| -> Vec<f64> {
        (0..len)
            .map(|i| amp * (2.0 * std::f64::consts::PI * freq * i as f64 / 240.0).sin())
            .collect()
    };
    SignalStore::from_streams([
        ("ecg", wave(1.5, 0.8)),
        ("eeg", wave(10.0, 0.4)),
        ("emg", wave(50.0, 0.05)),
    ])
    .unwrap()
}

#[test]
fn preset_oracle_matches_its_reference() {
    let registry = PresetRegistry::new();
    registry.load_defaults().unwrap();
    let preset = registry.get_latest("biosignal").unwrap();

    let store = biosignal_store(960);
    let reference = preset.reference(&store).unwrap();
    let config = preset.engine_config().unwrap();

    let methods = MethodSet::standard(&config)
        .unwrap()
        .with("preset", preset.fusion().unwrap());
    let bench = Benchmark::with_clock(&config, StepClock::new(Duration::from_millis(2))).unwrap();
    let records = bench.run(&store, &reference, &methods, "biosignal").unwrap();

    let oracle = records.iter().find(|r| r.method == "preset").unwrap();
    assert_eq!(oracle.mse, 0.0);
    assert_eq!(oracle.r2, 1.0);

    let summary = BenchmarkSummary::from_records(&records);
    assert_eq!(summary.best_method.as_deref(), Some("preset"));
    assert!(summary.means(CONFIDENCE_WEIGHTED).is_some());

    // 2 ms against the 5 ms biosignal budget
    let realtime = bench.real_time(oracle.latency);
    assert!(realtime.real_time_capable);
    assert!((realtime.performance_margin_pct - 60.0).abs() < 1e-6);
}

#[test]
fn preset_on_wrong_domain_is_rejected() {
    let registry = PresetRegistry::new();
    registry.load_defaults().unwrap();
    let automotive = registry.get("automotive_v1").unwrap();

    let err = automotive.reference(&biosignal_store(16)).unwrap_err();
    match err {
        PresetError::Fusion(FusionError::WeightMismatch { missing, unexpected }) => {
            assert_eq!(missing.names(), ["ecg", "eeg", "emg"]);
            assert_eq!(unexpected.names().len(), 5);
        }
        other => panic!("expected weight mismatch, got {other:?}"),
    }
}
