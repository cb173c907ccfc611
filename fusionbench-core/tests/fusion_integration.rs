//! Integration tests for quality assessment and confidence-weighted fusion
//!
//! Covers:
//! - Weight ordering across clean, noisy and duplicated streams
//! - SNR behaviour under growing additive noise
//! - Degenerate inputs (identical copies, constant streams)
//! - Configuration flowing from JSON into the fusion strategy

mod common;

use fusionbench_core::{
    constants::WEIGHT_SUM_TOLERANCE, ConfidenceWeightedFusion, DriftMode, EngineConfig,
    FixedWeightFusion, FusionError, FusionStrategy, QualityAssessor, QualityGrade, ShapeError,
    SignalStore, UniformFusion,
};

use common::{harness::TestRng, store};

#[test]
fn clean_streams_outweigh_noise() {
    let mut rng = TestRng::new(7);
    let constant = vec![1.0; 1000];
    let noise = rng.gaussian_vec(1000, 1.0);

    let store = store([
        ("a", constant.clone()),
        ("b", noise),
        ("c", constant.clone()),
    ]);

    let output = ConfidenceWeightedFusion::default().fuse(&store).unwrap();
    let w = &output.weights;
    let (a, b, c) = (w.get("a").unwrap(), w.get("b").unwrap(), w.get("c").unwrap());

    assert_eq!(a, c);
    assert!(a > b && c > b, "weights a={a} b={b} c={c}");
    assert!(w.is_normalized(WEIGHT_SUM_TOLERANCE));

    let quality = output.quality.unwrap();
    assert_eq!(quality["a"].grade, QualityGrade::Excellent);
    assert_eq!(quality["b"].grade, QualityGrade::Poor);
    assert!(quality["b"].artifact_score > 0.8);
}

#[test]
fn snr_falls_as_noise_grows() {
    let len = 1024;
    let reference = common::generators::sinusoids(len, 240.0, &[(1.0, 3.0, 0.0), (0.4, 11.0, 0.7)]);

    // Remove the component of the noise along the reference so the noise
    // estimate stays orthogonal to the signal at every scale
    let mut rng = TestRng::new(99);
    let mut noise = rng.gaussian_vec(len, 1.0);
    let dot: f64 = reference.iter().zip(&noise).map(|(r, n)| r * n).sum();
    let norm: f64 = reference.iter().map(|r| r * r).sum();
    for (n, r) in noise.iter_mut().zip(&reference) {
        *n -= dot / norm * r;
    }

    let assessor = QualityAssessor::default();
    let snrs: Vec<f64> = [0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]
        .iter()
        .map(|k| {
            let noisy: Vec<f64> = reference.iter().zip(&noise).map(|(r, n)| r + k * n).collect();
            assessor.assess_against_reference(&noisy, &reference).unwrap().snr_db
        })
        .collect();

    for pair in snrs.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "snr rose: {:?}", snrs);
    }
    assert!(snrs[0] > 30.0);
    // The noisy stream itself carries the noise power, so SNR stays above 0 dB
    assert!(snrs[6] < 1.0);
}

#[test]
fn identical_copies_fuse_to_the_stream() {
    let mut rng = TestRng::new(3);
    let samples: Vec<f64> = (0..600).map(|_| rng.gen_range(-2.0, 2.0)).collect();
    let store = store([
        ("one", samples.clone()),
        ("two", samples.clone()),
        ("three", samples.clone()),
    ]);

    let output = ConfidenceWeightedFusion::default().fuse(&store).unwrap();
    for (_, w) in output.weights.iter() {
        assert!((w - 1.0 / 3.0).abs() < 1e-12);
    }
    assert_eq!(output.fused, samples);
}

#[test]
fn single_stream_under_every_scheme() {
    let samples = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let store = store([("solo", samples.clone())]);

    let confidence = ConfidenceWeightedFusion::default().fuse(&store).unwrap();
    assert_eq!(confidence.fused, samples);

    let fixed = FixedWeightFusion::from_pairs([("solo", 1.0)]).unwrap().fuse(&store).unwrap();
    assert_eq!(fixed.fused, samples);

    let uniform = UniformFusion::new().fuse(&store).unwrap();
    let mean = uniform.fused.iter().sum::<f64>() / uniform.fused.len() as f64;
    assert!(mean.abs() < 1e-12);
}

#[test]
fn shape_violations_are_reported_by_name() {
    let err = SignalStore::from_streams([("lidar", vec![1.0; 10]), ("radar", vec![1.0; 9])])
        .unwrap_err();
    assert_eq!(
        err,
        FusionError::Shape(ShapeError::LengthMismatch {
            stream: "radar".into(),
            expected: 10,
            actual: 9,
        })
    );

    let err = SignalStore::from_streams([("ecg", Vec::new())]).unwrap_err();
    assert!(err.is_shape_error());
    assert!(err.to_string().contains("ecg"));
}

#[test]
fn json_config_drives_fusion() {
    let config = EngineConfig::from_json(
        r#"{
            "quality": { "artifact_window": 16, "drift_window": 32, "drift_mode": "single_shot" },
            "confidence": { "snr": 0.5, "artifact": 0.3, "drift": 0.2, "snr_reference_db": 20.0 }
        }"#,
    )
    .unwrap();

    let fusion = config.confidence_fusion().unwrap();
    assert_eq!(fusion.assessor().config().drift_mode, DriftMode::SingleShot);
    assert_eq!(fusion.weighter().coefficients().snr_reference_db, 20.0);

    let streams = common::generators::biosignal(480, 11);
    let store = SignalStore::from_streams(streams).unwrap();
    let output = fusion.fuse(&store).unwrap();
    assert_eq!(output.fused.len(), 480);
    assert!(output.weights.is_normalized(WEIGHT_SUM_TOLERANCE));
}
