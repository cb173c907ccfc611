//! Constants for FusionBench Core
//!
//! Every numeric default the engine uses lives here, with a note on where it
//! comes from. None of these are physical constants: they are empirical
//! defaults, and every one of them can be overridden through
//! [`EngineConfig`](crate::config::EngineConfig).
//!
//! ## Organization
//!
//! - **Quality**: window sizes, normalization scale, SNR floor, grade thresholds
//! - **Fusion**: confidence blend coefficients and tolerances
//! - **Benchmark**: warmup count and real-time latency target

/// Signal quality scoring defaults.
pub mod quality;

/// Confidence weighting and fusion defaults.
pub mod fusion;

/// Benchmark harness defaults.
pub mod benchmark;

pub use quality::{
    ARTIFACT_WINDOW_SAMPLES, DRIFT_WINDOW_SAMPLES, SCORE_SCALE, NOISE_POWER_EPSILON,
    SNR_FLOOR_DB,
};

pub use fusion::{
    CONFIDENCE_WEIGHT_SNR, CONFIDENCE_WEIGHT_ARTIFACT, CONFIDENCE_WEIGHT_DRIFT,
    SNR_REFERENCE_DB, WEIGHT_SUM_TOLERANCE,
};

pub use benchmark::{WARMUP_RUNS, REAL_TIME_TARGET_SECS};
