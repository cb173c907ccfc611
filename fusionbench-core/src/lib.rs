//! Core engine for FusionBench
//!
//! Scores the quality of time-aligned sensor streams, fuses them with
//! quality-derived confidence weights and benchmarks fusion schemes against a
//! known reference.
//!
//! Key properties:
//! - Stateless components: every result depends only on the call's inputs
//! - Deterministic stream order (lexicographic by name)
//! - Numeric core builds `no_std + alloc`; benchmarking needs `std`
//!
//! ```
//! use fusionbench_core::{ConfidenceWeightedFusion, FusionStrategy, SignalStore};
//!
//! let store = SignalStore::from_streams([
//!     ("ecg", vec![0.10, 0.32, 0.41, 0.18]),
//!     ("eeg", vec![0.12, 0.29, 0.44, 0.15]),
//! ])?;
//!
//! let output = ConfidenceWeightedFusion::default().fuse(&store)?;
//! assert_eq!(output.fused.len(), 4);
//! assert!((output.weights.total() - 1.0).abs() < 1e-9);
//! # Ok::<(), fusionbench_core::FusionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod fusion;
pub mod quality;
pub mod signal;
pub mod window;

#[cfg(feature = "std")]
pub mod benchmark;

// Public API
pub use config::EngineConfig;
pub use errors::{ConfigError, FusionError, FusionResult, NameList, ShapeError};
pub use fusion::{
    apply_weights, ConfidenceCoefficients, ConfidenceWeightedFusion, ConfidenceWeighter,
    FixedWeightFusion, FusionOutput, FusionStrategy, UniformFusion, WeightSet,
};
pub use quality::{
    DriftMode, QualityAssessor, QualityConfig, QualityGrade, QualityReport, QualityReports,
};
pub use signal::SignalStore;

#[cfg(feature = "std")]
pub use benchmark::{
    Benchmark, BenchmarkRecord, BenchmarkSummary, Clock, MethodSet, MonotonicClock,
    NoiseCondition, RealTimeValidation,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
