//! Fusion Benchmarking
//!
//! ## Overview
//!
//! The benchmark drives a set of named [`FusionStrategy`] implementations over
//! a [`SignalStore`] with a known reference and records accuracy and latency
//! for each:
//!
//! ```text
//!            ┌─ warmup × N (untimed) ─┐
//! method ──→ │                        │──→ timed fuse ──→ metrics ──→ BenchmarkRecord
//!            └────────────────────────┘      (Clock)       (vs reference)
//! ```
//!
//! ## Contract
//!
//! - Inputs are validated before any method runs. A bad store or reference
//!   returns an error and no records.
//! - Records follow the order the methods were added in; nothing is sorted.
//! - A method that fails aborts the whole run. Partial results are never
//!   returned, so a record set is always complete.
//!
//! ## Noise Sweeps
//!
//! [`Benchmark::run_conditions`] repeats the run over a list of
//! [`NoiseCondition`]s and concatenates the records condition by condition.
//! With the `parallel` feature the conditions are evaluated on the rayon
//! global pool; the output order is the same either way.

pub mod clock;
pub mod metrics;
pub mod realtime;
pub mod summary;

pub use clock::{Clock, MonotonicClock, StepClock};
pub use realtime::RealTimeValidation;
pub use summary::{compare_by_condition, BenchmarkSummary, ConditionComparison, Improvement, MethodMeans};

use alloc::{boxed::Box, string::String, vec::Vec};
use core::{fmt, time::Duration};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    errors::FusionResult,
    fusion::{FusionStrategy, UniformFusion},
    signal::SignalStore,
};

/// Method name used by [`MethodSet::standard`] for confidence-weighted fusion
pub const CONFIDENCE_WEIGHTED: &str = "confidence_weighted";

/// Method name used by [`MethodSet::standard`] for uniform fusion
pub const UNIFORM: &str = "uniform";

/// Accuracy and latency of one method on one input
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchmarkRecord {
    /// Method name as registered in the [`MethodSet`]
    pub method: String,
    /// Label of the input condition
    pub condition: String,
    /// Mean squared error against the reference
    pub mse: f64,
    /// Coefficient of determination (NaN for a constant reference)
    pub r2: f64,
    /// Pearson correlation (NaN when either side is constant)
    pub correlation: f64,
    /// SNR of the fused output (dB)
    pub snr_db: f64,
    /// Wall-clock time of the timed invocation
    pub latency: Duration,
}

/// A labelled input for noise sweeps
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseCondition {
    label: String,
    store: SignalStore,
    reference: Vec<f64>,
}

impl NoiseCondition {
    /// Bundle a store with its reference; the reference must line up
    pub fn new(label: impl Into<String>, store: SignalStore, reference: Vec<f64>) -> FusionResult<Self> {
        store.check_reference(&reference)?;
        Ok(Self {
            label: label.into(),
            store,
            reference,
        })
    }

    /// Condition label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Input streams
    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    /// Ground-truth sequence
    pub fn reference(&self) -> &[f64] {
        &self.reference
    }
}

/// Ordered, named fusion methods
#[derive(Default)]
pub struct MethodSet {
    methods: Vec<(String, Box<dyn FusionStrategy>)>,
}

impl MethodSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Confidence-weighted and uniform fusion built from `config`
    pub fn standard(config: &EngineConfig) -> FusionResult<Self> {
        Ok(Self::new()
            .with(CONFIDENCE_WEIGHTED, config.confidence_fusion()?)
            .with(UNIFORM, UniformFusion::new()))
    }

    /// Append a method (builder style)
    pub fn with<S: FusionStrategy + 'static>(mut self, name: impl Into<String>, strategy: S) -> Self {
        self.push(name, strategy);
        self
    }

    /// Append a method
    pub fn push<S: FusionStrategy + 'static>(&mut self, name: impl Into<String>, strategy: S) {
        self.methods.push((name.into(), Box::new(strategy)));
    }

    /// Number of methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True when no methods are registered
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Method names in run order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, strategy)` pairs in run order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn FusionStrategy)> {
        self.methods.iter().map(|(n, s)| (n.as_str(), &**s))
    }
}

impl fmt::Debug for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Runs methods against references and records the outcome
#[derive(Debug)]
pub struct Benchmark<C: Clock = MonotonicClock> {
    clock: C,
    warmup_runs: usize,
    noise_epsilon: f64,
    real_time_target: Duration,
}

impl Benchmark<MonotonicClock> {
    /// Benchmark timed with the monotonic system clock
    pub fn new(config: &EngineConfig) -> FusionResult<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> Benchmark<C> {
    /// Benchmark timed with a caller-supplied clock
    pub fn with_clock(config: &EngineConfig, clock: C) -> FusionResult<Self> {
        config.validate()?;
        Ok(Self {
            clock,
            warmup_runs: config.warmup_runs,
            noise_epsilon: config.quality.noise_epsilon,
            real_time_target: Duration::try_from_secs_f64(config.real_time_target_secs)
                .unwrap_or(Duration::MAX),
        })
    }

    /// Clock used for timing
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Untimed invocations before each timed one
    pub fn warmup_runs(&self) -> usize {
        self.warmup_runs
    }

    /// Latency budget used by [`real_time`](Self::real_time)
    pub fn real_time_target(&self) -> Duration {
        self.real_time_target
    }

    /// Compare a latency against the configured budget
    pub fn real_time(&self, latency: Duration) -> RealTimeValidation {
        RealTimeValidation::check(latency, self.real_time_target)
    }

    /// Run every method once against `reference`
    pub fn run(
        &self,
        store: &SignalStore,
        reference: &[f64],
        methods: &MethodSet,
        condition: &str,
    ) -> FusionResult<Vec<BenchmarkRecord>> {
        store.check_reference(reference)?;
        methods
            .iter()
            .map(|(name, strategy)| self.run_method(name, strategy, store, reference, condition))
            .collect()
    }

    /// Run every method against every condition, condition-major
    pub fn run_conditions(
        &self,
        conditions: &[NoiseCondition],
        methods: &MethodSet,
    ) -> FusionResult<Vec<BenchmarkRecord>> {
        #[cfg(feature = "parallel")]
        let per_condition: FusionResult<Vec<Vec<BenchmarkRecord>>> = conditions
            .par_iter()
            .map(|c| self.run(&c.store, &c.reference, methods, &c.label))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_condition: FusionResult<Vec<Vec<BenchmarkRecord>>> = conditions
            .iter()
            .map(|c| self.run(&c.store, &c.reference, methods, &c.label))
            .collect();

        Ok(per_condition?.into_iter().flatten().collect())
    }

    fn run_method(
        &self,
        name: &str,
        strategy: &dyn FusionStrategy,
        store: &SignalStore,
        reference: &[f64],
        condition: &str,
    ) -> FusionResult<BenchmarkRecord> {
        for _ in 0..self.warmup_runs {
            strategy.fuse(store)?;
        }

        let start = self.clock.now();
        let output = strategy.fuse(store)?;
        let latency = self.clock.since(start);

        let fused = &output.fused;
        let record = BenchmarkRecord {
            method: String::from(name),
            condition: String::from(condition),
            mse: metrics::mse(reference, fused),
            r2: metrics::r2(reference, fused),
            correlation: metrics::pearson(reference, fused),
            snr_db: metrics::snr_db(reference, fused, self.noise_epsilon),
            latency,
        };

        log_debug!(
            "benchmark[{}/{}]: snr={:.2}dB r2={:.4} corr={:.4} latency={:?}",
            condition, name, record.snr_db, record.r2, record.correlation, record.latency
        );
        Ok(record)
    }
}
