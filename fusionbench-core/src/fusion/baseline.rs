//! Baseline Fusion Schemes
//!
//! Two quality-blind comparators for the confidence-weighted scheme:
//!
//! - [`UniformFusion`] standardizes every stream on its own statistics and
//!   averages them with equal weight. Output is on the standardized scale.
//! - [`FixedWeightFusion`] applies caller-supplied constant weights to the raw
//!   streams, typically one of the domain presets.

use alloc::vec;

use crate::{
    errors::{FusionResult, ShapeError},
    fusion::{apply_weights, FusionOutput, FusionStrategy, WeightSet},
    signal::{self, SignalStore},
};

/// Equal-weight average of standardized streams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformFusion;

impl UniformFusion {
    /// Create the scheme
    pub fn new() -> Self {
        Self
    }
}

impl FusionStrategy for UniformFusion {
    fn fuse(&self, store: &SignalStore) -> FusionResult<FusionOutput> {
        let n = store.stream_count();
        if n == 0 {
            return Err(ShapeError::EmptyStore.into());
        }
        let w = 1.0 / n as f64;

        let mut fused = vec![0.0; store.len()];
        for (_, samples) in store.iter() {
            let z = signal::standardize(samples);
            for (acc, x) in fused.iter_mut().zip(&z) {
                *acc += w * x;
            }
        }

        Ok(FusionOutput {
            fused,
            weights: WeightSet::empty(),
            quality: None,
        })
    }
}

/// Constant per-stream weights applied to raw samples
#[derive(Debug, Clone, PartialEq)]
pub struct FixedWeightFusion {
    weights: WeightSet,
}

impl FixedWeightFusion {
    /// Wrap a weight set; keys are checked against each store at fuse time
    pub fn new(weights: WeightSet) -> Self {
        Self { weights }
    }

    /// Build directly from `(name, weight)` pairs
    pub fn from_pairs<I, S>(pairs: I) -> FusionResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<alloc::string::String>,
    {
        Ok(Self::new(WeightSet::from_pairs(pairs)?))
    }

    /// Configured weights
    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }
}

impl FusionStrategy for FixedWeightFusion {
    fn fuse(&self, store: &SignalStore) -> FusionResult<FusionOutput> {
        let fused = apply_weights(store, &self.weights)?;
        Ok(FusionOutput {
            fused,
            weights: self.weights.clone(),
            quality: None,
        })
    }
}
