//! Multi-Stream Fusion
//!
//! ## Overview
//!
//! Fusion collapses the streams of a [`SignalStore`] into one sequence of the
//! same length. Every scheme here is a weighted sum per sample index:
//!
//! ```text
//! fused[i] = Σ_s  w[s] · x'[s][i]        for i in 0..N
//! ```
//!
//! The schemes differ only in where `w` and `x'` come from:
//!
//! | Scheme                | `w`                                  | `x'`           |
//! |-----------------------|--------------------------------------|----------------|
//! | Confidence-weighted   | quality-derived, normalized          | raw samples    |
//! | Uniform               | `1 / |streams|`                      | standardized   |
//! | Fixed                 | caller-supplied constants            | raw samples    |
//!
//! ## Strategy Trait
//!
//! [`FusionStrategy`] is the seam the benchmark drives. Strategies are
//! stateless between calls: anything fitted (standardization parameters,
//! quality reports, weights) is recomputed from the input every time, so the
//! order in which strategies or conditions run never changes a result.
//!
//! ## Weight Keys
//!
//! A weighted sum requires the weight keys to be exactly the store's stream
//! names. Missing or extra keys return [`FusionError::WeightMismatch`] naming
//! both sides; a stream is never silently dropped.

pub mod baseline;
pub mod confidence;

pub use baseline::{FixedWeightFusion, UniformFusion};
pub use confidence::{ConfidenceCoefficients, ConfidenceWeightedFusion, ConfidenceWeighter};

use alloc::{collections::BTreeMap, string::String, vec, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{ConfigError, FusionError, FusionResult, NameList},
    quality::QualityReports,
    signal::SignalStore,
};

/// Stream name → fusion weight
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeightSet {
    weights: BTreeMap<String, f64>,
}

impl WeightSet {
    /// Empty set (used by schemes that carry no per-stream weights)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(name, weight)` pairs
    ///
    /// Weights must be finite and non-negative. They are stored as given; no
    /// normalization happens here.
    pub fn from_pairs<I, S>(pairs: I) -> FusionResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut weights = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.into();
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { stream: name, value }.into());
            }
            weights.insert(name, value);
        }
        Ok(Self { weights })
    }

    /// Equal weight `1/n` for each name
    pub fn uniform<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let w = if names.is_empty() { 0.0 } else { 1.0 / names.len() as f64 };
        Self {
            weights: names.into_iter().map(|n| (String::from(n), w)).collect(),
        }
    }

    /// Weight for one stream
    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    /// Number of weights
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when no weights are held
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// `(name, weight)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// True when every weight is non-negative and they sum to 1 within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        !self.weights.is_empty()
            && self.weights.values().all(|&w| w >= 0.0)
            && libm::fabs(self.total() - 1.0) <= tolerance
    }

    /// Check that the keys are exactly the store's stream names
    pub fn check_keys(&self, store: &SignalStore) -> FusionResult<()> {
        let missing: Vec<String> = store
            .names()
            .filter(|n| !self.weights.contains_key(*n))
            .map(String::from)
            .collect();
        let unexpected: Vec<String> = self
            .weights
            .keys()
            .filter(|k| !store.contains(k))
            .cloned()
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(FusionError::WeightMismatch {
                missing: NameList(missing),
                unexpected: NameList(unexpected),
            })
        }
    }
}

impl FromIterator<(String, f64)> for WeightSet {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self { weights: iter.into_iter().collect() }
    }
}

/// Output of one fusion invocation
#[derive(Debug, Clone, PartialEq)]
pub struct FusionOutput {
    /// Fused sequence, same length as the input streams
    pub fused: Vec<f64>,
    /// Weights applied (empty for the uniform scheme)
    pub weights: WeightSet,
    /// Per-stream quality behind the weights (confidence-weighted only)
    pub quality: Option<QualityReports>,
}

/// Weighted per-sample sum of every stream in `store`
///
/// Keys of `weights` must match the store's stream names exactly.
pub fn apply_weights(store: &SignalStore, weights: &WeightSet) -> FusionResult<Vec<f64>> {
    weights.check_keys(store)?;

    let mut fused = vec![0.0; store.len()];
    for (name, samples) in store.iter() {
        // check_keys guarantees presence
        let w = weights.get(name).unwrap_or(0.0);
        for (acc, x) in fused.iter_mut().zip(samples) {
            *acc += w * x;
        }
    }
    Ok(fused)
}

/// A fusion scheme the benchmark can drive
pub trait FusionStrategy: Send + Sync {
    /// Fuse every stream of `store` into one sequence
    fn fuse(&self, store: &SignalStore) -> FusionResult<FusionOutput>;
}

impl<T: FusionStrategy + ?Sized> FusionStrategy for &T {
    fn fuse(&self, store: &SignalStore) -> FusionResult<FusionOutput> {
        (**self).fuse(store)
    }
}

impl<T: FusionStrategy + ?Sized> FusionStrategy for alloc::boxed::Box<T> {
    fn fuse(&self, store: &SignalStore) -> FusionResult<FusionOutput> {
        (**self).fuse(store)
    }
}
