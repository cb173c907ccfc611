//! Signal Store and Descriptive Statistics
//!
//! ## Overview
//!
//! A [`SignalStore`] holds the time-aligned streams one fusion operation works
//! on: a name for each stream and an equal-length run of finite samples. The
//! store checks its shape once, at construction, so every downstream
//! component can index any stream at any position `0..len()` without
//! re-checking.
//!
//! ```text
//! "ecg" ─ [ 0.12, 0.31, 0.48, ... ]  ┐
//! "eeg" ─ [ 0.02,-0.11, 0.07, ... ]  ├─ all length N, all finite
//! "emg" ─ [ 0.09, 0.14,-0.03, ... ]  ┘
//! ```
//!
//! ## Ordering
//!
//! Streams iterate in lexicographic name order. Fusion sums run in that order,
//! so the same inputs always produce bit-identical fused output regardless of
//! how the caller listed them.
//!
//! ## Statistics
//!
//! The free functions at the bottom of this module (`mean`, `power`,
//! `population_variance`, ...) are the shared numeric vocabulary for quality
//! scoring, standardization and benchmark metrics.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::errors::{FusionResult, ShapeError};

/// Named, equal-length, finite sample streams
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStore {
    streams: BTreeMap<String, Vec<f64>>,
    len: usize,
}

impl SignalStore {
    /// Build a store, validating shape
    ///
    /// Fails on an empty collection, an empty stream, unequal lengths,
    /// repeated names or any non-finite sample. Lengths are compared against
    /// the first stream supplied.
    pub fn from_streams<I, S>(streams: I) -> FusionResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        let mut expected: Option<usize> = None;

        for (name, samples) in streams {
            let name = name.into();

            if samples.is_empty() {
                return Err(ShapeError::EmptyStream { stream: name }.into());
            }

            match expected {
                None => expected = Some(samples.len()),
                Some(len) if len != samples.len() => {
                    return Err(ShapeError::LengthMismatch {
                        stream: name,
                        expected: len,
                        actual: samples.len(),
                    }
                    .into());
                }
                Some(_) => {}
            }

            if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
                return Err(ShapeError::NonFinite { stream: name, index }.into());
            }

            if map.contains_key(&name) {
                return Err(ShapeError::DuplicateStream { stream: name }.into());
            }
            map.insert(name, samples);
        }

        let len = expected.ok_or(ShapeError::EmptyStore)?;
        Ok(Self { streams: map, len })
    }

    /// Samples per stream
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed store; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Number of streams
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Look up a stream by name
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.streams.get(name).map(Vec::as_slice)
    }

    /// True when a stream with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.streams.contains_key(name)
    }

    /// Stream names in iteration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.streams.keys().map(String::as_str)
    }

    /// `(name, samples)` pairs in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.streams.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Check that a reference sequence lines up with the streams
    pub fn check_reference(&self, reference: &[f64]) -> FusionResult<()> {
        if reference.len() != self.len {
            return Err(ShapeError::ReferenceLength {
                expected: self.len,
                actual: reference.len(),
            }
            .into());
        }
        if let Some(index) = reference.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite {
                stream: String::from("<reference>"),
                index,
            }
            .into());
        }
        Ok(())
    }
}

// ===== DESCRIPTIVE STATISTICS =====

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / n;
    }
    // Running sum overflowed; scale each sample first
    values.iter().map(|v| v / n).sum()
}

/// Mean squared value
pub fn power(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64
}

/// Variance with divisor `n`
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Standard deviation with divisor `n`
pub fn population_std(values: &[f64]) -> f64 {
    libm::sqrt(population_variance(values))
}

/// Peak-to-peak range (`max - min`)
pub fn peak_to_peak(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    hi - lo
}

/// Zero-mean, unit-variance copy of `values`
///
/// Parameters are fitted on `values` itself. A constant input has no scale to
/// divide by and standardizes to all zeros.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    let std = population_std(values);
    if std <= 0.0 {
        log_debug!("standardize: zero-variance input, returning zeros");
        return values.iter().map(|_| 0.0).collect();
    }
    values.iter().map(|v| (v - m) / std).collect()
}
