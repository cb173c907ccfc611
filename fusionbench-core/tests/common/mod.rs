//! Common test utilities for integration tests
//!
//! This module provides:
//! - A deterministic pseudo-random source (no external RNG crate)
//! - Synthetic automotive and biosignal stream generators
//! - Store and reference builders for benchmark scenarios

#![allow(dead_code)]

pub mod generators;
pub mod harness;

use fusionbench_core::SignalStore;

/// Build a store from `(name, samples)` pairs, panicking on bad shapes
pub fn store<const N: usize>(streams: [(&str, Vec<f64>); N]) -> SignalStore {
    SignalStore::from_streams(streams).expect("test store has a valid shape")
}

/// Weighted per-sample sum of `(weight, samples)` pairs, summed in order
pub fn weighted_sum(parts: &[(f64, &[f64])]) -> Vec<f64> {
    let len = parts.first().map_or(0, |(_, s)| s.len());
    let mut out = vec![0.0; len];
    for (w, samples) in parts {
        for (acc, x) in out.iter_mut().zip(samples.iter()) {
            *acc += w * x;
        }
    }
    out
}
