//! Benchmark Summaries
//!
//! Aggregations over a record set:
//!
//! - the best method by SNR (first wins ties, NaN never wins)
//! - per-method means of every metric, in first-appearance order
//! - relative improvement of one method over another
//! - per-condition SNR of a candidate against a baseline
//!
//! ```text
//! improvement_pct = (candidate - baseline) / |baseline| · 100
//! ```
//!
//! A zero baseline makes the improvement undefined (NaN). For MSE and
//! latency a negative improvement is the desirable direction.

use alloc::{string::String, vec::Vec};
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::BenchmarkRecord;

/// Mean metrics of one method across every condition it ran on
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodMeans {
    /// Method name
    pub method: String,
    /// Records averaged
    pub runs: usize,
    /// Mean MSE
    pub mse: f64,
    /// Mean R² (NaN if any run was NaN)
    pub r2: f64,
    /// Mean correlation (NaN if any run was NaN)
    pub correlation: f64,
    /// Mean SNR (dB)
    pub snr_db: f64,
    /// Mean latency
    pub latency: Duration,
}

/// Relative change (%) of a candidate's means over a baseline's
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Improvement {
    /// MSE change
    pub mse_pct: f64,
    /// R² change
    pub r2_pct: f64,
    /// Correlation change
    pub correlation_pct: f64,
    /// SNR change
    pub snr_db_pct: f64,
    /// Latency change
    pub latency_pct: f64,
}

impl Improvement {
    /// Compare `candidate` against `baseline`
    pub fn between(candidate: &MethodMeans, baseline: &MethodMeans) -> Self {
        Self {
            mse_pct: relative_change(candidate.mse, baseline.mse),
            r2_pct: relative_change(candidate.r2, baseline.r2),
            correlation_pct: relative_change(candidate.correlation, baseline.correlation),
            snr_db_pct: relative_change(candidate.snr_db, baseline.snr_db),
            latency_pct: relative_change(
                candidate.latency.as_secs_f64(),
                baseline.latency.as_secs_f64(),
            ),
        }
    }
}

/// SNR of two methods on one condition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConditionComparison {
    /// Condition label
    pub condition: String,
    /// Candidate SNR (dB)
    pub candidate_snr_db: f64,
    /// Baseline SNR (dB)
    pub baseline_snr_db: f64,
    /// Relative SNR change (%)
    pub improvement_pct: f64,
}

/// Aggregate view of a record set
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchmarkSummary {
    /// Method of the highest-SNR record
    pub best_method: Option<String>,
    /// SNR of that record (NaN when there is none)
    pub best_snr_db: f64,
    /// Per-method means in first-appearance order
    pub methods: Vec<MethodMeans>,
    /// Mean latency across every record
    pub mean_latency: Option<Duration>,
}

impl BenchmarkSummary {
    /// Summarize `records`
    pub fn from_records(records: &[BenchmarkRecord]) -> Self {
        let best = best_by_snr(records);
        Self {
            best_method: best.map(|r| r.method.clone()),
            best_snr_db: best.map_or(f64::NAN, |r| r.snr_db),
            methods: method_means(records),
            mean_latency: mean_latency(records.iter()),
        }
    }

    /// Means for one method
    pub fn means(&self, method: &str) -> Option<&MethodMeans> {
        self.methods.iter().find(|m| m.method == method)
    }

    /// Improvement of `candidate` over `baseline`, if both ran
    pub fn improvement(&self, candidate: &str, baseline: &str) -> Option<Improvement> {
        Some(Improvement::between(self.means(candidate)?, self.means(baseline)?))
    }
}

/// `(a - b) / |b| · 100`, NaN when `b` is zero
///
/// The sign always follows `a - b`, including against a negative baseline:
/// -5 dB over -10 dB is +50%, not -50%.
pub fn relative_change(candidate: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return f64::NAN;
    }
    (candidate - baseline) / libm::fabs(baseline) * 100.0
}

/// Highest-SNR record; the first one wins ties and NaN never wins
pub fn best_by_snr(records: &[BenchmarkRecord]) -> Option<&BenchmarkRecord> {
    records
        .iter()
        .filter(|r| !r.snr_db.is_nan())
        .fold(None, |best: Option<&BenchmarkRecord>, r| match best {
            Some(b) if b.snr_db >= r.snr_db => Some(b),
            _ => Some(r),
        })
}

/// Per-method metric means, in order of each method's first record
pub fn method_means(records: &[BenchmarkRecord]) -> Vec<MethodMeans> {
    let mut order: Vec<&str> = Vec::new();
    for r in records {
        if !order.contains(&r.method.as_str()) {
            order.push(&r.method);
        }
    }

    order
        .into_iter()
        .map(|method| {
            let runs: Vec<&BenchmarkRecord> =
                records.iter().filter(|r| r.method == method).collect();
            let n = runs.len() as f64;
            let avg = |f: fn(&BenchmarkRecord) -> f64| runs.iter().map(|r| f(r)).sum::<f64>() / n;
            MethodMeans {
                method: String::from(method),
                runs: runs.len(),
                mse: avg(|r| r.mse),
                r2: avg(|r| r.r2),
                correlation: avg(|r| r.correlation),
                snr_db: avg(|r| r.snr_db),
                latency: mean_latency(runs.iter().copied()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Candidate vs baseline SNR per condition, in first-appearance order
///
/// Conditions where either method is absent are skipped. Repeated records of
/// one method under one condition are averaged.
pub fn compare_by_condition(
    records: &[BenchmarkRecord],
    candidate: &str,
    baseline: &str,
) -> Vec<ConditionComparison> {
    let mut conditions: Vec<&str> = Vec::new();
    for r in records {
        if !conditions.contains(&r.condition.as_str()) {
            conditions.push(&r.condition);
        }
    }

    let mean_snr = |condition: &str, method: &str| -> Option<f64> {
        let (sum, n) = records
            .iter()
            .filter(|r| r.condition == condition && r.method == method)
            .fold((0.0, 0usize), |(s, n), r| (s + r.snr_db, n + 1));
        (n > 0).then(|| sum / n as f64)
    };

    conditions
        .into_iter()
        .filter_map(|condition| {
            let c = mean_snr(condition, candidate)?;
            let b = mean_snr(condition, baseline)?;
            Some(ConditionComparison {
                condition: String::from(condition),
                candidate_snr_db: c,
                baseline_snr_db: b,
                improvement_pct: relative_change(c, b),
            })
        })
        .collect()
}

fn mean_latency<'a>(records: impl Iterator<Item = &'a BenchmarkRecord>) -> Option<Duration> {
    let (total, n) = records.fold((Duration::ZERO, 0u32), |(t, n), r| {
        (t.saturating_add(r.latency), n.saturating_add(1))
    });
    (n > 0).then(|| total / n)
}
