//! Real-Time Capability Check
//!
//! Compares a measured fusion latency against a latency budget:
//!
//! ```text
//! real_time_capable       = latency < target
//! performance_margin_pct  = (target - latency) / target · 100
//! ```
//!
//! A negative margin means the budget was exceeded by that percentage.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of one latency-vs-budget comparison
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RealTimeValidation {
    /// Measured latency (ms)
    pub latency_ms: f64,
    /// Latency budget (ms)
    pub target_ms: f64,
    /// Strictly under budget
    pub real_time_capable: bool,
    /// Headroom as a percentage of the budget
    pub performance_margin_pct: f64,
}

impl RealTimeValidation {
    /// Compare `latency` against `target`
    ///
    /// A zero target leaves no headroom to express; the margin is then NaN.
    pub fn check(latency: Duration, target: Duration) -> Self {
        let latency_ms = latency.as_secs_f64() * 1e3;
        let target_ms = target.as_secs_f64() * 1e3;
        let performance_margin_pct = if target_ms > 0.0 {
            (target_ms - latency_ms) / target_ms * 100.0
        } else {
            f64::NAN
        };
        Self {
            latency_ms,
            target_ms,
            real_time_capable: latency < target,
            performance_margin_pct,
        }
    }
}
