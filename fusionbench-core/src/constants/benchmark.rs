//! Benchmark Harness Defaults

/// Untimed fusion invocations before the timed one.
///
/// Absorbs first-call costs (page faults, cold caches, lazy allocation) so
/// the recorded latency reflects steady-state work.
pub const WARMUP_RUNS: usize = 5;

/// Default real-time latency budget per fusion call (seconds).
///
/// 5 ms matches a 240 Hz biosignal frame budget with headroom.
pub const REAL_TIME_TARGET_SECS: f64 = 5e-3;
