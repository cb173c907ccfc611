//! Clock Abstraction for Latency Measurement
//!
//! The benchmark times each fusion call through the [`Clock`] trait so tests
//! can substitute a deterministic source.
//!
//! ## Implementations
//!
//! - [`MonotonicClock`]: `std::time::Instant`, immune to wall-clock jumps
//! - [`StepClock`]: advances a fixed step per reading, for tests
//!
//! ## Implementation Requirements
//!
//! - `now()` must never go backwards
//! - readings are offsets from an arbitrary, per-clock origin; only their
//!   differences mean anything

use core::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use std::time::Instant;

/// Monotonic time source for interval measurement
pub trait Clock: Send + Sync {
    /// Time elapsed since this clock's origin
    fn now(&self) -> Duration;

    /// Interval since an earlier reading, saturating at zero
    fn since(&self, earlier: Duration) -> Duration {
        self.now().saturating_sub(earlier)
    }
}

/// High-resolution monotonic clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Clock whose origin is the moment of creation
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock that advances `step` on every reading
///
/// Two consecutive readings are always exactly `step` apart, so a timed call
/// bracketed by two readings measures `step` regardless of how long it took.
#[derive(Debug)]
pub struct StepClock {
    nanos: AtomicU64,
    step_nanos: u64,
}

impl StepClock {
    /// Clock starting at zero
    pub fn new(step: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(0),
            step_nanos: u64::try_from(step.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Number of readings taken so far
    pub fn readings(&self) -> u64 {
        match self.step_nanos {
            0 => 0,
            step => self.nanos.load(Ordering::Relaxed) / step,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.fetch_add(self.step_nanos, Ordering::Relaxed))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
