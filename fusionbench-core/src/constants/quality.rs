//! Quality Scoring Defaults
//!
//! Window sizes and scale constants for the per-stream quality report.

// ===== ROLLING WINDOWS =====

/// Window length (samples) for the centered rolling standard deviation
/// behind the artifact score.
///
/// 64 samples is roughly a quarter second at 240 Hz, short enough to react
/// to bursts and long enough to average out single-sample glitches.
pub const ARTIFACT_WINDOW_SAMPLES: usize = 64;

/// Window length (samples) for baseline drift comparison.
///
/// The first `DRIFT_WINDOW_SAMPLES` samples define the baseline. Streams
/// shorter than twice this length have no drift score (reported as 0).
pub const DRIFT_WINDOW_SAMPLES: usize = 128;

// ===== NORMALIZATION =====

/// Scale that maps a rolling std or a baseline shift onto `[0, 1]`.
///
/// A value equal to or above the scale clips to 1. This is a sensitivity
/// knob, not a computed statistic.
pub const SCORE_SCALE: f64 = 0.2;

/// Floor applied to noise power before the SNR division.
pub const NOISE_POWER_EPSILON: f64 = 1e-9;

/// SNR reported for a stream with no signal power at all.
///
/// Every SNR is clamped to be no lower than this, so an all-zero stream
/// ranks last instead of producing `-inf`.
pub const SNR_FLOOR_DB: f64 = -120.0;

// ===== QUALITY GRADES =====

/// Minimum SNR (dB, exclusive) for an `Excellent` grade.
pub const GRADE_EXCELLENT_SNR_DB: f64 = 15.0;

/// Maximum artifact and drift score (exclusive) for an `Excellent` grade.
pub const GRADE_EXCELLENT_MAX_SCORE: f64 = 0.3;

/// Minimum SNR (dB, exclusive) for a `Good` grade.
pub const GRADE_GOOD_SNR_DB: f64 = 10.0;

/// Maximum artifact and drift score (exclusive) for a `Good` grade.
pub const GRADE_GOOD_MAX_SCORE: f64 = 0.6;

/// Minimum SNR (dB, exclusive) for a `Fair` grade.
pub const GRADE_FAIR_SNR_DB: f64 = 5.0;

/// Maximum artifact and drift score (exclusive) for a `Fair` grade.
pub const GRADE_FAIR_MAX_SCORE: f64 = 0.8;
