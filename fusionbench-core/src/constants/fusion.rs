//! Confidence Weighting Defaults
//!
//! Relative trust in signal clarity, absence of artifacts and baseline
//! stability. The three blend coefficients must sum to 1.

// ===== CONFIDENCE BLEND =====

/// Share of confidence driven by normalized SNR.
pub const CONFIDENCE_WEIGHT_SNR: f64 = 0.6;

/// Share of confidence driven by `1 - artifact_score`.
pub const CONFIDENCE_WEIGHT_ARTIFACT: f64 = 0.25;

/// Share of confidence driven by `1 - drift_score`.
pub const CONFIDENCE_WEIGHT_DRIFT: f64 = 0.15;

/// SNR (dB) at which the SNR term saturates at 1.
pub const SNR_REFERENCE_DB: f64 = 25.0;

// ===== TOLERANCES =====

/// Allowed deviation of a normalized weight set's sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Allowed deviation of the blend coefficients' sum from 1.
pub const COEFFICIENT_SUM_TOLERANCE: f64 = 1e-6;
