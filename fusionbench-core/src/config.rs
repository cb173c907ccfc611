//! Engine Configuration
//!
//! ## Overview
//!
//! [`EngineConfig`] gathers every tunable constant of the engine in one place:
//! quality windows and scales, confidence coefficients, benchmark warmup and
//! the real-time latency target. Every field has a default from
//! [`constants`](crate::constants), and with the `std` feature the whole
//! structure loads from JSON, with any missing field falling back to its
//! default:
//!
//! ```json
//! {
//!   "quality": { "artifact_window": 32, "drift_mode": "single_shot" },
//!   "confidence": { "snr": 0.5, "artifact": 0.3, "drift": 0.2 },
//!   "warmup_runs": 10
//! }
//! ```
//!
//! Configuration is validated once, before any component is built, so a bad
//! window or coefficient set never produces scores.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::benchmark::{REAL_TIME_TARGET_SECS, WARMUP_RUNS},
    errors::{ConfigError, FusionResult},
    fusion::{ConfidenceCoefficients, ConfidenceWeightedFusion, ConfidenceWeighter},
    quality::{check_positive, QualityAssessor, QualityConfig},
};

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Quality scoring windows, scales and grade bands
    pub quality: QualityConfig,
    /// Confidence blend
    pub confidence: ConfidenceCoefficients,
    /// Untimed invocations before each timed benchmark run
    pub warmup_runs: usize,
    /// Latency budget for real-time validation (seconds)
    pub real_time_target_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quality: QualityConfig::default(),
            confidence: ConfidenceCoefficients::default(),
            warmup_runs: WARMUP_RUNS,
            real_time_target_secs: REAL_TIME_TARGET_SECS,
        }
    }
}

impl EngineConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quality.validate()?;
        self.confidence.validate()?;
        check_positive("real_time_target_secs", self.real_time_target_secs)
    }

    /// Parse and validate a JSON configuration
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> FusionResult<Self> {
        use alloc::string::ToString;

        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> FusionResult<alloc::string::String> {
        use alloc::string::ToString;

        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Quality assessor for this configuration
    pub fn assessor(&self) -> FusionResult<QualityAssessor> {
        QualityAssessor::new(self.quality)
    }

    /// Confidence weighter for this configuration
    pub fn weighter(&self) -> FusionResult<ConfidenceWeighter> {
        ConfidenceWeighter::new(self.confidence)
    }

    /// Confidence-weighted fusion for this configuration
    pub fn confidence_fusion(&self) -> FusionResult<ConfidenceWeightedFusion> {
        Ok(ConfidenceWeightedFusion::new(self.assessor()?, self.weighter()?))
    }
}
