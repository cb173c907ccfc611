//! Confidence Weighting from Signal Quality
//!
//! ## Overview
//!
//! Each stream's [`QualityReport`] is blended into one raw confidence value,
//! and the raw values are normalized into a [`WeightSet`]:
//!
//! ```text
//! raw[s] = c_snr   · clip(snr_db / snr_ref, 0, 1)     signal clarity
//!        + c_art   · (1 - artifact_score)             artifact absence
//!        + c_drift · (1 - drift_score)                baseline stability
//!
//! w[s]   = raw[s] / Σ raw
//! ```
//!
//! With the defaults `c_snr = 0.6, c_art = 0.25, c_drift = 0.15` and
//! `snr_ref = 25 dB` a clean, stable stream at 25 dB or better scores 1.0.
//!
//! ## Degenerate Sums
//!
//! If every stream scores zero the normalization has nothing to divide by.
//! Every stream then gets `1/n`; this is logged, not returned as an error, so
//! a sweep over many noise conditions never aborts on one hopeless input.
//!
//! ## Agreeing Samples
//!
//! The weights sum to 1, so wherever every stream holds the same value the
//! fused sample is that value. It is copied through rather than recomputed as
//! `Σ w·x`, which would round differently. Fusing copies of one stream gives
//! back that stream bit for bit.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::fusion::{
        COEFFICIENT_SUM_TOLERANCE, CONFIDENCE_WEIGHT_ARTIFACT, CONFIDENCE_WEIGHT_DRIFT,
        CONFIDENCE_WEIGHT_SNR, SNR_REFERENCE_DB,
    },
    errors::{ConfigError, FusionResult, ShapeError},
    fusion::{apply_weights, FusionOutput, FusionStrategy, WeightSet},
    quality::{check_positive, QualityAssessor, QualityReport, QualityReports},
    signal::SignalStore,
};

/// Blend coefficients for raw confidence
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfidenceCoefficients {
    /// Weight of the normalized SNR term
    pub snr: f64,
    /// Weight of the artifact-absence term
    pub artifact: f64,
    /// Weight of the baseline-stability term
    pub drift: f64,
    /// SNR (dB) at which the SNR term saturates
    pub snr_reference_db: f64,
}

impl Default for ConfidenceCoefficients {
    fn default() -> Self {
        Self {
            snr: CONFIDENCE_WEIGHT_SNR,
            artifact: CONFIDENCE_WEIGHT_ARTIFACT,
            drift: CONFIDENCE_WEIGHT_DRIFT,
            snr_reference_db: SNR_REFERENCE_DB,
        }
    }
}

impl ConfidenceCoefficients {
    /// Coefficients must be non-negative and sum to 1; the SNR reference
    /// must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.snr + self.artifact + self.drift;
        let all_valid = [self.snr, self.artifact, self.drift]
            .iter()
            .all(|c| c.is_finite() && *c >= 0.0);
        if !all_valid || libm::fabs(sum - 1.0) > COEFFICIENT_SUM_TOLERANCE {
            return Err(ConfigError::CoefficientSum { sum });
        }
        check_positive("snr_reference_db", self.snr_reference_db)
    }
}

/// Converts quality reports into normalized fusion weights
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfidenceWeighter {
    coefficients: ConfidenceCoefficients,
}

impl ConfidenceWeighter {
    /// Create a weighter after validating the coefficients
    pub fn new(coefficients: ConfidenceCoefficients) -> FusionResult<Self> {
        coefficients.validate()?;
        Ok(Self { coefficients })
    }

    /// Active coefficients
    pub fn coefficients(&self) -> &ConfidenceCoefficients {
        &self.coefficients
    }

    /// Un-normalized confidence in `[0, 1]` for one report
    pub fn raw_confidence(&self, report: &QualityReport) -> f64 {
        let c = &self.coefficients;
        let snr_term = (report.snr_db / c.snr_reference_db).clamp(0.0, 1.0);
        let confidence = c.snr * snr_term
            + c.artifact * (1.0 - report.artifact_score)
            + c.drift * (1.0 - report.drift_score);
        // NaN scores count as no confidence
        if confidence.is_nan() { 0.0 } else { confidence.max(0.0) }
    }

    /// Normalized weights, one per report
    ///
    /// Falls back to equal weights when the raw confidences sum to zero.
    pub fn weights(&self, reports: &QualityReports) -> FusionResult<WeightSet> {
        if reports.is_empty() {
            return Err(ShapeError::EmptyStore.into());
        }

        let raw: alloc::vec::Vec<(&str, f64)> = reports
            .iter()
            .map(|(name, report)| (name.as_str(), self.raw_confidence(report)))
            .collect();
        let total: f64 = raw.iter().map(|(_, c)| c).sum();

        if !(total.is_finite() && total > 0.0) {
            log_warn!(
                "confidence sum is {} across {} streams, falling back to uniform weights",
                total,
                raw.len()
            );
            return Ok(WeightSet::uniform(raw.iter().map(|(n, _)| *n)));
        }

        Ok(raw
            .into_iter()
            .map(|(name, c)| (alloc::string::String::from(name), c / total))
            .collect())
    }
}

/// Assess, weigh and sum: the quality-aware fusion scheme
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfidenceWeightedFusion {
    assessor: QualityAssessor,
    weighter: ConfidenceWeighter,
}

impl ConfidenceWeightedFusion {
    /// Combine an assessor and a weighter
    pub fn new(assessor: QualityAssessor, weighter: ConfidenceWeighter) -> Self {
        Self { assessor, weighter }
    }

    /// Quality assessor in use
    pub fn assessor(&self) -> &QualityAssessor {
        &self.assessor
    }

    /// Weighter in use
    pub fn weighter(&self) -> &ConfidenceWeighter {
        &self.weighter
    }
}

impl FusionStrategy for ConfidenceWeightedFusion {
    fn fuse(&self, store: &SignalStore) -> FusionResult<FusionOutput> {
        let quality = self.assessor.assess_store(store);
        let weights = self.weighter.weights(&quality)?;
        let mut fused = apply_weights(store, &weights)?;
        keep_agreeing_samples(store, &mut fused);
        Ok(FusionOutput {
            fused,
            weights,
            quality: Some(quality),
        })
    }
}

/// Overwrite `fused[i]` with the common value where all streams agree
fn keep_agreeing_samples(store: &SignalStore, fused: &mut [f64]) {
    let mut streams = store.iter().map(|(_, samples)| samples);
    let Some(first) = streams.next() else {
        return;
    };
    let rest: Vec<&[f64]> = streams.collect();
    for (i, out) in fused.iter_mut().enumerate() {
        let x = first[i];
        if rest.iter().all(|s| s[i] == x) {
            *out = x;
        }
    }
}
