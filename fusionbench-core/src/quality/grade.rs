//! Ordinal quality grades
//!
//! Informational only: fusion weights come from the continuous scores, never
//! from the grade.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::quality::{
    GRADE_EXCELLENT_SNR_DB, GRADE_EXCELLENT_MAX_SCORE,
    GRADE_GOOD_SNR_DB, GRADE_GOOD_MAX_SCORE,
    GRADE_FAIR_SNR_DB, GRADE_FAIR_MAX_SCORE,
};

/// Four-level stream quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualityGrade {
    /// Below every band
    Poor,
    /// Usable with caution
    Fair,
    /// Normal operating quality
    Good,
    /// Clean, stable signal
    Excellent,
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        };
        f.write_str(name)
    }
}

/// One grade band: SNR must exceed `min_snr_db` and both artifact and drift
/// scores must stay below `max_score`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradeBand {
    /// Exclusive SNR lower bound (dB)
    pub min_snr_db: f64,
    /// Exclusive upper bound for artifact and drift scores
    pub max_score: f64,
}

impl GradeBand {
    fn admits(&self, snr_db: f64, artifact: f64, drift: f64) -> bool {
        snr_db > self.min_snr_db && artifact < self.max_score && drift < self.max_score
    }
}

/// Bands checked from best to worst
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GradeThresholds {
    /// Band for `Excellent`
    pub excellent: GradeBand,
    /// Band for `Good`
    pub good: GradeBand,
    /// Band for `Fair`
    pub fair: GradeBand,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            excellent: GradeBand {
                min_snr_db: GRADE_EXCELLENT_SNR_DB,
                max_score: GRADE_EXCELLENT_MAX_SCORE,
            },
            good: GradeBand {
                min_snr_db: GRADE_GOOD_SNR_DB,
                max_score: GRADE_GOOD_MAX_SCORE,
            },
            fair: GradeBand {
                min_snr_db: GRADE_FAIR_SNR_DB,
                max_score: GRADE_FAIR_MAX_SCORE,
            },
        }
    }
}

impl GradeThresholds {
    /// Classify a stream from its scores
    ///
    /// A NaN in any input fails every comparison and grades `Poor`.
    pub fn grade(&self, snr_db: f64, artifact: f64, drift: f64) -> QualityGrade {
        if self.excellent.admits(snr_db, artifact, drift) {
            QualityGrade::Excellent
        } else if self.good.admits(snr_db, artifact, drift) {
            QualityGrade::Good
        } else if self.fair.admits(snr_db, artifact, drift) {
            QualityGrade::Fair
        } else {
            QualityGrade::Poor
        }
    }
}
