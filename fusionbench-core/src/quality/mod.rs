//! Per-Stream Signal Quality Assessment
//!
//! ## Overview
//!
//! The assessor turns one sample stream into a [`QualityReport`]: three
//! bounded scores that drive confidence weighting, plus descriptive statistics
//! and an informational grade.
//!
//! ```text
//! samples ──┬─→ SNR (dB)          signal power vs noise-estimate power
//!           ├─→ artifact [0,1]    centered rolling std / scale, clipped, averaged
//!           ├─→ drift    [0,1]    |window mean - baseline mean| / scale, clipped
//!           └─→ power, std, range
//! ```
//!
//! ## SNR
//!
//! ```text
//! snr_db = 10·log10( mean(x²) / max(ε, mean(n²)) )
//! ```
//!
//! The noise estimate `n` is the zero-mean residual `x - mean(x)` for a plain
//! assessment, or `x - reference` when a reference is supplied. A stream with
//! no power reports [`SNR_FLOOR_DB`] rather than `-inf`.
//!
//! ## Artifact Score
//!
//! Centered rolling sample std over `artifact_window` samples. Positions
//! where the window does not fit count as 0; the rest are divided by
//! `score_scale` and clipped to `[0, 1]`. The score is the mean over every
//! position, so edge positions always pull it down slightly.
//!
//! ## Drift Score
//!
//! Two variants, chosen once per assessor by [`DriftMode`]:
//!
//! - **Rolling**: each position's spanning window mean (see
//!   [`window::spanning_means`](crate::window::spanning_means), reduced per
//!   window rather than from running sums) against the
//!   mean of the first `drift_window` samples, averaged over all positions.
//! - **SingleShot**: the last `drift_window` samples' mean against the first.
//!
//! Scores from the two variants have different distributions and are not
//! comparable with each other. Streams shorter than `2·drift_window` score 0
//! in both.

mod grade;

pub use grade::{GradeBand, GradeThresholds, QualityGrade};

use alloc::{collections::BTreeMap, string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::quality::{
        ARTIFACT_WINDOW_SAMPLES, DRIFT_WINDOW_SAMPLES, NOISE_POWER_EPSILON, SCORE_SCALE,
        SNR_FLOOR_DB,
    },
    errors::{ConfigError, FusionResult},
    signal::{self, SignalStore},
    window,
};

/// Quality reports keyed by stream name
pub type QualityReports = BTreeMap<String, QualityReport>;

/// Drift scoring variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DriftMode {
    /// Mean over every position's spanning window
    #[default]
    Rolling,
    /// First window against last window
    SingleShot,
}

/// Tunable constants for quality scoring
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QualityConfig {
    /// Centered rolling std window (samples)
    pub artifact_window: usize,
    /// Baseline / comparison window (samples)
    pub drift_window: usize,
    /// Drift variant
    pub drift_mode: DriftMode,
    /// Scale mapping std and baseline shift onto `[0, 1]`
    pub score_scale: f64,
    /// Floor for noise power in the SNR ratio
    pub noise_epsilon: f64,
    /// Grade bands
    pub grades: GradeThresholds,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            artifact_window: ARTIFACT_WINDOW_SAMPLES,
            drift_window: DRIFT_WINDOW_SAMPLES,
            drift_mode: DriftMode::Rolling,
            score_scale: SCORE_SCALE,
            noise_epsilon: NOISE_POWER_EPSILON,
            grades: GradeThresholds::default(),
        }
    }
}

impl QualityConfig {
    /// Reject windows and constants the scoring cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.artifact_window < 2 {
            return Err(ConfigError::WindowTooSmall {
                name: "artifact",
                value: self.artifact_window,
            });
        }
        if self.drift_window < 1 {
            return Err(ConfigError::WindowTooSmall {
                name: "drift",
                value: self.drift_window,
            });
        }
        check_positive("score_scale", self.score_scale)?;
        check_positive("noise_epsilon", self.noise_epsilon)?;
        Ok(())
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Quality summary for one stream
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityReport {
    /// Signal-to-noise ratio (dB), never below [`SNR_FLOOR_DB`]
    pub snr_db: f64,
    /// Mean clipped rolling variability, `[0, 1]`
    pub artifact_score: f64,
    /// Baseline shift score, `[0, 1]`
    pub drift_score: f64,
    /// Mean squared sample value
    pub signal_power: f64,
    /// Population standard deviation
    pub signal_std: f64,
    /// Peak-to-peak range
    pub signal_range: f64,
    /// Informational grade
    pub grade: QualityGrade,
}

/// SNR in dB of `signal` against a noise estimate
///
/// `noise_power` is floored at `epsilon`. The result is clamped to
/// [`SNR_FLOOR_DB`] so a silent stream ranks last instead of returning `-inf`.
pub fn snr_db(signal: &[f64], noise: &[f64], epsilon: f64) -> f64 {
    let signal_power = signal::power(signal);
    let noise_power = signal::power(noise).max(epsilon);
    if signal_power <= 0.0 {
        log_debug!("snr: zero signal power, reporting floor");
        return SNR_FLOOR_DB;
    }
    (10.0 * libm::log10(signal_power / noise_power)).max(SNR_FLOOR_DB)
}

/// Clamp to `[0, 1]`; NaN counts as the worst score
#[inline]
fn clip_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

/// Stateless quality scorer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualityAssessor {
    config: QualityConfig,
}

impl QualityAssessor {
    /// Create an assessor after validating `config`
    pub fn new(config: QualityConfig) -> FusionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// SNR using the zero-mean residual as noise estimate
    pub fn snr_db(&self, samples: &[f64]) -> f64 {
        let m = signal::mean(samples);
        let noise: Vec<f64> = samples.iter().map(|v| v - m).collect();
        snr_db(samples, &noise, self.config.noise_epsilon)
    }

    /// Per-position artifact values in `[0, 1]` (incomplete windows are 0)
    pub fn artifact_profile(&self, samples: &[f64]) -> Vec<f64> {
        let scale = self.config.score_scale;
        window::centered_rolling_std(samples, self.config.artifact_window)
            .into_iter()
            .map(|std| std.map_or(0.0, |s| clip_unit(s / scale)))
            .collect()
    }

    /// Mean of [`artifact_profile`](Self::artifact_profile)
    pub fn artifact_score(&self, samples: &[f64]) -> f64 {
        signal::mean(&self.artifact_profile(samples))
    }

    /// Per-position rolling drift values in `[0, 1]`
    ///
    /// All zeros when the stream is shorter than `2·drift_window`.
    pub fn drift_profile(&self, samples: &[f64]) -> Vec<f64> {
        let w = self.config.drift_window;
        if samples.len() < 2 * w {
            return alloc::vec![0.0; samples.len()];
        }
        let scale = self.config.score_scale;
        let baseline = signal::mean(&samples[..w]);
        window::spanning_means(samples, w)
            .into_iter()
            .map(|m| m.map_or(0.0, |m| clip_unit(libm::fabs(m - baseline) / scale)))
            .collect()
    }

    /// Drift score under the configured [`DriftMode`]
    pub fn drift_score(&self, samples: &[f64]) -> f64 {
        let w = self.config.drift_window;
        if samples.len() < 2 * w {
            return 0.0;
        }
        match self.config.drift_mode {
            DriftMode::Rolling => signal::mean(&self.drift_profile(samples)),
            DriftMode::SingleShot => {
                let start = signal::mean(&samples[..w]);
                let end = signal::mean(&samples[samples.len() - w..]);
                clip_unit(libm::fabs(end - start) / self.config.score_scale)
            }
        }
    }

    /// Full report using the zero-mean residual as noise estimate
    pub fn assess(&self, samples: &[f64]) -> QualityReport {
        let snr = self.snr_db(samples);
        self.report(samples, snr)
    }

    /// Full report using `samples - reference` as noise estimate
    pub fn assess_against_reference(
        &self,
        samples: &[f64],
        reference: &[f64],
    ) -> FusionResult<QualityReport> {
        if samples.len() != reference.len() {
            return Err(crate::errors::ShapeError::ReferenceLength {
                expected: samples.len(),
                actual: reference.len(),
            }
            .into());
        }
        let noise: Vec<f64> =
            samples.iter().zip(reference).map(|(x, r)| x - r).collect();
        let snr = snr_db(samples, &noise, self.config.noise_epsilon);
        Ok(self.report(samples, snr))
    }

    /// Assess every stream of a store
    pub fn assess_store(&self, store: &SignalStore) -> QualityReports {
        store
            .iter()
            .map(|(name, samples)| {
                let report = self.assess(samples);
                log_debug!(
                    "quality[{}]: snr={:.2}dB artifact={:.3} drift={:.3} grade={}",
                    name, report.snr_db, report.artifact_score, report.drift_score, report.grade
                );
                (String::from(name), report)
            })
            .collect()
    }

    fn report(&self, samples: &[f64], snr_db: f64) -> QualityReport {
        let artifact_score = self.artifact_score(samples);
        let drift_score = self.drift_score(samples);
        QualityReport {
            snr_db,
            artifact_score,
            drift_score,
            signal_power: signal::power(samples),
            signal_std: signal::population_std(samples),
            signal_range: signal::peak_to_peak(samples),
            grade: self.config.grades.grade(snr_db, artifact_score, drift_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn sine(len: usize, amp: f64, period: f64) -> Vec<f64> {
        (0..len)
            .map(|i| amp * libm::sin(2.0 * core::f64::consts::PI * i as f64 / period))
            .collect()
    }

    #[test]
    fn snr_of_constant_stream_is_high() {
        let assessor = QualityAssessor::default();
        // Residual is exactly zero, so noise power sits on the epsilon floor
        let snr = assessor.snr_db(&[1.0; 256]);
        assert!((snr - 90.0).abs() < 1e-9);
    }

    #[test]
    fn snr_of_silent_stream_hits_floor() {
        let assessor = QualityAssessor::default();
        assert_eq!(assessor.snr_db(&[0.0; 64]), SNR_FLOOR_DB);

        let report = assessor.assess(&[0.0; 300]);
        assert_eq!(report.grade, QualityGrade::Poor);
        assert_eq!(report.artifact_score, 0.0);
        assert_eq!(report.drift_score, 0.0);
    }

    #[test]
    fn clip_unit_bounds_nan() {
        assert_eq!(clip_unit(f64::NAN), 1.0);
        assert_eq!(clip_unit(f64::INFINITY), 1.0);
        assert_eq!(clip_unit(-3.0), 0.0);
    }

    #[test]
    fn scores_bounded_near_f64_max() {
        let assessor = QualityAssessor::default();
        for samples in [alloc::vec![1.0e306; 512], alloc::vec![f64::MAX; 300]] {
            let report = assessor.assess(&samples);
            assert!((0.0..=1.0).contains(&report.artifact_score));
            assert!((0.0..=1.0).contains(&report.drift_score));
        }

        let alternating: Vec<f64> = (0..400)
            .map(|i| if i % 2 == 0 { f64::MAX } else { -f64::MAX })
            .collect();
        let report = assessor.assess(&alternating);
        assert!((0.0..=1.0).contains(&report.artifact_score));
        assert!((0.0..=1.0).contains(&report.drift_score));
    }

    #[test]
    fn rolling_drift_after_spike_reads_local_window() {
        let assessor = QualityAssessor::new(QualityConfig {
            drift_window: 16,
            ..QualityConfig::default()
        })
        .unwrap();
        let mut samples = alloc::vec![0.0; 16];
        samples.extend([1.0e17; 16]);
        samples.extend([0.1; 96]);

        // Window 84..116 holds only 0.1 against a zero baseline: 0.1 / 0.2
        let profile = assessor.drift_profile(&samples);
        assert!((profile[100] - 0.5).abs() < 1e-12);
        assert_eq!(profile[40], 1.0);
    }

    #[test]
    fn snr_against_reference() {
        let assessor = QualityAssessor::default();
        let reference = sine(200, 1.0, 50.0);
        let noisy: Vec<f64> = reference.iter().enumerate()
            .map(|(i, r)| r + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();

        let report = assessor.assess_against_reference(&noisy, &reference).unwrap();
        // signal power ≈ 0.5 + 0.01, noise power = 0.01
        assert!((report.snr_db - 10.0 * libm::log10(0.51 / 0.01)).abs() < 0.1);

        assert!(assessor.assess_against_reference(&noisy, &reference[..10]).is_err());
    }

    #[test]
    fn artifact_score_counts_edges_as_zero() {
        let config = QualityConfig { artifact_window: 4, ..QualityConfig::default() };
        let assessor = QualityAssessor::new(config).unwrap();

        // Large alternating signal saturates every complete window
        let samples: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 5.0 } else { -5.0 }).collect();
        let profile = assessor.artifact_profile(&samples);

        // W = 4 leaves 2 incomplete positions on the left and 1 on the right
        assert_eq!(&profile[..2], &[0.0, 0.0]);
        assert_eq!(profile[19], 0.0);
        assert!(profile[2..19].iter().all(|&v| v == 1.0));
        assert!((assessor.artifact_score(&samples) - 17.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn artifact_score_short_stream_is_zero() {
        let assessor = QualityAssessor::default();
        assert_eq!(assessor.artifact_score(&sine(32, 3.0, 8.0)), 0.0);
    }

    #[test]
    fn drift_detects_baseline_step() {
        let config = QualityConfig { drift_window: 16, ..QualityConfig::default() };
        let rolling = QualityAssessor::new(config).unwrap();
        let single = QualityAssessor::new(QualityConfig {
            drift_mode: DriftMode::SingleShot,
            ..config
        })
        .unwrap();

        let mut samples = alloc::vec![0.0; 64];
        samples.extend(core::iter::repeat(1.0).take(64));

        assert_eq!(single.drift_score(&samples), 1.0);
        let rolling_score = rolling.drift_score(&samples);
        assert!(rolling_score > 0.5 && rolling_score < 0.7);

        let flat = alloc::vec![2.0; 128];
        assert_eq!(rolling.drift_score(&flat), 0.0);
        assert_eq!(single.drift_score(&flat), 0.0);
    }

    #[test]
    fn drift_needs_two_windows() {
        let config = QualityConfig { drift_window: 16, ..QualityConfig::default() };
        let assessor = QualityAssessor::new(config).unwrap();
        let mut samples = alloc::vec![0.0; 16];
        samples.extend(core::iter::repeat(9.0).take(15));
        assert_eq!(assessor.drift_score(&samples), 0.0);
        assert!(assessor.drift_profile(&samples).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn config_validation() {
        let bad_window = QualityConfig { artifact_window: 1, ..QualityConfig::default() };
        assert!(QualityAssessor::new(bad_window).is_err());

        let bad_scale = QualityConfig { score_scale: 0.0, ..QualityConfig::default() };
        assert!(QualityAssessor::new(bad_scale).is_err());

        let bad_eps = QualityConfig { noise_epsilon: f64::NAN, ..QualityConfig::default() };
        assert!(QualityAssessor::new(bad_eps).is_err());
    }

    #[test]
    fn store_assessment_covers_every_stream() {
        let store = SignalStore::from_streams([
            ("clean", sine(512, 1.0, 64.0)),
            ("flat", alloc::vec![1.0; 512]),
        ])
        .unwrap();

        let reports = QualityAssessor::default().assess_store(&store);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports["flat"].grade, QualityGrade::Excellent);
        assert!(reports["clean"].signal_range > 1.9);
    }
}
