//! Versioned Domain Presets for FusionBench
//!
//! ## Overview
//!
//! A preset captures what one application domain knows about its sensors:
//! which streams exist, how they combine into the reference signal, how fast
//! they are sampled and how quickly fusion must finish. Presets are data, not
//! code. The engine is domain-agnostic, and a new domain is one JSON document:
//!
//! ```json
//! {
//!   "name": "biosignal",
//!   "version": "v1",
//!   "sampling_rate_hz": 240.0,
//!   "real_time_target_ms": 5.0,
//!   "weights": { "ecg": 0.5, "eeg": 0.3, "emg": 0.2 }
//! }
//! ```
//!
//! ## What a Preset Yields
//!
//! - a [`FixedWeightFusion`] applying the domain weights (the oracle scheme)
//! - an [`EngineConfig`] carrying the domain latency budget and any quality
//!   or confidence overrides
//! - the reference combination of a store's streams, for benchmarking
//!
//! ## Versioning
//!
//! Presets are registered under `<name>_<version>` (`automotive_v1`). Weights
//! for a domain may be retuned, but a published version never changes; a new
//! tuning is a new version, and [`PresetRegistry::get_latest`] picks the
//! newest.
//!
//! ## Usage Example
//!
//! ```rust
//! use fusionbench_core::SignalStore;
//! use fusionbench_presets::PresetRegistry;
//!
//! let registry = PresetRegistry::new();
//! registry.load_defaults()?;
//!
//! let preset = registry.get_latest("biosignal")?;
//! let store = SignalStore::from_streams([
//!     ("ecg", vec![1.0, 0.0]),
//!     ("eeg", vec![0.0, 1.0]),
//!     ("emg", vec![1.0, 1.0]),
//! ])?;
//!
//! let reference = preset.reference(&store)?;
//! assert!((reference[0] - 0.7).abs() < 1e-12);
//! assert_eq!(preset.engine_config()?.real_time_target_secs, 0.005);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fusionbench_core::{
    apply_weights, constants::fusion::COEFFICIENT_SUM_TOLERANCE, ConfidenceCoefficients,
    EngineConfig, FixedWeightFusion, FusionError, QualityConfig, SignalStore, WeightSet,
};

pub mod presets;
pub mod registry;

pub use registry::{PresetMetadata, PresetRegistry};

/// Result type for preset operations
pub type PresetResult<T> = Result<T, PresetError>;

/// Preset-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum PresetError {
    /// Preset JSON could not be parsed
    #[error("failed to parse preset: {0}")]
    Parse(String),

    /// No preset registered under this name
    #[error("preset not found: {0}")]
    NotFound(String),

    /// Preset parsed but its contents are unusable
    #[error("invalid preset: {0}")]
    Invalid(String),

    /// Error from the fusion engine
    #[error("fusion error: {0}")]
    Fusion(#[from] FusionError),
}

/// One domain's sensor weights, rates and budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Domain name (`automotive`)
    pub name: String,
    /// Version tag (`v1`)
    pub version: String,
    /// Human-readable summary
    #[serde(default)]
    pub description: String,
    /// Sampling rate the weights were tuned for (Hz)
    pub sampling_rate_hz: f64,
    /// Fusion latency budget (ms)
    pub real_time_target_ms: f64,
    /// Reference weights by stream name; must sum to 1
    pub weights: BTreeMap<String, f64>,
    /// Quality scoring overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityConfig>,
    /// Confidence blend overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceCoefficients>,
}

impl Preset {
    /// Parse and validate a preset from a JSON value
    pub fn from_value(value: Value) -> PresetResult<Self> {
        let preset: Self =
            serde_json::from_value(value).map_err(|e| PresetError::Parse(e.to_string()))?;
        preset.validate()?;
        Ok(preset)
    }

    /// Parse and validate a preset from JSON text
    pub fn from_json(json: &str) -> PresetResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| PresetError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> PresetResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PresetError::Parse(e.to_string()))
    }

    /// Registry key, `<name>_<version>`
    pub fn qualified_name(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    /// Stream names the preset expects, in fusion order
    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Check names, rates, budget and weights
    pub fn validate(&self) -> PresetResult<()> {
        if self.name.is_empty() || self.version.is_empty() {
            return Err(PresetError::Invalid("name and version are required".into()));
        }
        if !(self.sampling_rate_hz.is_finite() && self.sampling_rate_hz > 0.0) {
            return Err(PresetError::Invalid(format!(
                "{}: sampling rate must be positive, got {}",
                self.qualified_name(),
                self.sampling_rate_hz
            )));
        }
        if self.weights.is_empty() {
            return Err(PresetError::Invalid(format!(
                "{}: no stream weights",
                self.qualified_name()
            )));
        }

        let weights = self.weight_set()?;
        if (weights.total() - 1.0).abs() > COEFFICIENT_SUM_TOLERANCE {
            return Err(PresetError::Invalid(format!(
                "{}: weights sum to {}, expected 1",
                self.qualified_name(),
                weights.total()
            )));
        }

        // Covers the latency budget and any overrides
        self.engine_config()?;
        Ok(())
    }

    /// Weights as a [`WeightSet`]
    pub fn weight_set(&self) -> PresetResult<WeightSet> {
        Ok(WeightSet::from_pairs(
            self.weights.iter().map(|(k, v)| (k.clone(), *v)),
        )?)
    }

    /// Fixed-weight fusion applying the preset weights
    pub fn fusion(&self) -> PresetResult<FixedWeightFusion> {
        Ok(FixedWeightFusion::new(self.weight_set()?))
    }

    /// Engine configuration with the preset budget and overrides applied
    pub fn engine_config(&self) -> PresetResult<EngineConfig> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            quality: self.quality.unwrap_or(defaults.quality),
            confidence: self.confidence.unwrap_or(defaults.confidence),
            real_time_target_secs: self.real_time_target_ms / 1000.0,
            ..defaults
        };
        config.validate().map_err(FusionError::from)?;
        Ok(config)
    }

    /// Reference combination of `store`'s streams under the preset weights
    pub fn reference(&self, store: &SignalStore) -> PresetResult<Vec<f64>> {
        Ok(apply_weights(store, &self.weight_set()?)?)
    }
}
