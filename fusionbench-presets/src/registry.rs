//! Preset Registry with Version Management
//!
//! Centralized, thread-safe preset lookup. Presets are keyed by qualified name
//! (`biosignal_v1`), and the registry tracks every version of each domain so
//! callers can pin a version or follow the latest.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::{presets, Preset, PresetError, PresetResult};

/// Registry bookkeeping for one preset
#[derive(Debug, Clone, PartialEq)]
pub struct PresetMetadata {
    /// Domain name (e.g., "automotive")
    pub name: String,
    /// Version tag (e.g., "v1")
    pub version: String,
    /// `<name>_<version>`
    pub qualified_name: String,
    /// Whether a newer preset supersedes this one
    pub deprecated: bool,
    /// Suggested replacement if deprecated
    pub replacement: Option<String>,
}

/// Thread-safe preset registry
pub struct PresetRegistry {
    /// Presets indexed by qualified name
    presets: RwLock<HashMap<String, (Preset, PresetMetadata)>>,

    /// Version lists (name -> [versions]) in registration order
    versions: RwLock<HashMap<String, Vec<String>>>,
}

fn poisoned<T>(_: T) -> PresetError {
    PresetError::Invalid("registry lock poisoned".to_string())
}

/// Numeric part of a `vN` tag, for ordering versions
fn version_number(version: &str) -> Option<u64> {
    version.strip_prefix('v')?.parse().ok()
}

impl PresetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            presets: RwLock::new(HashMap::new()),
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a validated preset
    ///
    /// A qualified name can only be registered once.
    pub fn register(&self, preset: Preset) -> PresetResult<()> {
        preset.validate()?;
        let qualified_name = preset.qualified_name();

        {
            let mut presets = self.presets.write().map_err(poisoned)?;
            if presets.contains_key(&qualified_name) {
                return Err(PresetError::Invalid(format!(
                    "preset {} already registered",
                    qualified_name
                )));
            }
            let metadata = PresetMetadata {
                name: preset.name.clone(),
                version: preset.version.clone(),
                qualified_name: qualified_name.clone(),
                deprecated: false,
                replacement: None,
            };
            presets.insert(qualified_name.clone(), (preset.clone(), metadata));
        }

        {
            let mut versions = self.versions.write().map_err(poisoned)?;
            versions
                .entry(preset.name.clone())
                .or_default()
                .push(preset.version.clone());
        }

        log::debug!("registered preset {} ({} streams)", qualified_name, preset.weights.len());
        Ok(())
    }

    /// Parse, validate and register a preset from JSON
    pub fn register_value(&self, value: Value) -> PresetResult<()> {
        self.register(Preset::from_value(value)?)
    }

    /// Get a preset by qualified name
    pub fn get(&self, qualified_name: &str) -> PresetResult<Preset> {
        let presets = self.presets.read().map_err(poisoned)?;
        presets
            .get(qualified_name)
            .map(|(preset, _)| preset.clone())
            .ok_or_else(|| PresetError::NotFound(qualified_name.to_string()))
    }

    /// Get the newest non-deprecated version of a domain's preset
    ///
    /// Versions compare by number, so `v10` is newer than `v2`. Tags without
    /// a number rank below numbered ones, then by registration order. A
    /// deprecated version is never returned; pin it with [`get`](Self::get).
    pub fn get_latest(&self, name: &str) -> PresetResult<Preset> {
        let versions = self.versions.read().map_err(poisoned)?;
        let list = versions
            .get(name)
            .ok_or_else(|| PresetError::NotFound(format!("no versions of {}", name)))?;

        let presets = self.presets.read().map_err(poisoned)?;
        list.iter()
            .enumerate()
            .filter_map(|(i, v)| {
                let (preset, metadata) = presets.get(&format!("{}_{}", name, v))?;
                (!metadata.deprecated).then_some((version_number(v), i, preset))
            })
            .max_by_key(|(number, i, _)| (*number, *i))
            .map(|(_, _, preset)| preset.clone())
            .ok_or_else(|| PresetError::NotFound(format!("no active versions of {}", name)))
    }

    /// All registered versions of a domain, in registration order
    pub fn get_versions(&self, name: &str) -> PresetResult<Vec<String>> {
        let versions = self.versions.read().map_err(poisoned)?;
        Ok(versions.get(name).cloned().unwrap_or_default())
    }

    /// Registry metadata for a preset
    pub fn get_metadata(&self, qualified_name: &str) -> PresetResult<PresetMetadata> {
        let presets = self.presets.read().map_err(poisoned)?;
        presets
            .get(qualified_name)
            .map(|(_, metadata)| metadata.clone())
            .ok_or_else(|| PresetError::NotFound(qualified_name.to_string()))
    }

    /// Qualified names of every registered preset, sorted
    pub fn names(&self) -> PresetResult<Vec<String>> {
        let presets = self.presets.read().map_err(poisoned)?;
        let mut names: Vec<String> = presets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Mark a preset as deprecated
    ///
    /// It stays reachable by qualified name but drops out of
    /// [`get_latest`](Self::get_latest).
    pub fn deprecate(&self, qualified_name: &str, replacement: Option<String>) -> PresetResult<()> {
        let mut presets = self.presets.write().map_err(poisoned)?;
        let (_, metadata) = presets
            .get_mut(qualified_name)
            .ok_or_else(|| PresetError::NotFound(qualified_name.to_string()))?;

        metadata.deprecated = true;
        metadata.replacement = replacement;
        Ok(())
    }

    /// Register every built-in preset
    pub fn load_defaults(&self) -> PresetResult<()> {
        for value in presets::builtin() {
            self.register_value(value)?;
        }
        Ok(())
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn preset(name: &str, version: &str, weights: Value) -> Value {
        json!({
            "name": name,
            "version": version,
            "sampling_rate_hz": 50.0,
            "real_time_target_ms": 20.0,
            "weights": weights
        })
    }

    #[test]
    fn defaults_load() {
        let registry = PresetRegistry::new();
        registry.load_defaults().unwrap();
        assert_eq!(registry.names().unwrap(), ["automotive_v1", "biosignal_v1"]);
        assert_eq!(registry.get("automotive_v1").unwrap().sampling_rate_hz, 100.0);
        assert!(matches!(registry.get("marine_v1"), Err(PresetError::NotFound(_))));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let registry = PresetRegistry::new();
        registry.load_defaults().unwrap();
        assert!(matches!(
            registry.register_value(presets::automotive_v1()),
            Err(PresetError::Invalid(_))
        ));
    }

    #[test]
    fn latest_version_is_numeric() {
        let registry = PresetRegistry::new();
        for version in ["v2", "v10", "v1"] {
            registry
                .register_value(preset("marine", version, json!({ "sonar": 1.0 })))
                .unwrap();
        }

        assert_eq!(registry.get_latest("marine").unwrap().version, "v10");
        assert_eq!(registry.get_versions("marine").unwrap(), ["v2", "v10", "v1"]);
        assert!(registry.get_latest("aviation").is_err());
    }

    #[test]
    fn deprecation_is_recorded() {
        let registry = PresetRegistry::new();
        registry.load_defaults().unwrap();
        registry
            .deprecate("biosignal_v1", Some("biosignal_v2".to_string()))
            .unwrap();

        let metadata = registry.get_metadata("biosignal_v1").unwrap();
        assert!(metadata.deprecated);
        assert_eq!(metadata.replacement.as_deref(), Some("biosignal_v2"));
        assert!(registry.deprecate("missing_v1", None).is_err());
    }

    #[test]
    fn latest_skips_deprecated_versions() {
        let registry = PresetRegistry::new();
        for version in ["v1", "v2", "v3"] {
            registry
                .register_value(preset("marine", version, json!({ "sonar": 1.0 })))
                .unwrap();
        }
        registry
            .deprecate("marine_v3", Some("marine_v2".to_string()))
            .unwrap();

        assert_eq!(registry.get_latest("marine").unwrap().version, "v2");
        assert_eq!(registry.get("marine_v3").unwrap().version, "v3");

        registry.deprecate("marine_v2", None).unwrap();
        registry.deprecate("marine_v1", None).unwrap();
        assert!(matches!(
            registry.get_latest("marine"),
            Err(PresetError::NotFound(_))
        ));
    }
}
