use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{RubricCatalog, MAX_RATING};
use crate::record::Profile;

/// Tool configuration.
///
/// Everything is optional: without a config file the builtin rubric and the
/// stock profiles apply, the file only customizes them.
///
/// Example YAML:
/// ```yaml
/// profiles:
///   "Frau Müller":
///     focus: ["M2"]
///     weights: { M1: 1.0, M2: 1.3, M3: 1.0, M4: 1.0 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Replaces the builtin rubric when present.
    #[serde(default)]
    pub catalog: Option<RubricCatalog>,

    /// Named focus/weight presets per observed colleague.
    #[serde(default)]
    pub profiles: IndexMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = IndexMap::new();
        profiles.insert(
            "Beispiel: Frau Müller".to_string(),
            Profile {
                focus: vec!["M2".to_string()],
                weights: [("M1", 1.0), ("M2", 1.3), ("M3", 1.0), ("M4", 1.0)]
                    .into_iter()
                    .map(|(id, w)| (id.to_string(), w))
                    .collect(),
            },
        );
        profiles.insert(
            "Beispiel: Herr Schmidt".to_string(),
            Profile {
                focus: vec!["M1".to_string(), "M4".to_string()],
                weights: [("M1", 1.2), ("M2", 1.0), ("M3", 1.0), ("M4", 1.2)]
                    .into_iter()
                    .map(|(id, w)| (id.to_string(), w))
                    .collect(),
            },
        );
        Self {
            catalog: None,
            profiles,
        }
    }
}

impl Config {
    /// The effective rubric: the configured one, or the builtin default.
    pub fn catalog(&self) -> RubricCatalog {
        self.catalog.clone().unwrap_or_default()
    }

    /// Validate the configuration at startup.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let catalog = self.catalog();
        let scale_len = usize::from(MAX_RATING) + 1;

        if catalog.report_title.is_empty() {
            errors.push("catalog.report_title: must not be empty".to_string());
        }
        if catalog.modules.is_empty() {
            errors.push("catalog.modules: must define at least one module".to_string());
        }
        for (module_id, spec) in &catalog.modules {
            if spec.criteria.is_empty() {
                errors.push(format!(
                    "catalog.modules.{}: must define at least one criterion",
                    module_id
                ));
            }
        }
        if catalog.rating_labels.len() != scale_len {
            errors.push(format!(
                "catalog.rating_labels: expected {} entries, found {}",
                scale_len,
                catalog.rating_labels.len()
            ));
        }
        if catalog.suggested_comments.len() != scale_len {
            errors.push(format!(
                "catalog.suggested_comments: expected {} entries, found {}",
                scale_len,
                catalog.suggested_comments.len()
            ));
        }

        for (name, profile) in &self.profiles {
            for module_id in &profile.focus {
                if !catalog.modules.contains_key(module_id) {
                    errors.push(format!(
                        "profiles.{}.focus: unknown module '{}'",
                        name, module_id
                    ));
                }
            }
            for (module_id, weight) in &profile.weights {
                if !catalog.modules.contains_key(module_id) {
                    errors.push(format!(
                        "profiles.{}.weights: unknown module '{}'",
                        name, module_id
                    ));
                }
                if *weight < 0.0 {
                    errors.push(format!(
                        "profiles.{}.weights.{}: must be non-negative",
                        name, module_id
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
