use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::RubricCatalog;
use crate::error::Result;

/// Score and comment for a single rubric criterion.
///
/// Starts at rating 0 with an empty comment and is filled in by whoever owns
/// the record (form UI, CLI, hand-edited file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriterionResult {
    pub rating: u8,
    pub comment: String,
}

/// All criterion results for one observed module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleResult {
    pub module_key: String,

    /// Criterion ID to its result, in catalog order.
    pub criteria: IndexMap<String, CriterionResult>,
}

/// One completed (or in-progress) observation form.
///
/// Fully owned by the caller; the core never stores or mutates it. Scores are
/// derived on demand, never kept on the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationRecord {
    pub date: String,
    pub colleague: String,
    pub subject: String,
    pub grade: String,
    pub topic: String,
    pub observer: String,
    pub school: String,
    pub modules: IndexMap<String, ModuleResult>,
    pub strengths: String,
    pub next_steps: String,
    pub profile_focus: Vec<String>,
    pub weights: IndexMap<String, f64>,
}

impl ObservationRecord {
    /// Build an empty record with one result slot per catalog criterion of
    /// every selected module. An empty `focus` selects the whole rubric.
    pub fn for_focus(catalog: &RubricCatalog, focus: &[String]) -> Result<Self> {
        let selected: Vec<String> = if focus.is_empty() {
            catalog.module_ids().map(str::to_string).collect()
        } else {
            focus.to_vec()
        };

        let mut modules = IndexMap::new();
        for module_id in &selected {
            let spec = catalog.module(module_id)?;
            let criteria = spec
                .criteria
                .keys()
                .map(|criterion_id| (criterion_id.clone(), CriterionResult::default()))
                .collect();
            modules.insert(
                module_id.clone(),
                ModuleResult {
                    module_key: module_id.clone(),
                    criteria,
                },
            );
        }

        Ok(Self {
            modules,
            profile_focus: selected,
            ..Self::default()
        })
    }
}

/// Named preset of focus modules and weights for an observed colleague.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub focus: Vec<String>,

    #[serde(default)]
    pub weights: IndexMap<String, f64>,
}
