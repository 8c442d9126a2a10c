use crate::catalog::{RubricCatalog, MAX_RATING};
use crate::error::{Error, Result};
use crate::record::ObservationRecord;

/// Validate a record against the catalog.
/// Returns all validation errors at once (not just the first).
pub fn validate_record(
    record: &ObservationRecord,
    catalog: &RubricCatalog,
) -> std::result::Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (module_id, module) in &record.modules {
        let spec = match catalog.modules.get(module_id) {
            Some(spec) => spec,
            None => {
                errors.push(format!(
                    "modules.{}: not defined in the catalog",
                    module_id
                ));
                continue;
            }
        };

        if module.module_key != *module_id {
            errors.push(format!(
                "modules.{}: module_key is '{}'",
                module_id, module.module_key
            ));
        }

        for criterion_id in spec.criteria.keys() {
            if !module.criteria.contains_key(criterion_id) {
                errors.push(format!(
                    "modules.{}.criteria: missing entry for '{}'",
                    module_id, criterion_id
                ));
            }
        }

        for (criterion_id, result) in &module.criteria {
            if !spec.criteria.contains_key(criterion_id) {
                errors.push(format!(
                    "modules.{}.criteria.{}: not defined in the catalog",
                    module_id, criterion_id
                ));
            }
            if result.rating > MAX_RATING {
                errors.push(format!(
                    "modules.{}.criteria.{}.rating: {} is outside the 0-{} scale",
                    module_id, criterion_id, result.rating, MAX_RATING
                ));
            }
        }
    }

    for (module_id, weight) in &record.weights {
        if !catalog.modules.contains_key(module_id) {
            errors.push(format!("weights.{}: not defined in the catalog", module_id));
        }
        if *weight < 0.0 {
            errors.push(format!("weights.{}: must be non-negative", module_id));
        }
    }

    for module_id in &record.profile_focus {
        if !catalog.modules.contains_key(module_id) {
            errors.push(format!(
                "profile_focus: '{}' is not defined in the catalog",
                module_id
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The strict precondition shared by all three renderers: every module the
/// record selects must exist in the catalog. Lesser mismatches (missing
/// criterion entries, stray criteria) are tolerated at render time.
pub fn ensure_renderable(record: &ObservationRecord, catalog: &RubricCatalog) -> Result<()> {
    for module_id in record.modules.keys() {
        if !catalog.modules.contains_key(module_id) {
            return Err(Error::InvalidRecord(module_id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CriterionResult, ModuleResult};
    use indexmap::IndexMap;

    fn sample_record(catalog: &RubricCatalog) -> ObservationRecord {
        ObservationRecord::for_focus(catalog, &["M1".to_string()]).unwrap()
    }

    #[test]
    fn test_valid_record() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        assert!(validate_record(&record, &catalog).is_ok());
        assert!(ensure_renderable(&record, &catalog).is_ok());
    }

    #[test]
    fn test_unknown_module_is_reported() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        record.modules.insert(
            "M9".to_string(),
            ModuleResult {
                module_key: "M9".to_string(),
                criteria: IndexMap::new(),
            },
        );

        let errors = validate_record(&record, &catalog).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("modules.M9")));

        let err = ensure_renderable(&record, &catalog).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(id) if id == "M9"));
    }

    #[test]
    fn test_missing_criterion_entry_is_reported() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        record.modules["M1"].criteria.shift_remove("1.3");

        let errors = validate_record(&record, &catalog).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("missing entry for '1.3'")));
        // Renderers still accept this record; they fill the gap with defaults.
        assert!(ensure_renderable(&record, &catalog).is_ok());
    }

    #[test]
    fn test_rating_out_of_scale_is_reported() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        record.modules["M1"].criteria["1.1"] = CriterionResult {
            rating: 5,
            comment: String::new(),
        };

        let errors = validate_record(&record, &catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("modules.M1.criteria.1.1.rating")));
    }

    #[test]
    fn test_negative_weight_is_reported() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        record.weights.insert("M1".to_string(), -0.5);

        let errors = validate_record(&record, &catalog).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("weights.M1")));
    }

    #[test]
    fn test_all_errors_reported_at_once() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        record.modules["M1"].criteria["1.2"] = CriterionResult {
            rating: 9,
            comment: String::new(),
        };
        record.weights.insert("M8".to_string(), 1.0);
        record.profile_focus.push("M8".to_string());

        let errors = validate_record(&record, &catalog).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
