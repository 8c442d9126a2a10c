//! The archival JSON format: the full record plus the catalog text it was
//! scored against, without any derived scores. Human-diffable, deterministic
//! key order, and the format the CLI reads records back from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::RubricCatalog;
use crate::error::{Error, Result};
use crate::record::{ensure_renderable, CriterionResult, ModuleResult, ObservationRecord};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct JsonRecord {
    date: String,
    colleague: String,
    subject: String,
    grade: String,
    topic: String,
    observer: String,
    school: String,
    profile_focus: Vec<String>,
    weights: IndexMap<String, f64>,
    modules: IndexMap<String, JsonModule>,
    strengths: String,
    next_steps: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct JsonModule {
    title: String,
    criteria: IndexMap<String, JsonCriterion>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct JsonCriterion {
    text: String,
    rating: u8,
    comment: String,
}

/// Serialize the record as pretty-printed UTF-8 JSON.
///
/// Criteria follow catalog order; computed scores are excluded (they are
/// derived, not persisted). Fails with `InvalidRecord` when the record
/// selects a module the catalog does not define.
pub fn render_json(record: &ObservationRecord, catalog: &RubricCatalog) -> Result<Vec<u8>> {
    ensure_renderable(record, catalog)?;

    let mut modules = IndexMap::new();
    for (module_id, module) in &record.modules {
        let spec = catalog.module(module_id)?;
        let criteria = spec
            .criteria
            .iter()
            .map(|(criterion_id, text)| {
                let result = module.criteria.get(criterion_id).cloned().unwrap_or_default();
                (
                    criterion_id.clone(),
                    JsonCriterion {
                        text: text.clone(),
                        rating: result.rating,
                        comment: result.comment,
                    },
                )
            })
            .collect();
        modules.insert(
            module_id.clone(),
            JsonModule {
                title: spec.title.clone(),
                criteria,
            },
        );
    }

    let payload = JsonRecord {
        date: record.date.clone(),
        colleague: record.colleague.clone(),
        subject: record.subject.clone(),
        grade: record.grade.clone(),
        topic: record.topic.clone(),
        observer: record.observer.clone(),
        school: record.school.clone(),
        profile_focus: record.profile_focus.clone(),
        weights: record.weights.clone(),
        modules,
        strengths: record.strengths.clone(),
        next_steps: record.next_steps.clone(),
    };

    Ok(serde_json::to_vec_pretty(&payload)?)
}

/// Decode a record previously written by [`render_json`].
///
/// Catalog-derived text is dropped on the way in; the record is checked
/// against the catalog so a file written for a different rubric fails with
/// `InvalidRecord` instead of producing a half-valid record.
pub fn parse_record(bytes: &[u8], catalog: &RubricCatalog) -> Result<ObservationRecord> {
    let payload: JsonRecord = serde_json::from_slice(bytes)?;

    let mut modules = IndexMap::new();
    for (module_id, module) in payload.modules {
        if !catalog.modules.contains_key(&module_id) {
            return Err(Error::InvalidRecord(module_id));
        }
        let criteria = module
            .criteria
            .into_iter()
            .map(|(criterion_id, criterion)| {
                (
                    criterion_id,
                    CriterionResult {
                        rating: criterion.rating,
                        comment: criterion.comment,
                    },
                )
            })
            .collect();
        modules.insert(
            module_id.clone(),
            ModuleResult {
                module_key: module_id,
                criteria,
            },
        );
    }

    Ok(ObservationRecord {
        date: payload.date,
        colleague: payload.colleague,
        subject: payload.subject,
        grade: payload.grade,
        topic: payload.topic,
        observer: payload.observer,
        school: payload.school,
        modules,
        strengths: payload.strengths,
        next_steps: payload.next_steps,
        profile_focus: payload.profile_focus,
        weights: payload.weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(catalog: &RubricCatalog) -> ObservationRecord {
        let mut record =
            ObservationRecord::for_focus(catalog, &["M1".to_string(), "M3".to_string()]).unwrap();
        record.date = "2026-02-03".to_string();
        record.colleague = "Frau Müller".to_string();
        record.subject = "Deutsch".to_string();
        record.grade = "7a".to_string();
        record.topic = "Kurzgeschichten".to_string();
        record.observer = "Herr Schmidt".to_string();
        record.strengths = "Klare Struktur".to_string();
        record.weights.insert("M1".to_string(), 1.2);
        record.modules["M1"].criteria["1.1"] = CriterionResult {
            rating: 3,
            comment: "Ziele an der Tafel".to_string(),
        };
        record
    }

    #[test]
    fn test_roundtrip_is_byte_identical() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);

        let encoded = render_json(&record, &catalog).unwrap();
        let decoded = parse_record(&encoded, &catalog).unwrap();
        let reencoded = render_json(&decoded, &catalog).unwrap();

        assert_eq!(encoded, reencoded);
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_output_excludes_derived_scores() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let text = String::from_utf8(render_json(&record, &catalog).unwrap()).unwrap();
        assert!(!text.contains("overall"));
        assert!(!text.contains("per_module"));
    }

    #[test]
    fn test_output_carries_catalog_text_and_title() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let text = String::from_utf8(render_json(&record, &catalog).unwrap()).unwrap();
        assert!(text.contains("Unterricht lernwirksam gestalten"));
        assert!(text.contains("Kompetenzziele sind für Lernende transparent."));
        assert!(text.contains("\"rating\": 3"));
    }

    #[test]
    fn test_render_unknown_module_fails() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        let stray = record.modules["M1"].clone();
        record.modules.insert("M9".to_string(), stray);

        let err = render_json(&record, &catalog).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(id) if id == "M9"));
    }

    #[test]
    fn test_parse_unknown_module_fails() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let text = String::from_utf8(render_json(&record, &catalog).unwrap()).unwrap();
        let tampered = text.replace("\"M3\"", "\"M9\"");

        let err = parse_record(tampered.as_bytes(), &catalog).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(id) if id == "M9"));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let text = String::from_utf8(render_json(&record, &catalog).unwrap()).unwrap();
        let tampered = text.replacen("\"date\"", "\"overall\": 2.5,\n  \"date\"", 1);

        assert!(parse_record(tampered.as_bytes(), &catalog).is_err());
    }

    #[test]
    fn test_criteria_follow_catalog_order() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        // Scramble the record's criterion order; the export re-sorts it.
        let module = record.modules.get_mut("M1").unwrap();
        module.criteria.move_index(0, 4);

        let text = String::from_utf8(render_json(&record, &catalog).unwrap()).unwrap();
        let pos_11 = text.find("\"1.1\"").unwrap();
        let pos_15 = text.find("\"1.5\"").unwrap();
        assert!(pos_11 < pos_15);
    }
}
