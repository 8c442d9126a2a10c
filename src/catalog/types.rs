use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest rating on the scale. Ratings run 0..=MAX_RATING.
pub const MAX_RATING: u8 = 4;

/// One rubric dimension: a title plus its ordered criteria.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    pub title: String,

    /// Criterion ID (e.g. "1.1") to the statement being scored.
    pub criteria: IndexMap<String, String>,
}

/// Rubric reference data: module and criterion text, scale labels and the
/// suggested comment per rating.
///
/// Loaded once (builtin default or from the config file) and never mutated
/// afterwards. Renderers and the record constructor only read it, so the
/// catalog is reusable across different rubrics without code changes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RubricCatalog {
    /// Heading rendered on top of every report.
    pub report_title: String,

    /// Module ID (e.g. "M1") to its spec, in rubric order.
    pub modules: IndexMap<String, ModuleSpec>,

    /// Scale label per rating, indexed by rating.
    pub rating_labels: Vec<String>,

    /// Suggested comment per rating, indexed by rating.
    pub suggested_comments: Vec<String>,
}

impl RubricCatalog {
    /// Module IDs in rubric order.
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn module(&self, module_id: &str) -> Result<&ModuleSpec> {
        self.modules
            .get(module_id)
            .ok_or_else(|| Error::UnknownModule(module_id.to_string()))
    }

    pub fn title(&self, module_id: &str) -> Result<&str> {
        Ok(self.module(module_id)?.title.as_str())
    }

    /// Ordered (criterion ID, text) pairs for a module.
    pub fn criteria(&self, module_id: &str) -> Result<&IndexMap<String, String>> {
        Ok(&self.module(module_id)?.criteria)
    }

    pub fn criterion_text(&self, module_id: &str, criterion_id: &str) -> Result<&str> {
        self.criteria(module_id)?
            .get(criterion_id)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownCriterion {
                module: module_id.to_string(),
                criterion: criterion_id.to_string(),
            })
    }

    /// Scale label for a rating, e.g. "0 – nicht beobachtbar".
    pub fn rating_label(&self, rating: u8) -> Result<&str> {
        scale_entry(&self.rating_labels, rating)
    }

    /// Suggested comment for a rating, offered to the observer as a starting
    /// point when none has been written yet.
    pub fn suggested_comment(&self, rating: u8) -> Result<&str> {
        scale_entry(&self.suggested_comments, rating)
    }
}

fn scale_entry(entries: &[String], rating: u8) -> Result<&str> {
    if rating > MAX_RATING {
        return Err(Error::RatingOutOfRange(rating));
    }
    entries
        .get(usize::from(rating))
        .map(String::as_str)
        .ok_or(Error::RatingOutOfRange(rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_module_ids_in_rubric_order() {
        let catalog = RubricCatalog::default();
        let ids: Vec<&str> = catalog.module_ids().collect();
        assert_eq!(ids, vec!["M1", "M2", "M3", "M4"]);
    }

    #[test]
    fn test_title_known_module() {
        let catalog = RubricCatalog::default();
        assert_eq!(
            catalog.title("M1").unwrap(),
            "Schülerinnen und Schüler aktivieren"
        );
    }

    #[test]
    fn test_title_unknown_module() {
        let catalog = RubricCatalog::default();
        let err = catalog.title("M9").unwrap_err();
        assert!(matches!(err, Error::UnknownModule(id) if id == "M9"));
    }

    #[test]
    fn test_criteria_ordered() {
        let catalog = RubricCatalog::default();
        let ids: Vec<&String> = catalog.criteria("M3").unwrap().keys().collect();
        assert_eq!(ids, vec!["3.1", "3.2", "3.3", "3.4", "3.5"]);
    }

    #[test]
    fn test_criteria_unknown_module() {
        let catalog = RubricCatalog::default();
        assert!(catalog.criteria("M0").is_err());
    }

    #[test]
    fn test_criterion_text_unknown_criterion() {
        let catalog = RubricCatalog::default();
        let err = catalog.criterion_text("M1", "9.9").unwrap_err();
        assert!(matches!(err, Error::UnknownCriterion { .. }));
    }

    #[test]
    fn test_suggested_comment_rating_zero() {
        let catalog = RubricCatalog::default();
        let comment = catalog.suggested_comment(0).unwrap();
        assert!(comment.contains("nicht erkennbar"));
    }

    #[test]
    fn test_suggested_comment_out_of_range() {
        let catalog = RubricCatalog::default();
        let err = catalog.suggested_comment(5).unwrap_err();
        assert!(matches!(err, Error::RatingOutOfRange(5)));
    }

    #[test]
    fn test_rating_label_full_scale() {
        let catalog = RubricCatalog::default();
        for rating in 0..=MAX_RATING {
            let label = catalog.rating_label(rating).unwrap();
            assert!(label.starts_with(&rating.to_string()));
        }
        assert!(catalog.rating_label(MAX_RATING + 1).is_err());
    }
}
