use indexmap::IndexMap;

use crate::record::ObservationRecord;

/// Aggregated scores for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    /// Module ID to the arithmetic mean of its criterion ratings, in record
    /// order.
    pub per_module: IndexMap<String, f64>,

    /// Weight-normalized mean of the per-module averages.
    pub overall: f64,
}

/// Compute per-module averages and the overall weighted score.
///
/// Each module's average is the plain mean of its criterion ratings (0.0 for
/// a module without criteria). The overall score weights each average with
/// `record.weights`, defaulting to 1.0 for modules without an entry. A total
/// weight of 0 yields an overall of 0.0 instead of dividing by zero.
///
/// Pure and cache-free: call it again after mutating the record and the
/// result reflects the latest ratings.
pub fn compute_scores(record: &ObservationRecord) -> ScoreSummary {
    let mut per_module = IndexMap::new();
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for (module_id, module) in &record.modules {
        let count = module.criteria.len();
        let average = if count == 0 {
            0.0
        } else {
            let sum: u32 = module
                .criteria
                .values()
                .map(|result| u32::from(result.rating))
                .sum();
            f64::from(sum) / count as f64
        };
        per_module.insert(module_id.clone(), average);

        let weight = record.weights.get(module_id).copied().unwrap_or(1.0);
        weighted_sum += average * weight;
        weight_total += weight;
    }

    let overall = if weight_total == 0.0 {
        0.0
    } else {
        weighted_sum / weight_total
    };

    ScoreSummary {
        per_module,
        overall,
    }
}
