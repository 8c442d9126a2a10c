use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::catalog::{RubricCatalog, MAX_RATING};
use crate::export::layout;
use crate::scoring::ScoreSummary;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the score summary as a table: one line per module
/// ("M1  2.40 / 4  <title>") plus the weighted overall.
pub fn format_score_summary(
    scores: &ScoreSummary,
    catalog: &RubricCatalog,
    use_colors: bool,
) -> String {
    if scores.per_module.is_empty() {
        return "No modules in record.".to_string();
    }

    let mut lines = Vec::new();
    for (module_id, average) in &scores.per_module {
        let title = catalog
            .modules
            .get(module_id)
            .map(|spec| spec.title.as_str())
            .unwrap_or("");
        let key = format!("{:<4}", module_id);
        let value = format!("{:>8}", format!("{:.2} / 4", average));
        if use_colors {
            lines.push(format!("{} {}  {}", key.bold(), value, title.dimmed()));
        } else {
            lines.push(format!("{} {}  {}", key, value, title));
        }
    }

    let overall_value = format!("{:>8}", format!("{:.2} / 4", scores.overall));
    let overall_label = "Gesamt (gewichtet)";
    if use_colors {
        lines.push(format!(
            "{:<4} {}  {}",
            "",
            overall_value.bold(),
            overall_label.bold()
        ));
    } else {
        lines.push(format!("{:<4} {}  {}", "", overall_value, overall_label));
    }

    lines.join("\n")
}

/// Render the rubric reference: the rating scale with its suggested
/// comments, then every module with its criteria.
pub fn format_rubric(catalog: &RubricCatalog, use_colors: bool) -> String {
    let mut lines = Vec::new();
    if use_colors {
        lines.push(catalog.report_title.bold().to_string());
    } else {
        lines.push(catalog.report_title.clone());
    }

    lines.push(String::new());
    lines.push("Skala:".to_string());
    for rating in 0..=MAX_RATING {
        // Infallible for 0..=MAX_RATING on a validated catalog.
        let label = catalog.rating_label(rating).unwrap_or_default();
        let comment = catalog.suggested_comment(rating).unwrap_or_default();
        lines.push(format!("  {:<22} {}", label, comment));
    }

    for (module_id, spec) in &catalog.modules {
        lines.push(String::new());
        let heading = layout::module_heading(module_id, &spec.title);
        if use_colors {
            lines.push(heading.bold().to_string());
        } else {
            lines.push(heading);
        }
        for (criterion_id, text) in &spec.criteria {
            lines.push(format!("  {}", layout::criterion_line(criterion_id, text)));
        }
    }

    lines.join("\n")
}
