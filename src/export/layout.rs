//! Layout pieces shared by the DOCX and PDF serializers: section labels,
//! metadata lines, score lines and the ASCII fallback used when the PDF
//! renderer has no Unicode font.

use crate::record::ObservationRecord;
use crate::scoring::ScoreSummary;

/// Placeholder for empty free-text sections.
pub const EMPTY_FIELD: &str = "-";

pub const STRENGTHS_HEADING: &str = "Stärken";
pub const NEXT_STEPS_HEADING: &str = "Nächste Schritte (konkret, terminiert)";
pub const SUMMARY_HEADING: &str = "Zusammenfassung (Scores)";

/// Column headers of the per-module criterion table.
pub const TABLE_HEADERS: [&str; 3] = ["Kriterium", "Bewertung (0–4)", "Kommentar/Hinweis"];

/// Metadata block as (label, value) pairs, in render order. School and
/// profile focus only appear when set.
pub fn meta_pairs(record: &ObservationRecord) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Datum".to_string(), record.date.clone()),
        ("Kolleg*in".to_string(), record.colleague.clone()),
        ("Beobachter*in".to_string(), record.observer.clone()),
        (
            "Fach/Klasse/Thema".to_string(),
            format!("{} / {} / {}", record.subject, record.grade, record.topic),
        ),
    ];
    if !record.school.is_empty() {
        pairs.push(("Schule".to_string(), record.school.clone()));
    }
    if !record.profile_focus.is_empty() {
        pairs.push(("Profil-Fokus".to_string(), record.profile_focus.join(", ")));
    }
    pairs
}

pub fn module_heading(module_id: &str, title: &str) -> String {
    format!("{} – {}", module_id, title)
}

pub fn criterion_line(criterion_id: &str, text: &str) -> String {
    format!("{} {}", criterion_id, text)
}

pub fn score_line(module_id: &str, average: f64) -> String {
    format!("{}: {:.2} / 4", module_id, average)
}

pub fn overall_line(scores: &ScoreSummary) -> String {
    format!("Gesamt (gewichtet): {:.2} / 4", scores.overall)
}

/// Substitute an empty free-text field with the "-" placeholder.
pub fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        EMPTY_FIELD
    } else {
        text
    }
}

/// ASCII fallback for the builtin PDF fonts: German umlauts and the common
/// typographic characters get a documented substitution, everything else
/// outside ASCII is dropped.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            '–' | '—' => out.push('-'),
            '„' | '“' | '”' => out.push('"'),
            '‚' | '‘' | '’' => out.push('\''),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}
