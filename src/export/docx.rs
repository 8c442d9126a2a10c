//! DOCX serializer: title, metadata block, one criterion table per module,
//! free-text sections and the score summary.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Table, TableCell, TableRow};

use crate::catalog::RubricCatalog;
use crate::error::{Error, Result};
use crate::export::layout;
use crate::record::{ensure_renderable, ObservationRecord};
use crate::scoring::ScoreSummary;

// Run sizes are half-points: 11pt body, 13pt section, 16pt title.
const TITLE_SIZE: usize = 32;
const HEADING_SIZE: usize = 26;
const BODY_SIZE: usize = 22;

/// Render the record as a self-contained DOCX document.
///
/// Content and ordering mirror the PDF output: criteria follow catalog order
/// within each module, modules follow record order. Fails with
/// `InvalidRecord` when the record selects a module the catalog does not
/// define; the record itself is never mutated.
pub fn render_docx(
    record: &ObservationRecord,
    catalog: &RubricCatalog,
    scores: &ScoreSummary,
) -> Result<Vec<u8>> {
    ensure_renderable(record, catalog)?;

    let mut docx = Docx::new()
        .default_fonts(RunFonts::new().ascii("Calibri"))
        .default_size(BODY_SIZE);

    docx = docx.add_paragraph(
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(bold_run(&catalog.report_title, TITLE_SIZE)),
    );

    docx = add_meta_block(docx, record);

    for (module_id, module) in &record.modules {
        let spec = catalog.module(module_id)?;
        docx = docx.add_paragraph(heading(&layout::module_heading(module_id, &spec.title)));

        let mut rows = vec![TableRow::new(vec![
            header_cell(layout::TABLE_HEADERS[0]),
            header_cell(layout::TABLE_HEADERS[1]),
            header_cell(layout::TABLE_HEADERS[2]),
        ])];
        for (criterion_id, text) in &spec.criteria {
            let result = module
                .criteria
                .get(criterion_id)
                .cloned()
                .unwrap_or_default();
            rows.push(TableRow::new(vec![
                text_cell(&layout::criterion_line(criterion_id, text)),
                text_cell(&result.rating.to_string()),
                text_cell(&result.comment),
            ]));
        }
        docx = docx
            .add_table(Table::new(rows).set_grid(vec![4700, 1400, 3500]))
            .add_paragraph(Paragraph::new());
    }

    docx = docx
        .add_paragraph(heading(layout::STRENGTHS_HEADING))
        .add_paragraph(body(layout::or_placeholder(&record.strengths)))
        .add_paragraph(heading(layout::NEXT_STEPS_HEADING))
        .add_paragraph(body(layout::or_placeholder(&record.next_steps)))
        .add_paragraph(heading(layout::SUMMARY_HEADING));
    for (module_id, average) in &scores.per_module {
        docx = docx.add_paragraph(body(&layout::score_line(module_id, *average)));
    }
    docx = docx.add_paragraph(body(&layout::overall_line(scores)));

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| Error::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// First line carries date, colleague and observer side by side; the
/// remaining pairs get a paragraph each.
fn add_meta_block(mut docx: Docx, record: &ObservationRecord) -> Docx {
    let pairs = layout::meta_pairs(record);
    let split = pairs.len().min(3);
    let (head, rest) = pairs.split_at(split);

    let mut first = Paragraph::new();
    for (i, (label, value)) in head.iter().enumerate() {
        first = first.add_run(bold_run(&format!("{}: ", label), BODY_SIZE));
        let spacer = if i + 1 < head.len() { "    " } else { "" };
        first = first.add_run(Run::new().add_text(format!("{}{}", value, spacer)));
    }
    docx = docx.add_paragraph(first);

    for (label, value) in rest {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(bold_run(&format!("{}: ", label), BODY_SIZE))
                .add_run(Run::new().add_text(value.as_str())),
        );
    }
    docx
}

fn bold_run(text: &str, size: usize) -> Run {
    Run::new().add_text(text).bold().size(size)
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(bold_run(text, HEADING_SIZE))
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn header_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold()))
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ModuleResult;
    use crate::scoring::compute_scores;
    use indexmap::IndexMap;

    fn sample_record(catalog: &RubricCatalog) -> ObservationRecord {
        let mut record = ObservationRecord::for_focus(catalog, &["M1".to_string()]).unwrap();
        record.date = "2026-02-03".to_string();
        record.colleague = "Frau Müller".to_string();
        record.observer = "Herr Kaya".to_string();
        record
    }

    #[test]
    fn test_render_produces_docx_container() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let scores = compute_scores(&record);

        let bytes = render_docx(&record, &catalog, &scores).unwrap();
        assert!(!bytes.is_empty());
        // DOCX is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_full_rubric() {
        let catalog = RubricCatalog::default();
        let record = ObservationRecord::for_focus(&catalog, &[]).unwrap();
        let scores = compute_scores(&record);
        assert!(render_docx(&record, &catalog, &scores).is_ok());
    }

    #[test]
    fn test_render_unknown_module_fails() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        record.modules.insert(
            "M9".to_string(),
            ModuleResult {
                module_key: "M9".to_string(),
                criteria: IndexMap::new(),
            },
        );
        let scores = compute_scores(&record);

        let err = render_docx(&record, &catalog, &scores).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(id) if id == "M9"));
    }

    #[test]
    fn test_render_does_not_mutate_record() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let before = record.clone();
        let scores = compute_scores(&record);
        render_docx(&record, &catalog, &scores).unwrap();
        assert_eq!(record, before);
    }
}
