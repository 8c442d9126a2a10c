//! PDF serializer: the same content as the DOCX output, laid out as text
//! blocks on A4 portrait pages with automatic page breaks.
//!
//! Font policy: when [`PdfOptions::unicode_font`] points at a readable TTF it
//! is embedded and text renders unmodified. In every other case the builtin
//! Helvetica faces are used and each rendered string goes through
//! [`layout::transliterate`] first. A missing or broken font file silently
//! selects the fallback path; it never fails the render.

use std::fs::File;
use std::path::PathBuf;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::catalog::RubricCatalog;
use crate::error::{Error, Result};
use crate::export::layout;
use crate::record::{ensure_renderable, ObservationRecord};
use crate::scoring::ScoreSummary;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const SIDE_MARGIN: f64 = 15.0;
const BOTTOM_MARGIN: f64 = 15.0;
const TOP_MARGIN: f64 = 20.0;

const TITLE_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 13.0;
const BODY_SIZE: f64 = 11.0;

const PT_TO_MM: f64 = 0.352_778;

#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    /// TTF with full Unicode coverage. Unset or unreadable means builtin
    /// Helvetica plus transliteration.
    pub unicode_font: Option<PathBuf>,
}

/// Render the record as a self-contained A4 portrait PDF.
///
/// Fails with `InvalidRecord` when the record selects a module the catalog
/// does not define. Font availability never causes a failure.
pub fn render_pdf(
    record: &ObservationRecord,
    catalog: &RubricCatalog,
    scores: &ScoreSummary,
    options: &PdfOptions,
) -> Result<Vec<u8>> {
    ensure_renderable(record, catalog)?;

    let (doc, page, layer) = PdfDocument::new(
        catalog.report_title.as_str(),
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "Inhalt",
    );
    let fonts = FontSet::load(&doc, options)?;

    {
        let mut cursor = PageCursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - TOP_MARGIN,
        };

        cursor.centered_line(&fonts.prep(&catalog.report_title), &fonts.bold, TITLE_SIZE);
        cursor.gap(4.0);

        for (label, value) in layout::meta_pairs(record) {
            cursor.text_line(
                &fonts.prep(&format!("{}: {}", label, value)),
                &fonts.regular,
                BODY_SIZE,
            );
        }
        cursor.gap(2.0);

        for (module_id, module) in &record.modules {
            let spec = catalog.module(module_id)?;
            cursor.text_line(
                &fonts.prep(&layout::module_heading(module_id, &spec.title)),
                &fonts.bold,
                HEADING_SIZE,
            );
            for (criterion_id, text) in &spec.criteria {
                let result = module
                    .criteria
                    .get(criterion_id)
                    .cloned()
                    .unwrap_or_default();
                cursor.text_line(
                    &fonts.prep(&layout::criterion_line(criterion_id, text)),
                    &fonts.regular,
                    BODY_SIZE,
                );
                cursor.text_line(
                    &fonts.prep(&format!("  Bewertung: {}/4", result.rating)),
                    &fonts.regular,
                    BODY_SIZE,
                );
                if !result.comment.is_empty() {
                    cursor.text_line(
                        &fonts.prep(&format!("  Kommentar: {}", result.comment)),
                        &fonts.regular,
                        BODY_SIZE,
                    );
                }
                cursor.gap(1.0);
            }
            cursor.gap(2.0);
        }

        cursor.text_line(&fonts.prep(layout::STRENGTHS_HEADING), &fonts.bold, HEADING_SIZE);
        cursor.text_line(
            &fonts.prep(layout::or_placeholder(&record.strengths)),
            &fonts.regular,
            BODY_SIZE,
        );
        cursor.gap(2.0);

        cursor.text_line(&fonts.prep(layout::NEXT_STEPS_HEADING), &fonts.bold, HEADING_SIZE);
        cursor.text_line(
            &fonts.prep(layout::or_placeholder(&record.next_steps)),
            &fonts.regular,
            BODY_SIZE,
        );
        cursor.gap(2.0);

        cursor.text_line(&fonts.prep(layout::SUMMARY_HEADING), &fonts.bold, HEADING_SIZE);
        for (module_id, average) in &scores.per_module {
            cursor.text_line(
                &fonts.prep(&layout::score_line(module_id, *average)),
                &fonts.regular,
                BODY_SIZE,
            );
        }
        cursor.text_line(&fonts.prep(&layout::overall_line(scores)), &fonts.regular, BODY_SIZE);
    }

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    transliterate: bool,
}

impl FontSet {
    fn load(doc: &PdfDocumentReference, options: &PdfOptions) -> Result<Self> {
        if let Some(path) = &options.unicode_font {
            if let Ok(file) = File::open(path) {
                if let Ok(font) = doc.add_external_font(file) {
                    return Ok(FontSet {
                        regular: font.clone(),
                        bold: font,
                        transliterate: false,
                    });
                }
            }
            // Unreadable or invalid font file: fall through to the builtins.
        }
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Pdf(e.to_string()))?;
        Ok(FontSet {
            regular,
            bold,
            transliterate: true,
        })
    }

    fn prep(&self, text: &str) -> String {
        if self.transliterate {
            layout::transliterate(text)
        } else {
            text.to_string()
        }
    }
}

/// Tracks the write position on the current page and starts a fresh page
/// once the next line would cross the bottom margin.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
}

impl PageCursor<'_> {
    fn text_line(&mut self, text: &str, font: &IndirectFontRef, size: f64) {
        for segment in wrap(text, chars_per_line(size)) {
            self.break_page_if_full(line_height(size));
            self.layer
                .use_text(segment, size as f32, Mm(SIDE_MARGIN as f32), Mm(self.y as f32), font);
            self.y -= line_height(size);
        }
    }

    fn centered_line(&mut self, text: &str, font: &IndirectFontRef, size: f64) {
        self.break_page_if_full(line_height(size));
        let width = text.chars().count() as f64 * char_width(size);
        let x = ((PAGE_WIDTH - width) / 2.0).max(SIDE_MARGIN);
        self.layer.use_text(text, size as f32, Mm(x as f32), Mm(self.y as f32), font);
        self.y -= line_height(size);
    }

    fn gap(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn break_page_if_full(&mut self, needed: f64) {
        if self.y - needed < BOTTOM_MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Inhalt");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - TOP_MARGIN;
        }
    }
}

fn line_height(size: f64) -> f64 {
    size * PT_TO_MM * 1.5
}

/// Average Helvetica glyph width, close enough for wrapping and centering.
fn char_width(size: f64) -> f64 {
    size * PT_TO_MM * 0.5
}

fn chars_per_line(size: f64) -> usize {
    ((PAGE_WIDTH - 2.0 * SIDE_MARGIN) / char_width(size)).floor() as usize
}

/// Greedy word wrap; words longer than the line get hard-split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current_len == 0 && word_len <= max_chars {
            current.push_str(word);
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > max_chars {
                lines.push(rest.drain(..max_chars).collect());
            }
            current = rest.into_iter().collect();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_scores;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn sample_record(catalog: &RubricCatalog) -> ObservationRecord {
        let mut record = ObservationRecord::for_focus(catalog, &["M1".to_string()]).unwrap();
        record.date = "2026-02-03".to_string();
        record.colleague = "Frau Müller".to_string();
        record.strengths = "Schülerinnen äußern sich sicher.".to_string();
        record
    }

    #[test]
    fn test_fallback_render_without_font() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let scores = compute_scores(&record);

        let bytes = render_pdf(&record, &catalog, &scores, &PdfOptions::default()).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..5], b"%PDF-");
        // Builtin-font path transliterates the en dash in the title.
        assert!(contains(&bytes, b"Hospitationsbogen - BLI 3.0"));
    }

    #[test]
    fn test_missing_font_file_falls_back_silently() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let scores = compute_scores(&record);
        let options = PdfOptions {
            unicode_font: Some(PathBuf::from("/nonexistent/font.ttf")),
        };

        let bytes = render_pdf(&record, &catalog, &scores, &options).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_long_record_paginates_without_error() {
        let catalog = RubricCatalog::default();
        let mut record = ObservationRecord::for_focus(&catalog, &[]).unwrap();
        for module in record.modules.values_mut() {
            for result in module.criteria.values_mut() {
                result.rating = 3;
                result.comment =
                    "Sehr ausführlicher Kommentar mit Beobachtungsnotizen, Belegen und \
                     konkreten Beispielen aus mehreren Unterrichtsphasen."
                        .repeat(3);
            }
        }
        record.strengths = "Viele Stärken.".repeat(40);
        let scores = compute_scores(&record);

        let bytes = render_pdf(&record, &catalog, &scores, &PdfOptions::default()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_unknown_module_fails() {
        let catalog = RubricCatalog::default();
        let mut record = sample_record(&catalog);
        let stray = record.modules["M1"].clone();
        record.modules.insert("M9".to_string(), stray);
        let scores = compute_scores(&record);

        let err = render_pdf(&record, &catalog, &scores, &PdfOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(id) if id == "M9"));
    }

    #[test]
    fn test_render_does_not_mutate_record() {
        let catalog = RubricCatalog::default();
        let record = sample_record(&catalog);
        let before = record.clone();
        let scores = compute_scores(&record);
        render_pdf(&record, &catalog, &scores, &PdfOptions::default()).unwrap();
        assert_eq!(record, before);
    }

    #[test]
    fn test_wrap_splits_on_words() {
        let lines = wrap("eins zwei drei vier", 9);
        assert_eq!(lines, vec!["eins zwei", "drei vier"]);
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let lines = wrap("Donaudampfschifffahrt", 10);
        assert_eq!(lines, vec!["Donaudampf", "schifffahr", "t"]);
    }

    #[test]
    fn test_wrap_empty_text_keeps_one_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }
}
