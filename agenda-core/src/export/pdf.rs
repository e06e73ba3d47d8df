//! Printable agenda as an A4 PDF.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::agenda::AgendaDocument;
use crate::error::{AgendaError, AgendaResult};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const LAYER: &str = "agenda";

const MARGIN_X: f32 = 10.0;
const TITLE_Y: f32 = 282.0;
const FIRST_LINE_Y: f32 = 272.0;
const LINE_SPACING: f32 = 7.0;
const BOTTOM_MARGIN: f32 = 15.0;

const TITLE_SIZE: f32 = 16.0;
const LINE_SIZE: f32 = 10.0;

fn pdf_error(e: impl std::fmt::Display) -> AgendaError {
    AgendaError::Export(format!("PDF: {e}"))
}

fn build(agenda: &AgendaDocument) -> AgendaResult<PdfDocumentReference> {
    let (doc, page, layer) = PdfDocument::new(&agenda.title, PAGE_WIDTH, PAGE_HEIGHT, LAYER);
    let font: IndirectFontRef = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;

    let mut current: PdfLayerReference = doc.get_page(page).get_layer(layer);
    current.use_text(agenda.title.as_str(), TITLE_SIZE, Mm(MARGIN_X), Mm(TITLE_Y), &font);

    let mut y = FIRST_LINE_Y;
    for line in &agenda.lines {
        if y < BOTTOM_MARGIN {
            let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER);
            current = doc.get_page(page).get_layer(layer);
            y = TITLE_Y;
        }
        current.use_text(line.as_str(), LINE_SIZE, Mm(MARGIN_X), Mm(y), &font);
        y -= LINE_SPACING;
    }

    Ok(doc)
}

/// Render the agenda to PDF bytes.
pub fn render_pdf(agenda: &AgendaDocument) -> AgendaResult<Vec<u8>> {
    build(agenda)?.save_to_bytes().map_err(pdf_error)
}

/// Write the agenda as a PDF at `path`.
pub fn write_pdf(agenda: &AgendaDocument, path: &Path) -> AgendaResult<()> {
    let doc = build(agenda)?;
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer).map_err(pdf_error)?;
    tracing::info!(path = %path.display(), lines = agenda.lines.len(), "agenda exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::CalendarScope;

    fn agenda(lines: usize) -> AgendaDocument {
        let day = chrono::NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        AgendaDocument {
            scope: CalendarScope::Month,
            from: day,
            to: day,
            title: "Agenda Docente - Vista mes".into(),
            lines: (0..lines)
                .map(|i| format!("2026-03-16 08:00-09:00 | Clase {i} | subject"))
                .collect(),
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render_pdf(&agenda(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_agendas_span_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda-mes.pdf");

        write_pdf(&agenda(120), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
