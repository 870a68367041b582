use std::path::Path;

use pdfquiz_core::{
    BackendError, OcrEngine, PageSource, PageStats, PageText, PdfBackend, PdfDocument,
};

use crate::text_processing::expand_ligatures;

/// Walk a document's pages in order and accumulate one text blob.
///
/// Per page: native text first; if the text layer is empty (or errors),
/// render the page and run the OCR engine. A page whose fallback also
/// fails contributes no text — the walk continues, the page is counted in
/// [`PageStats::failed`] and a warning is logged. Page order is preserved;
/// each contributing page is followed by a newline separator.
pub fn extract_document_text(
    doc: &dyn PdfDocument,
    ocr: Option<&dyn OcrEngine>,
) -> (String, PageStats) {
    let mut blob = String::new();
    let mut stats = PageStats {
        total: doc.page_count(),
        ..Default::default()
    };

    for index in 0..doc.page_count() {
        match extract_page(doc, index, ocr) {
            Some(page) => {
                match page.source {
                    PageSource::Native => stats.native += 1,
                    PageSource::Recognized => stats.recognized += 1,
                }
                blob.push_str(&page.text);
                blob.push('\n');
            }
            None => stats.failed += 1,
        }
    }

    (blob, stats)
}

fn extract_page(
    doc: &dyn PdfDocument,
    index: usize,
    ocr: Option<&dyn OcrEngine>,
) -> Option<PageText> {
    match doc.page_text(index) {
        Ok(text) if !text.trim().is_empty() => {
            return Some(PageText {
                index,
                text,
                source: PageSource::Native,
            });
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(page = index, error = %e, "page text extraction failed, trying OCR");
        }
    }

    let engine = match ocr {
        Some(engine) => engine,
        None => {
            tracing::debug!(page = index, "no text layer and no OCR engine configured");
            return None;
        }
    };

    let png = match doc.render_page_png(index) {
        Ok(png) => png,
        Err(e) => {
            tracing::warn!(page = index, error = %e, "page render failed, skipping page");
            return None;
        }
    };

    match engine.recognize(&png) {
        Ok(text) => Some(PageText {
            index,
            text,
            source: PageSource::Recognized,
        }),
        Err(e) => {
            tracing::warn!(page = index, error = %e, "OCR failed, skipping page");
            None
        }
    }
}

/// Open a PDF and extract its full text with OCR fallback.
///
/// A failure opening the document is fatal and returned as
/// [`BackendError::Open`]; per-page failures are recovered inside
/// [`extract_document_text`]. The document handle is dropped on every exit
/// path. Typographic ligatures are expanded before the blob is returned.
pub fn extract_text_from_pdf(
    path: &Path,
    backend: &dyn PdfBackend,
    ocr: Option<&dyn OcrEngine>,
) -> Result<(String, PageStats), BackendError> {
    let document = backend.open(path)?;
    let (text, stats) = extract_document_text(document.as_ref(), ocr);
    Ok((expand_ligatures(&text), stats))
}
