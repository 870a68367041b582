use std::path::Path;

use thiserror::Error;

use pdfquiz_parsing::{ParsingError, QuizExtractor};

// Re-export domain types for convenience
pub use pdfquiz_core::{PageStats, ParseStats, QuestionRecord, QuizExtraction};
pub use pdfquiz_parsing::{ParsingConfig, ParsingConfigBuilder};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("PDF extraction error: {0}")]
    Pdf(#[from] ParsingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of pdfquiz-ingest)")]
    NoPdfSupport,
}

/// How the OCR fallback is provisioned for PDF inputs.
#[derive(Debug, Clone)]
pub enum OcrPolicy {
    /// Use tesseract when a binary is on PATH; otherwise pages without a
    /// text layer are skipped.
    Auto { language: String },
    /// Never run OCR.
    Disabled,
}

impl Default for OcrPolicy {
    fn default() -> Self {
        Self::Auto {
            language: "eng".to_string(),
        }
    }
}

/// Extract quiz questions from a PDF or plain-text file.
///
/// Dispatches on file extension:
/// - `.txt` → fed straight to the question parser (useful for checking how
///   a source document's formatting parses, without a PDF in the loop)
/// - anything else → PDF pipeline (requires the `pdf` feature / mupdf)
pub fn extract_questions(path: &Path) -> Result<QuizExtraction, IngestError> {
    extract_questions_with(path, &QuizExtractor::new(), &OcrPolicy::default())
}

/// Configurable version of [`extract_questions`].
pub fn extract_questions_with(
    path: &Path,
    extractor: &QuizExtractor,
    ocr: &OcrPolicy,
) -> Result<QuizExtraction, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "txt" => extract_text_file(path, extractor),
        _ => extract_pdf(path, extractor, ocr),
    }
}

fn extract_text_file(path: &Path, extractor: &QuizExtractor) -> Result<QuizExtraction, IngestError> {
    let text = std::fs::read_to_string(path)?;
    // No pages were involved; page stats stay zeroed.
    Ok(extractor.extract_from_text(&text, PageStats::default()))
}

#[cfg(feature = "pdf")]
fn extract_pdf(
    path: &Path,
    extractor: &QuizExtractor,
    ocr: &OcrPolicy,
) -> Result<QuizExtraction, IngestError> {
    use pdfquiz_core::OcrEngine;
    use pdfquiz_ocr_tesseract::TesseractOcr;

    let backend = pdfquiz_pdf_mupdf::MupdfBackend::default();

    let engine = match ocr {
        OcrPolicy::Disabled => None,
        OcrPolicy::Auto { language } => {
            if TesseractOcr::available() {
                Some(TesseractOcr::new().with_language(language.clone()))
            } else {
                tracing::debug!("tesseract not found on PATH, OCR fallback disabled");
                None
            }
        }
    };

    extractor
        .extract_from_pdf(
            path,
            &backend,
            engine.as_ref().map(|e| e as &dyn OcrEngine),
        )
        .map_err(IngestError::Pdf)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(
    _path: &Path,
    _extractor: &QuizExtractor,
    _ocr: &OcrPolicy,
) -> Result<QuizExtraction, IngestError> {
    Err(IngestError::NoPdfSupport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_txt_dispatch() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "Q1. Capital of France?\nA) London\nB) Paris\nAnswer: B\n"
        )
        .unwrap();
        file.flush().unwrap();

        let result = extract_questions(file.path()).unwrap();
        assert_eq!(result.questions.len(), 1);
        assert_eq!(result.questions[0].correct_letter, 'B');
        assert_eq!(result.page_stats.total, 0);
    }

    #[test]
    fn test_missing_txt_is_io_error() {
        let err = extract_questions(Path::new("/nonexistent/quiz.txt")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_garbage_pdf_is_fatal_open_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        write!(file, "this is not a pdf").unwrap();
        file.flush().unwrap();

        let err = extract_questions(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Pdf(_)));
    }
}
