use std::path::Path;

use thiserror::Error;

pub mod block;
pub mod config;
pub mod extract;
pub mod extractor;
pub mod segment;
pub mod text_processing;

pub use block::{ParsedBlock, ParsedQuestion, SkipReason, parse_block};
pub use config::{ParsingConfig, ParsingConfigBuilder};
pub use extract::{extract_document_text, extract_text_from_pdf};
pub use extractor::QuizExtractor;
pub use segment::segment_blocks;
// Re-export domain types from core (canonical definitions live there)
pub use pdfquiz_core::{
    BackendError, OcrEngine, OcrError, PageSource, PageStats, PageText, ParseStats, PdfBackend,
    PdfDocument, QuestionRecord, QuizExtraction, QuizOption,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] pdfquiz_core::BackendError),
}

/// Extract quiz questions from a PDF file using the given backend for page
/// access and an optional OCR engine for pages without a text layer.
///
/// Pipeline:
/// 1. Walk pages in order: native text, OCR fallback, skip-on-failure
/// 2. Segment the blob into question blocks by start markers
/// 3. Per block, extract stem, lettered options and the answer letter
/// 4. Drop malformed blocks; number the survivors 1..k
pub fn extract_questions(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
    ocr: Option<&dyn OcrEngine>,
) -> Result<QuizExtraction, ParsingError> {
    QuizExtractor::new().extract_from_pdf(pdf_path, backend, ocr)
}

/// Parse already-extracted text into question records with the default
/// configuration.
pub fn parse_questions(text: &str) -> (Vec<QuestionRecord>, ParseStats) {
    QuizExtractor::new().parse_text(text)
}
