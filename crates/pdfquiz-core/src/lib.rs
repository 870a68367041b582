use serde::Serialize;

pub mod backend;
pub mod ocr;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use ocr::{OcrEngine, OcrError};

/// One answer choice within a question.
///
/// `letter` is always uppercase A–E; lowercase markers in source text are
/// normalized before a `QuizOption` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub letter: char,
    pub text: String,
}

/// A parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    /// 1-based position among successfully parsed questions. Strictly
    /// increasing and gap-free; blocks dropped during parsing leave no gap.
    pub sequence_number: usize,
    /// Question body text, trimmed, with no option or answer markers.
    pub stem: String,
    /// Ordered answer choices. Letters are unique; insertion order follows
    /// appearance in the source. May be empty.
    pub options: Vec<QuizOption>,
    /// The option letter stated correct by the source (uppercase A–E).
    pub correct_letter: char,
}

impl QuestionRecord {
    /// Text of the option with the given letter, if present.
    pub fn option_text(&self, letter: char) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.letter == letter)
            .map(|o| o.text.as_str())
    }

    /// Whether the stated correct letter matches one of the parsed options.
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|o| o.letter == self.correct_letter)
    }
}

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSource {
    /// Text obtained from the PDF's embedded text layer.
    Native,
    /// Text obtained by rasterizing the page and running OCR.
    Recognized,
}

/// One page's extracted text plus its provenance.
///
/// Produced once per page during extraction and folded into the document
/// blob; only the aggregate [`PageStats`] outlives the extraction call.
#[derive(Debug, Clone)]
pub struct PageText {
    /// 0-based page index.
    pub index: usize,
    pub text: String,
    pub source: PageSource,
}

/// Extraction provenance counts across a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageStats {
    pub total: usize,
    pub native: usize,
    pub recognized: usize,
    /// Pages that yielded no text: empty text layer and the OCR fallback
    /// failed or was not configured.
    pub failed: usize,
}

/// Per-block parse outcome counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Raw blocks produced by segmentation.
    pub total_blocks: usize,
    /// Blocks dropped because no option or answer marker delimited the stem.
    pub no_stem_boundary: usize,
    /// Blocks dropped because no answer letter was found.
    pub no_answer: usize,
    /// Blocks dropped by the opt-in answer-in-options validation.
    pub answer_not_in_options: usize,
    /// Blocks that produced a [`QuestionRecord`].
    pub parsed: usize,
}

/// Result of running the full extraction pipeline on one document.
#[derive(Debug, Clone, Serialize)]
pub struct QuizExtraction {
    pub questions: Vec<QuestionRecord>,
    pub page_stats: PageStats,
    pub parse_stats: ParseStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuestionRecord {
        QuestionRecord {
            sequence_number: 1,
            stem: "Capital of France?".to_string(),
            options: vec![
                QuizOption {
                    letter: 'A',
                    text: "London".to_string(),
                },
                QuizOption {
                    letter: 'C',
                    text: "Paris".to_string(),
                },
            ],
            correct_letter: 'C',
        }
    }

    #[test]
    fn option_text_lookup() {
        let r = record();
        assert_eq!(r.option_text('C'), Some("Paris"));
        assert_eq!(r.option_text('B'), None);
    }

    #[test]
    fn answer_in_options() {
        let mut r = record();
        assert!(r.answer_in_options());
        r.correct_letter = 'D';
        assert!(!r.answer_in_options());
    }
}
