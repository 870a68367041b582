use std::path::Path;

use pdfquiz_core::{
    OcrEngine, PageStats, ParseStats, PdfBackend, QuestionRecord, QuizExtraction,
};

use crate::block::{ParsedBlock, SkipReason, parse_block_with_config};
use crate::config::ParsingConfig;
use crate::segment::segment_blocks_with_config;
use crate::{ParsingError, extract};

/// A configurable question extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in defaults; use
/// [`QuizExtractor::with_config`] to supply custom marker patterns and
/// fallback flags.
pub struct QuizExtractor {
    config: ParsingConfig,
}

impl Default for QuizExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Segment document text into raw question blocks (step 1).
    pub fn segment_blocks(&self, text: &str) -> Vec<String> {
        segment_blocks_with_config(text, &self.config)
    }

    /// Parse a single raw block (step 2).
    pub fn parse_block(&self, block: &str) -> ParsedBlock {
        parse_block_with_config(block, &self.config)
    }

    /// Parse already-extracted text into question records.
    ///
    /// Blocks that fail extraction are dropped, never aborting the rest;
    /// sequence numbers are assigned only to records that survive, so the
    /// output numbering is 1-based and gap-free.
    pub fn parse_text(&self, text: &str) -> (Vec<QuestionRecord>, ParseStats) {
        let blocks = self.segment_blocks(text);

        let mut stats = ParseStats {
            total_blocks: blocks.len(),
            ..Default::default()
        };
        let mut questions = Vec::new();

        for block in &blocks {
            match self.parse_block(block) {
                ParsedBlock::Question(q) => {
                    stats.parsed += 1;
                    questions.push(QuestionRecord {
                        sequence_number: questions.len() + 1,
                        stem: q.stem,
                        options: q.options,
                        correct_letter: q.correct_letter,
                    });
                }
                ParsedBlock::Skip(SkipReason::NoStemBoundary) => stats.no_stem_boundary += 1,
                ParsedBlock::Skip(SkipReason::NoAnswer) => stats.no_answer += 1,
                ParsedBlock::Skip(SkipReason::AnswerNotInOptions) => {
                    stats.answer_not_in_options += 1
                }
            }
        }

        (questions, stats)
    }

    /// Run the full pipeline on a PDF file.
    pub fn extract_from_pdf(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
        ocr: Option<&dyn OcrEngine>,
    ) -> Result<QuizExtraction, ParsingError> {
        let (text, page_stats) = extract::extract_text_from_pdf(path, backend, ocr)?;
        Ok(self.extract_from_text(&text, page_stats))
    }

    /// Run the parsing half of the pipeline on already-extracted text.
    pub fn extract_from_text(&self, text: &str, page_stats: PageStats) -> QuizExtraction {
        let (questions, parse_stats) = self.parse_text(text);
        QuizExtraction {
            questions,
            page_stats,
            parse_stats,
        }
    }
}
