use std::io::Write;

use owo_colors::OwoColorize;

use pdfquiz_core::{QuestionRecord, QuizExtraction};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the extraction summary after parsing.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    file_name: &str,
    extraction: &QuizExtraction,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extracting questions from {}...", file_name)?;
    writeln!(w, "Found {} questions", extraction.questions.len())?;

    let parse = &extraction.parse_stats;
    let skipped = parse.no_stem_boundary + parse.no_answer + parse.answer_not_in_options;
    if skipped > 0 {
        let msg = format!(
            "(Skipped {} blocks: {} unrecognizable, {} missing answer, {} answer/option mismatch)",
            skipped, parse.no_stem_boundary, parse.no_answer, parse.answer_not_in_options
        );
        if color.enabled() {
            writeln!(w, "{}", msg.dimmed())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }

    let pages = &extraction.page_stats;
    if pages.total > 0 {
        let msg = format!(
            "(Pages: {} native, {} recognized, {} failed)",
            pages.native, pages.recognized, pages.failed
        );
        if pages.failed > 0 && color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else if color.enabled() {
            writeln!(w, "{}", msg.dimmed())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }

    writeln!(w)?;
    Ok(())
}

/// Print the parsed questions, marking each correct option.
pub fn print_questions(
    w: &mut dyn Write,
    questions: &[QuestionRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    for q in questions {
        if color.enabled() {
            writeln!(w, "{} {}", format!("Q{}.", q.sequence_number).bold(), q.stem)?;
        } else {
            writeln!(w, "Q{}. {}", q.sequence_number, q.stem)?;
        }

        for opt in &q.options {
            let correct = opt.letter == q.correct_letter;
            let marker = if correct { "->" } else { "  " };
            let line = format!("{} {}) {}", marker, opt.letter, opt.text);
            if correct && color.enabled() {
                writeln!(w, "{}", line.green())?;
            } else {
                writeln!(w, "{}", line)?;
            }
        }

        if !q.answer_in_options() {
            let note = format!("   (stated answer {} has no matching option)", q.correct_letter);
            if color.enabled() {
                writeln!(w, "{}", note.yellow())?;
            } else {
                writeln!(w, "{}", note)?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Hint printed when nothing could be parsed from the document.
pub fn print_empty_hint(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    let msg = "No questions found. Check that the source document numbers questions \
               with \"Qn.\" (or \"1.\", \"2.\", ...) markers, labels options \"A)\" \
               through \"E)\" and states each answer on an \"Answer: X\" line.";
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}
