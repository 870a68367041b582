use once_cell::sync::Lazy;
use regex::Regex;

use pdfquiz_core::QuizOption;

use crate::config::ParsingConfig;
use crate::text_processing::normalize_whitespace;

/// Result of parsing a single question block.
pub enum ParsedBlock {
    Question(ParsedQuestion),
    Skip(SkipReason),
}

/// A successfully parsed block, before sequence-number assignment.
pub struct ParsedQuestion {
    pub stem: String,
    pub options: Vec<QuizOption>,
    pub correct_letter: char,
}

/// Reason a block was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No option marker and no answer marker — the stem cannot be delimited.
    NoStemBoundary,
    /// No answer letter found (and the random fallback is off).
    NoAnswer,
    /// The answer letter names no parsed option (opt-in validation).
    AnswerNotInOptions,
}

static OPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Ea-e])\)").unwrap());
static ANSWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)answer\s*:\s*([A-Ea-e])\b").unwrap());

/// An option-marker occurrence within a block.
struct OptionMarker {
    start: usize,
    end: usize,
    letter: char,
}

/// Find option markers (`A)` .. `E)`, either case) in a block.
///
/// Rust regex has no look-behind; occurrences glued to a preceding word
/// character ("(USA)", "plan B)...") are dropped in code so only standalone
/// letter markers count.
fn option_markers(block: &str, re: &Regex) -> Vec<OptionMarker> {
    re.captures_iter(block)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            let standalone = block[..whole.start()]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric());
            standalone.then(|| OptionMarker {
                start: whole.start(),
                end: whole.end(),
                letter: letter.to_ascii_uppercase(),
            })
        })
        .collect()
}

/// Parse one raw block into a question, or a skip reason.
pub fn parse_block(block: &str) -> ParsedBlock {
    parse_block_with_config(block, &ParsingConfig::default())
}

/// Config-aware version of [`parse_block`].
pub(crate) fn parse_block_with_config(block: &str, config: &ParsingConfig) -> ParsedBlock {
    let option_re = config.option_marker_re.as_ref().unwrap_or(&OPTION_RE);
    let answer_re = config.answer_re.as_ref().unwrap_or(&ANSWER_RE);

    let markers = option_markers(block, option_re);
    let answer_caps = answer_re.captures(block);
    let answer_start = answer_caps.as_ref().map(|c| c.get(0).unwrap().start());

    // The stem runs up to the first option marker or the answer marker,
    // whichever comes first. Neither present → the block is undelimitable.
    let boundary = match (markers.first().map(|m| m.start), answer_start) {
        (Some(o), Some(a)) => o.min(a),
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (None, None) => return ParsedBlock::Skip(SkipReason::NoStemBoundary),
    };
    let stem = normalize_whitespace(&block[..boundary]);

    // Each option's text runs until the next marker, the answer marker, or
    // the end of the block. Duplicate letters keep the first occurrence.
    let mut options: Vec<QuizOption> = Vec::new();
    for (i, m) in markers.iter().enumerate() {
        if options.iter().any(|o| o.letter == m.letter) {
            continue;
        }
        let mut end = markers
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(block.len());
        if let Some(a) = answer_start
            && (m.end..end).contains(&a)
        {
            end = a;
        }
        options.push(QuizOption {
            letter: m.letter,
            text: normalize_whitespace(&block[m.end..end]),
        });
    }

    if options.is_empty() && config.synthesize_missing_options() {
        options = placeholder_options();
    }

    let correct_letter = match answer_caps
        .as_ref()
        .and_then(|c| c.get(1))
        .and_then(|g| g.as_str().chars().next())
    {
        Some(letter) => letter.to_ascii_uppercase(),
        None if config.random_answer_fallback() && !options.is_empty() => {
            options[fastrand::usize(..options.len())].letter
        }
        None => return ParsedBlock::Skip(SkipReason::NoAnswer),
    };

    if config.require_answer_in_options() && !options.iter().any(|o| o.letter == correct_letter) {
        return ParsedBlock::Skip(SkipReason::AnswerNotInOptions);
    }

    ParsedBlock::Question(ParsedQuestion {
        stem,
        options,
        correct_letter,
    })
}

/// Placeholder option set fabricated by the opt-in compatibility mode.
fn placeholder_options() -> Vec<QuizOption> {
    ('A'..='D')
        .map(|letter| QuizOption {
            letter,
            text: format!("Option {}", letter),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;

    fn expect_question(parsed: ParsedBlock) -> ParsedQuestion {
        match parsed {
            ParsedBlock::Question(q) => q,
            ParsedBlock::Skip(reason) => panic!("expected a question, got skip: {:?}", reason),
        }
    }

    #[test]
    fn test_parse_full_block() {
        let block = "Capital of France?\nA) London\nB) Berlin\nC) Paris\nD) Madrid\nAnswer: C";
        let q = expect_question(parse_block(block));
        assert_eq!(q.stem, "Capital of France?");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.options[0].letter, 'A');
        assert_eq!(q.options[0].text, "London");
        assert_eq!(q.options[3].text, "Madrid");
        assert_eq!(q.correct_letter, 'C');
    }

    #[test]
    fn test_missing_answer_drops_block() {
        let block = "Capital of France?\nA) London\nB) Berlin";
        match parse_block(block) {
            ParsedBlock::Skip(SkipReason::NoAnswer) => {}
            _ => panic!("block without Answer: must be dropped"),
        }
    }

    #[test]
    fn test_no_markers_at_all_drops_block() {
        match parse_block("Just a paragraph with nothing recognizable in it.") {
            ParsedBlock::Skip(SkipReason::NoStemBoundary) => {}
            _ => panic!("undelimitable block must be dropped"),
        }
    }

    #[test]
    fn test_lowercase_answer_normalized() {
        let block = "Pick one.\nA) x\nB) y\nanswer: b";
        let q = expect_question(parse_block(block));
        assert_eq!(q.correct_letter, 'B');
    }

    #[test]
    fn test_lowercase_option_letters_normalized() {
        let block = "Pick one.\na) x\nb) y\nAnswer: A";
        let q = expect_question(parse_block(block));
        let letters: Vec<char> = q.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['A', 'B']);
    }

    #[test]
    fn test_option_gap_preserved() {
        // No B) in the source — no synthetic entry may appear.
        let block = "Pick one.\nA) x\nC) y\nD) z\nAnswer: C";
        let q = expect_question(parse_block(block));
        let letters: Vec<char> = q.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['A', 'C', 'D']);
    }

    #[test]
    fn test_duplicate_letter_keeps_first() {
        let block = "Pick one.\nA) first\nA) second\nAnswer: A";
        let q = expect_question(parse_block(block));
        assert_eq!(q.options.len(), 1);
        assert_eq!(q.options[0].text, "first");
    }

    #[test]
    fn test_marker_inside_word_not_an_option() {
        let block = "Which country (USA) is largest?\nA) USA\nB) Canada\nAnswer: B";
        let q = expect_question(parse_block(block));
        // "(USA)" must not produce an option or cut the stem early; the "(USA"
        // prefix survives in the stem.
        assert_eq!(q.stem, "Which country (USA) is largest?");
        assert_eq!(q.options.len(), 2);
    }

    #[test]
    fn test_stem_whitespace_collapsed() {
        let block = "A question\nbroken   across\nlines?\nA) x\nAnswer: A";
        let q = expect_question(parse_block(block));
        assert_eq!(q.stem, "A question broken across lines?");
    }

    #[test]
    fn test_answer_before_options_still_collects_options() {
        let block = "Pick one.\nAnswer: A\nA) x\nB) y";
        let q = expect_question(parse_block(block));
        assert_eq!(q.stem, "Pick one.");
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.correct_letter, 'A');
    }

    #[test]
    fn test_answer_sentence_not_mistaken_for_letter() {
        // "Because" must not be read as answer letter B.
        let block = "Why?\nA) x\nB) y\nAnswer: Because";
        match parse_block(block) {
            ParsedBlock::Skip(SkipReason::NoAnswer) => {}
            _ => panic!("prose after Answer: is not a letter"),
        }
    }

    #[test]
    fn test_option_text_stops_at_answer_marker() {
        let block = "Pick one.\nA) x\nB) y Answer: B";
        let q = expect_question(parse_block(block));
        assert_eq!(q.options[1].text, "y");
    }

    #[test]
    fn test_zero_options_kept_without_validation() {
        // A stem plus answer but no options: legal by default.
        let block = "Pick one.\nAnswer: A";
        let q = expect_question(parse_block(block));
        assert!(q.options.is_empty());
        assert_eq!(q.correct_letter, 'A');
    }

    #[test]
    fn test_synthesize_missing_options_flag() {
        let config = ParsingConfigBuilder::new()
            .synthesize_missing_options(true)
            .build()
            .unwrap();
        let block = "Pick one.\nAnswer: B";
        let q = expect_question(parse_block_with_config(block, &config));
        let letters: Vec<char> = q.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['A', 'B', 'C', 'D']);
        assert_eq!(q.options[0].text, "Option A");
    }

    #[test]
    fn test_random_answer_fallback_flag() {
        let config = ParsingConfigBuilder::new()
            .random_answer_fallback(true)
            .build()
            .unwrap();
        let block = "Pick one.\nA) x\nB) y";
        let q = expect_question(parse_block_with_config(block, &config));
        assert!(q.options.iter().any(|o| o.letter == q.correct_letter));
    }

    #[test]
    fn test_random_fallback_without_options_still_drops() {
        let config = ParsingConfigBuilder::new()
            .random_answer_fallback(true)
            .build()
            .unwrap();
        // Only an answer-less stem delimited by nothing — no letters to pick from.
        let block = "Pick one.\nAnswer sheet follows on the next page.";
        match parse_block_with_config(block, &config) {
            ParsedBlock::Skip(SkipReason::NoStemBoundary) => {}
            _ => panic!("expected drop"),
        }
    }

    #[test]
    fn test_require_answer_in_options_flag() {
        let config = ParsingConfigBuilder::new()
            .require_answer_in_options(true)
            .build()
            .unwrap();
        let block = "Pick one.\nA) x\nB) y\nAnswer: E";
        match parse_block_with_config(block, &config) {
            ParsedBlock::Skip(SkipReason::AnswerNotInOptions) => {}
            _ => panic!("answer E names no option"),
        }

        // Default config keeps the record (the invariant is not validated).
        let q = expect_question(parse_block(block));
        assert_eq!(q.correct_letter, 'E');
        assert!(!q.options.iter().any(|o| o.letter == 'E'));
    }
}
