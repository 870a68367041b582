use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Split document text into raw question blocks.
///
/// Tries two marker styles in order:
/// 1. `Qn.` markers (`Q1.`, `q 2.`), matched case-insensitively anywhere
/// 2. Bare `n.` markers at line start, guarded by a sequential-from-1
///    prefix check so body numerals are not mistaken for question starts
///
/// Text before the first marker is discarded as preamble. A text with no
/// recognizable markers yields an empty vector, never an error.
pub fn segment_blocks(text: &str) -> Vec<String> {
    segment_blocks_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`segment_blocks`].
pub(crate) fn segment_blocks_with_config(text: &str, config: &ParsingConfig) -> Vec<String> {
    if let Some(blocks) = try_question_marker(text, config) {
        return blocks;
    }

    if let Some(blocks) = try_bare_numbered(text, config) {
        return blocks;
    }

    Vec::new()
}

/// Slice the text between consecutive marker positions into blocks.
fn blocks_between(text: &str, matches: &[(usize, usize)]) -> Vec<String> {
    let mut blocks = Vec::new();
    for i in 0..matches.len() {
        let start = matches[i].1;
        let end = if i + 1 < matches.len() {
            matches[i + 1].0
        } else {
            text.len()
        };
        let content = text[start..end].trim();
        if !content.is_empty() {
            blocks.push(content.to_string());
        }
    }
    blocks
}

fn try_question_marker(text: &str, config: &ParsingConfig) -> Option<Vec<String>> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Q\s*\d+\s*\.").unwrap());

    let re = config.question_marker_re.as_ref().unwrap_or(&RE);

    // Rust regex has no look-behind; drop matches glued to a preceding
    // word character ("FAQ1.", "IQ2.") in code instead.
    let matches: Vec<(usize, usize)> = re
        .find_iter(text)
        .filter(|m| {
            text[..m.start()]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric())
        })
        .map(|m| (m.start(), m.end()))
        .collect();

    if matches.is_empty() {
        return None;
    }
    Some(blocks_between(text, &matches))
}

fn try_bare_numbered(text: &str, config: &ParsingConfig) -> Option<Vec<String>> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(?:^|\n)\s*(\d+)\.\s+").unwrap());

    let re = config.numbered_marker_re.as_ref().unwrap_or(&RE);
    let matches: Vec<(usize, usize)> = re.find_iter(text).map(|m| (m.start(), m.end())).collect();
    if matches.is_empty() {
        return None;
    }

    // Bare numbers are ambiguous (years, section numbers, decimals split
    // across lines). Require the first markers to count 1, 2, 3, ... before
    // trusting them as question starts.
    let first_nums: Vec<i64> = re
        .captures_iter(text)
        .take(5)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .collect();

    if first_nums.first() != Some(&1) {
        return None;
    }
    if !first_nums.windows(2).all(|w| w[1] == w[0] + 1) {
        return None;
    }

    Some(blocks_between(text, &matches))
}
