use regex::Regex;

/// Configuration for the question parsing pipeline.
///
/// All regex fields are `Option<Regex>` — `None` means "use the built-in
/// default". Use [`ParsingConfigBuilder`] to construct with string patterns.
///
/// The three boolean flags are opt-in compatibility/strengthening behaviors;
/// all default to `false`, which is the correctness-preserving mode (blocks
/// with missing answers are dropped, nothing is fabricated).
#[derive(Debug, Clone, Default)]
pub struct ParsingConfig {
    // ── segment.rs ──
    /// Regex for `Qn.`-style question-start markers.
    pub(crate) question_marker_re: Option<Regex>,
    /// Regex for bare `n.` line-start markers. Capture group 1 must be the
    /// number (used for the sequential-prefix guard).
    pub(crate) numbered_marker_re: Option<Regex>,

    // ── block.rs ──
    /// Regex for option markers. Capture group 1 must be the letter.
    pub(crate) option_marker_re: Option<Regex>,
    /// Regex for the answer marker. Capture group 1 must be the letter.
    pub(crate) answer_re: Option<Regex>,

    /// Fabricate placeholder options A–D when a block parses zero options.
    /// Compatibility behavior; silently corrupts quiz quality, hence opt-in.
    pub(crate) synthesize_missing_options: bool,
    /// Pick a random letter from the parsed options when the answer marker
    /// is missing, instead of dropping the block. Opt-in for the same reason.
    pub(crate) random_answer_fallback: bool,
    /// Drop records whose answer letter is not among the parsed options.
    pub(crate) require_answer_in_options: bool,
}

impl ParsingConfig {
    pub fn synthesize_missing_options(&self) -> bool {
        self.synthesize_missing_options
    }

    pub fn random_answer_fallback(&self) -> bool {
        self.random_answer_fallback
    }

    pub fn require_answer_in_options(&self) -> bool {
        self.require_answer_in_options
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in
/// [`build()`](Self::build). Fails fast with `regex::Error` if any pattern
/// is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    question_marker_re: Option<String>,
    numbered_marker_re: Option<String>,
    option_marker_re: Option<String>,
    answer_re: Option<String>,
    synthesize_missing_options: bool,
    random_answer_fallback: bool,
    require_answer_in_options: bool,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Marker patterns ──

    pub fn question_marker_regex(mut self, pattern: &str) -> Self {
        self.question_marker_re = Some(pattern.to_string());
        self
    }

    pub fn numbered_marker_regex(mut self, pattern: &str) -> Self {
        self.numbered_marker_re = Some(pattern.to_string());
        self
    }

    pub fn option_marker_regex(mut self, pattern: &str) -> Self {
        self.option_marker_re = Some(pattern.to_string());
        self
    }

    pub fn answer_regex(mut self, pattern: &str) -> Self {
        self.answer_re = Some(pattern.to_string());
        self
    }

    // ── Fallback flags ──

    pub fn synthesize_missing_options(mut self, enabled: bool) -> Self {
        self.synthesize_missing_options = enabled;
        self
    }

    pub fn random_answer_fallback(mut self, enabled: bool) -> Self {
        self.random_answer_fallback = enabled;
        self
    }

    pub fn require_answer_in_options(mut self, enabled: bool) -> Self {
        self.require_answer_in_options = enabled;
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        Ok(ParsingConfig {
            question_marker_re: compile(self.question_marker_re)?,
            numbered_marker_re: compile(self.numbered_marker_re)?,
            option_marker_re: compile(self.option_marker_re)?,
            answer_re: compile(self.answer_re)?,
            synthesize_missing_options: self.synthesize_missing_options,
            random_answer_fallback: self.random_answer_fallback,
            require_answer_in_options: self.require_answer_in_options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert!(config.question_marker_re.is_none());
        assert!(!config.synthesize_missing_options());
        assert!(!config.random_answer_fallback());
        assert!(!config.require_answer_in_options());
    }

    #[test]
    fn test_builder_custom_regex() {
        let config = ParsingConfigBuilder::new()
            .question_marker_regex(r"(?i)Frage\s*\d+\s*\.")
            .build()
            .unwrap();
        assert!(config.question_marker_re.is_some());
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new()
            .option_marker_regex(r"[invalid")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_flags() {
        let config = ParsingConfigBuilder::new()
            .synthesize_missing_options(true)
            .random_answer_fallback(true)
            .require_answer_in_options(true)
            .build()
            .unwrap();
        assert!(config.synthesize_missing_options());
        assert!(config.random_answer_fallback());
        assert!(config.require_answer_in_options());
    }
}
