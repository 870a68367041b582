use once_cell::sync::Lazy;
use regex::Regex;

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Collapse whitespace runs (including hard line breaks from PDF text
/// extraction) into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    WS_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("ﬁrst ﬂoor"), "first floor");
        assert_eq!(expand_ligatures("oﬃce traﬃc"), "office traffic");
        assert_eq!(expand_ligatures("no ligatures here"), "no ligatures here");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  Capital of\nFrance?  "),
            "Capital of France?"
        );
        assert_eq!(normalize_whitespace("one\t\ttwo\n\nthree"), "one two three");
        assert_eq!(normalize_whitespace(""), "");
    }
}
