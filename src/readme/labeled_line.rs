// src/readme/labeled_line.rs
// =============================================================================
// Strategy 2: update the number on an existing "Total Stars" line.
//
// Matches (case-insensitive) lines such as:
//   > 🌟 **Total Stars + Forks:** 123
//   > ✨ Total Stars & Forks: 123
//   * Total Stars and Forks: 123
//   - Total Stars：123
//
// Only the first whitespace-delimited token after the label is replaced.
// Everything before the label (bullets, quote markers, emoji, bold markers)
// and everything after the token stays as it was.
// =============================================================================

use super::{splice, PatchMethod, PatchStrategy};
use regex::Regex;
use std::sync::LazyLock;

// [*_]* after the colon swallows the closing half of **bold** or _italic_
// labels. Horizontal whitespace only, so a match never spills onto the next
// line.
static LABELED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[^\n]*?total[ \t]+stars(?:[ \t]*(?:\+|&|and)?[ \t]*forks)?[ \t]*[:：][*_]*[ \t]*(\S+)",
    )
    .expect("labeled line pattern is valid")
});

pub struct LabeledLine;

impl PatchStrategy for LabeledLine {
    fn method(&self) -> PatchMethod {
        PatchMethod::LabeledLine
    }

    fn attempt(&self, text: &str, total: u64) -> Option<String> {
        let value = LABELED_LINE.captures(text)?.get(1)?;
        Some(splice(text, value.range(), &total.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, total: u64) -> Option<String> {
        LabeledLine.attempt(text, total)
    }

    #[test]
    fn test_bold_label_keeps_prefix_and_suffix() {
        assert_eq!(
            apply("> 🌟 **Total Stars + Forks:** 42 (updated daily)", 99).unwrap(),
            "> 🌟 **Total Stars + Forks:** 99 (updated daily)"
        );
    }

    #[test]
    fn test_label_variants() {
        let cases = [
            ("> ✨ Total Stars & Forks: 123", "> ✨ Total Stars & Forks: 5"),
            ("* Total Stars and Forks: 123", "* Total Stars and Forks: 5"),
            ("- Total Stars Forks: 1", "- Total Stars Forks: 5"),
            ("Total Stars: 77 stars", "Total Stars: 5 stars"),
            ("total stars + forks:0", "total stars + forks:5"),
            ("TOTAL STARS：12", "TOTAL STARS：5"),
            ("_Total Stars:_ 8", "_Total Stars:_ 5"),
        ];
        for (input, expected) in cases {
            assert_eq!(apply(input, 5).as_deref(), Some(expected), "{input}");
        }
    }

    #[test]
    fn test_only_first_matching_line_changes() {
        let text = "intro\n* Total Stars: 1\n* Total Stars: 2\n";
        assert_eq!(
            apply(text, 3).unwrap(),
            "intro\n* Total Stars: 3\n* Total Stars: 2\n"
        );
    }

    #[test]
    fn test_label_without_value_is_skipped() {
        let text = "Total Stars:\nTotal Stars + Forks: 10\n";
        assert_eq!(apply(text, 11).unwrap(), "Total Stars:\nTotal Stars + Forks: 11\n");
        assert!(apply("Total Stars:   \n", 11).is_none());
    }

    #[test]
    fn test_unrelated_lines_do_not_match() {
        assert!(apply("Stars: 10\nForks: 2\n", 1).is_none());
        assert!(apply("Total Forks: 3\n", 1).is_none());
        assert!(apply("Total Stars 10\n", 1).is_none());
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        assert_eq!(
            apply("* Total Stars: 1\r\nnext\r\n", 2).unwrap(),
            "* Total Stars: 2\r\nnext\r\n"
        );
    }
}
