// src/readme/heading.rs
// Strategy 3: insert a marker line right below the "### ⭐ Github Status:" heading.

use super::{marker_line, splice, PatchMethod, PatchStrategy};
use regex::Regex;
use std::sync::LazyLock;

// The star may carry a U+FE0F variation selector ("⭐️") depending on the editor.
static STATUS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^###[ \t]*⭐\x{FE0F}?[ \t]*Github Status:[^\r\n]*")
        .expect("status heading pattern is valid")
});

pub struct HeadingInsert;

impl PatchStrategy for HeadingInsert {
    fn method(&self) -> PatchMethod {
        PatchMethod::Heading
    }

    fn attempt(&self, text: &str, total: u64) -> Option<String> {
        let heading = STATUS_HEADING.find(text)?;
        let at = heading.end();

        // Follow the heading's own line ending. The trailing blank line keeps
        // the quote from swallowing the next paragraph.
        let newline = if text[at..].starts_with("\r\n") { "\r\n" } else { "\n" };
        let insert = format!("{newline}{}{newline}", marker_line(total));
        Some(splice(text, at..at, &insert))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_directly_after_heading() {
        let text = "# Me\n\n### ⭐ Github Status:\n![stats](https://example.com/card.svg)\n";
        let patched = HeadingInsert.attempt(text, 31).unwrap();
        assert_eq!(
            patched,
            "# Me\n\n### ⭐ Github Status:\n\
             > 🌟 **Total Stars + Forks:** <!--START_TOTAL_SCORE-->31<!--END_TOTAL_SCORE-->\n\
             \n\
             ![stats](https://example.com/card.svg)\n"
        );
    }

    #[test]
    fn test_heading_at_end_without_newline() {
        let patched = HeadingInsert.attempt("### ⭐ Github Status:", 2).unwrap();
        assert_eq!(
            patched,
            "### ⭐ Github Status:\n\
             > 🌟 **Total Stars + Forks:** <!--START_TOTAL_SCORE-->2<!--END_TOTAL_SCORE-->\n"
        );
    }

    #[test]
    fn test_heading_variants() {
        for heading in [
            "###⭐Github Status:",
            "### ⭐\u{FE0F} Github Status:",
            "###  ⭐  Github Status: (live)",
        ] {
            let text = format!("{heading}\nrest\n");
            let patched = HeadingInsert.attempt(&text, 1).unwrap();
            assert!(patched.starts_with(&format!("{heading}\n> 🌟")), "{heading}");
            assert!(patched.ends_with("\n\nrest\n"));
        }
    }

    #[test]
    fn test_crlf_heading_uses_crlf() {
        let patched = HeadingInsert.attempt("### ⭐ Github Status:\r\nrest", 1).unwrap();
        assert!(patched.starts_with("### ⭐ Github Status:\r\n> 🌟"));
        assert!(patched.ends_with("<!--END_TOTAL_SCORE-->\r\n\r\nrest"));
    }

    #[test]
    fn test_other_headings_do_not_match() {
        assert!(HeadingInsert.attempt("## ⭐ Github Status:\n", 1).is_none());
        assert!(HeadingInsert.attempt("### Github Status:\n", 1).is_none());
        assert!(HeadingInsert.attempt("text ### ⭐ Github Status:\n", 1).is_none());
    }
}
