// src/readme/marker.rs
// Strategy 1: replace whatever sits between the first marker pair.

use super::{splice, PatchMethod, PatchStrategy, END_MARKER, START_MARKER};
use regex::Regex;
use std::sync::LazyLock;

// (?s) lets the old value span several lines; the lazy .*? stops at the
// nearest closing marker.
static MARKER_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "{}(?s:(.*?)){}",
        regex::escape(START_MARKER),
        regex::escape(END_MARKER)
    );
    Regex::new(&pattern).expect("marker pattern is valid")
});

pub struct MarkerReplace;

impl PatchStrategy for MarkerReplace {
    fn method(&self) -> PatchMethod {
        PatchMethod::Marker
    }

    fn attempt(&self, text: &str, total: u64) -> Option<String> {
        let inner = MARKER_PAIR.captures(text)?.get(1)?;
        Some(splice(text, inner.range(), &total.to_string()))
    }
}
