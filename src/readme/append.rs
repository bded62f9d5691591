// src/readme/append.rs
// Strategy 4: add a separator and a marker line at the end. Always applies.

use super::{marker_line, PatchMethod, PatchStrategy};

pub struct AppendBlock;

impl PatchStrategy for AppendBlock {
    fn method(&self) -> PatchMethod {
        PatchMethod::Append
    }

    fn attempt(&self, text: &str, total: u64) -> Option<String> {
        Some(append_block(text, total))
    }
}

pub(super) fn append_block(text: &str, total: u64) -> String {
    let mut out = String::from(text);

    // A "---" right under a paragraph line would turn that line into a
    // setext heading, so the separator always follows a blank line.
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("---\n");
    out.push_str(&marker_line(total));
    out.push('\n');
    out
}
