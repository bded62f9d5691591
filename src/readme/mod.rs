// src/readme/mod.rs
// =============================================================================
// This module writes the stars + forks total into a README.
//
// READMEs are edited by hand and come in many styles, so instead of one rigid
// rule we try a chain of strategies, in order, and stop at the first one that
// applies:
//
//   1. marker       - replace the text between <!--START_TOTAL_SCORE--> and
//                     <!--END_TOTAL_SCORE-->
//   2. labeled_line - replace the number on a "Total Stars + Forks: 42" line
//   3. heading      - insert a marker line under "### ⭐ Github Status:"
//   4. append       - add a marker block at the end of the document
//
// The last strategy always applies, so patching never fails. Strategies 3 and
// 4 leave a marker pair behind, which means the next run takes path 1.
//
// Submodules:
// - marker, labeled_line, heading, append: one strategy each
// - file: read the README, patch it, write it back
// =============================================================================

mod append;
mod file;
mod heading;
mod labeled_line;
mod marker;

use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub use file::update_file;

use append::AppendBlock;
use heading::HeadingInsert;
use labeled_line::LabeledLine;
use marker::MarkerReplace;

/// Opening sentinel of the auto-updated region
pub const START_MARKER: &str = "<!--START_TOTAL_SCORE-->";
/// Closing sentinel of the auto-updated region
pub const END_MARKER: &str = "<!--END_TOTAL_SCORE-->";

/// Which strategy produced the patched text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchMethod {
    Marker,
    LabeledLine,
    Heading,
    Append,
}

impl PatchMethod {
    /// One-line explanation for the logs
    pub fn describe(&self) -> &'static str {
        match self {
            PatchMethod::Marker => "replaced the value between the total score markers",
            PatchMethod::LabeledLine => "replaced the number on an existing 'Total Stars' line",
            PatchMethod::Heading => "inserted a total line under the 'Github Status' heading",
            PatchMethod::Append => "appended a total block at the end of the document",
        }
    }
}

impl fmt::Display for PatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchMethod::Marker => "marker",
            PatchMethod::LabeledLine => "labeled_line",
            PatchMethod::Heading => "heading",
            PatchMethod::Append => "append",
        };
        f.write_str(name)
    }
}

/// One way of locating where the total goes.
pub trait PatchStrategy {
    fn method(&self) -> PatchMethod;

    /// Returns the patched text, or None when this strategy doesn't apply.
    fn attempt(&self, text: &str, total: u64) -> Option<String>;
}

/// Result of running the strategy chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub text: String,
    pub method: PatchMethod,
}

// Tried in this order; AppendBlock accepts every document.
const STRATEGIES: &[&dyn PatchStrategy] = &[&MarkerReplace, &LabeledLine, &HeadingInsert, &AppendBlock];

/// Writes `total` into `text` using the first strategy that applies.
pub fn patch(text: &str, total: u64) -> Patched {
    STRATEGIES
        .iter()
        .find_map(|strategy| {
            strategy.attempt(text, total).map(|patched| Patched {
                text: patched,
                method: strategy.method(),
            })
        })
        .unwrap_or_else(|| Patched {
            text: append::append_block(text, total),
            method: PatchMethod::Append,
        })
}

/// The line inserted by the heading and append strategies
fn marker_line(total: u64) -> String {
    format!("> 🌟 **Total Stars + Forks:** {START_MARKER}{total}{END_MARKER}")
}

// Replaces `range` of `text` with `replacement`.
fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is &dyn PatchStrategy?
//    - A reference to "some type that implements PatchStrategy"
//    - The concrete type (MarkerReplace, LabeledLine, ...) is only known at
//      runtime, so calls go through a vtable
//    - This lets one slice hold four different strategy types
//
// 2. Why do the strategies return Option<String>?
//    - None means "this document doesn't have what I'm looking for"
//    - find_map() walks the slice and stops at the first Some
//
// 3. Why byte ranges (Range<usize>)?
//    - regex reports match positions as byte offsets into the &str
//    - Slicing with them is always on a char boundary because the regex
//      engine only matches whole UTF-8 characters
// -----------------------------------------------------------------------------
