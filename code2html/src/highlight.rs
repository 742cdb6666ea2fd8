use std::ops::Range;

use lazy_static::lazy_static;
use tree_sitter_highlight::HighlightEvent;

use crate::Result;

/// Capture names recognized in highlight queries, in highlight index order.
pub const HL_NAMES: &[&str] = &[
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "escape",
    "function",
    "function.builtin",
    "keyword",
    "number",
    "operator",
    "property",
    "punctuation.bracket",
    "punctuation.delimiter",
    "string",
    "type",
    "variable",
    "variable.builtin",
];

/// Class given to source the parser could not make sense of.
pub const ERROR_CLASS: &str = "error";

lazy_static! {
    /// CSS class for each entry of [`HL_NAMES`].
    pub static ref HL_CLASSES: Vec<String> =
        HL_NAMES.iter().map(|s| s.replace('.', "-")).collect::<Vec<_>>();
}

pub fn class_for(highlight: usize) -> Option<&'static str> {
    HL_CLASSES.get(highlight).map(|s| s.as_str())
}

pub trait CodeHighlighter {
    /// Highlight events covering every byte of `text`.
    fn highlight(&self, text: &[u8]) -> Result<Vec<HighlightEvent>>;
    /// Sorted, disjoint byte ranges of `text` that failed to parse.
    fn error_ranges(&self, text: &[u8]) -> Result<Vec<Range<usize>>>;
    fn aliases(&self) -> Vec<&str>;
    fn name(&self) -> &str;
}
