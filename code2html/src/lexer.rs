use std::ops::Range;

use tree_sitter::{Node, Parser, TreeCursor};
use tree_sitter_highlight::{HighlightConfiguration as TSHLC, HighlightEvent, Highlighter};

use crate::highlight::{CodeHighlighter, HL_NAMES};
use crate::Result;

const HIGHLIGHT_QUERY: &str = include_str!("../queries/python.scm");

const ALIASES: &[&str] = &["python3", "py3", "python", "py"];

/// Python 3 lexer backed by the tree-sitter grammar.
pub struct PythonLexer {
    config: TSHLC,
}

impl PythonLexer {
    pub fn new() -> Result<Self> {
        let mut config = TSHLC::new(tree_sitter_python::language(), HIGHLIGHT_QUERY, "", "")?;
        config.configure(HL_NAMES);
        Ok(Self { config })
    }
}

impl CodeHighlighter for PythonLexer {
    fn highlight(&self, text: &[u8]) -> Result<Vec<HighlightEvent>> {
        let mut tshl = Highlighter::new();
        let events = tshl
            .highlight(&self.config, text, None, |_| None)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::trace!(bytes = text.len(), events = events.len(), "highlighted python source");
        Ok(events)
    }

    fn error_ranges(&self, text: &[u8]) -> Result<Vec<Range<usize>>> {
        let mut parser = Parser::new();
        parser.set_language(tree_sitter_python::language())?;
        let tree = parser.parse(text, None).ok_or("tree-sitter produced no tree")?;
        let root = tree.root_node();
        if !root.has_error() {
            return Ok(vec![]);
        }

        let mut ranges = vec![];
        collect_errors(&mut root.walk(), &mut ranges);
        let ranges = merge_ranges(ranges);
        tracing::debug!(?ranges, "python source has syntax errors");
        Ok(ranges)
    }

    fn aliases(&self) -> Vec<&str> {
        ALIASES.to_vec()
    }

    fn name(&self) -> &str {
        "Python 3"
    }
}

fn collect_errors(cur: &mut TreeCursor, ranges: &mut Vec<Range<usize>>) {
    loop {
        let node = cur.node();
        if node.is_error() {
            error_tokens(node, ranges);
        } else if node.is_missing() {
            if let Some(anchor) = missing_anchor(node) {
                ranges.push(anchor.start_byte()..anchor.end_byte());
            }
        } else if node.has_error() && cur.goto_first_child() {
            collect_errors(cur, ranges);
            cur.goto_parent();
        }
        if !cur.goto_next_sibling() {
            break;
        }
    }
}

// Recovery folds the statements after a mistake into the ERROR node. Only
// its stray tokens are reported; complete subtrees inside it are not.
fn error_tokens(error: Node, ranges: &mut Vec<Range<usize>>) {
    let before = ranges.len();
    for i in 0..error.child_count() {
        let Some(child) = error.child(i) else { continue };
        if child.is_error() {
            error_tokens(child, ranges);
        } else if child.child_count() == 0 {
            if child.is_missing() {
                if let Some(anchor) = missing_anchor(child) {
                    ranges.push(anchor.start_byte()..anchor.end_byte());
                }
            } else {
                ranges.push(child.start_byte()..child.end_byte());
            }
        } else if child.has_error() {
            collect_errors(&mut child.walk(), ranges);
        }
    }
    if ranges.len() == before {
        let first = first_leaf(error);
        ranges.push(first.start_byte()..first.end_byte());
    }
}

// A MISSING node has no width; the token it should have followed is
// reported instead.
fn missing_anchor(missing: Node) -> Option<Node> {
    let mut node = missing;
    loop {
        if let Some(prev) = node.prev_sibling() {
            return Some(last_leaf(prev));
        }
        node = node.parent()?;
        if !node.is_named() && node.start_byte() < node.end_byte() {
            return Some(node);
        }
    }
}

fn first_leaf(mut node: Node) -> Node {
    while let Some(child) = node.child(0) {
        node = child;
    }
    node
}

fn last_leaf(mut node: Node) -> Node {
    while let Some(child) = node.child_count().checked_sub(1).and_then(|i| node.child(i)) {
        node = child;
    }
    node
}

pub(crate) fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.retain(|r| r.start < r.end);
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}
