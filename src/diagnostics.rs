//! Line/column resolution and error context rendering.

use std::fmt;

use crate::ast::{Node, Pos, Source};

/// Longest context snippet shown before it is cut off with `...`.
pub const CONTEXT_LIMIT: usize = 20;

/// 1-based line and column. Columns count bytes from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Resolves a byte offset into `text` to a line and column by counting the
/// newlines before it. Offsets past the end clamp to the end of the text.
pub fn resolve(text: &str, pos: Pos) -> Location {
    let mut offset = pos.offset().min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let prefix = &text[..offset];
    let line = 1 + prefix.matches('\n').count();
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    Location {
        line,
        column: offset - line_start + 1,
    }
}

/// Describes where `node` sits in `source` and what it looks like.
///
/// Returns `("<name>:<line>:<column>", context)` where the context is the
/// node's canonical form, shortened by [`truncate_context`].
pub fn error_context(source: &Source, node: &Node) -> (String, String) {
    let loc = resolve(source.text(), node.pos());
    (
        format!("{}:{}", source.name(), loc),
        truncate_context(node.to_string()),
    )
}

pub fn truncate_context(context: String) -> String {
    match context.char_indices().nth(CONTEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &context[..cut]),
        None => context,
    }
}
