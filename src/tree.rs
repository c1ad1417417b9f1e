//! Parsed statements.

use std::sync::Arc;

use tracing::debug;

use crate::ast::{Node, Source, StatementNode};
use crate::diagnostics;
use crate::error::Result;
use crate::parser::Parser;

/// One parsed statement: its name, its text, and the tree built from it.
///
/// A `Tree` only exists for input that parsed successfully and is never
/// modified afterwards. [`Tree::copy`] builds an independent tree over the
/// same name and text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    source: Arc<Source>,
    root: StatementNode,
}

impl Tree {
    /// Parses `text`. `name` only appears in diagnostics.
    pub fn parse(name: &str, text: &str) -> Result<Tree> {
        let source = Arc::new(Source::new(name, text));
        debug!(statement = name, len = text.len(), "parsing statement");
        let parsed = Parser::new(&source).parse();
        match parsed {
            Ok(root) => {
                debug!(statement = name, empty = root.operator().is_none(), "parsed statement");
                Ok(Tree { source, root })
            }
            Err(err) => {
                debug!(
                    statement = name,
                    category = %err.category(),
                    pos = err.pos().offset(),
                    error = %err.kind(),
                    "parse aborted"
                );
                Err(err)
            }
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// The original statement text.
    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    pub fn root(&self) -> &StatementNode {
        &self.root
    }

    /// Reports whether the statement held nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty_tree()
    }

    /// Deep copy. The copy gets its own source handle and every copied node
    /// refers to it rather than to this tree.
    pub fn copy(&self) -> Tree {
        let source = Arc::new(Source::new(self.source.name(), self.source.text()));
        let root = self.root.copy_into(&source);
        Tree { source, root }
    }

    /// Whether `node` was built for this tree (by its parse or its copy).
    pub fn owns(&self, node: &Node) -> bool {
        node.source().is_some_and(|s| Arc::ptr_eq(s, &self.source))
    }

    /// Location (`<name>:<line>:<column>`) and canonical-form context for
    /// `node`. Nodes built outside any tree resolve against this one.
    pub fn error_context(&self, node: &Node) -> (String, String) {
        let source = node.source().unwrap_or(&self.source);
        diagnostics::error_context(source, node)
    }
}

/// Parses `text` into a [`Tree`]. Shorthand for [`Tree::parse`].
pub fn parse(name: &str, text: &str) -> Result<Tree> {
    Tree::parse(name, text)
}
