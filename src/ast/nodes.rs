//! Parse tree nodes.
//!
//! A parsed statement is a tree of [`Node`]s rooted at a [`StatementNode`].
//! Every node remembers the byte position it started at and, when it was built
//! by a parse, a handle to the [`Source`] it came from. The handle is only used
//! to resolve diagnostics; the tree itself owns its nodes outright.

use std::fmt;
use std::sync::Arc;

use crate::ast::{NumberNode, Operator, Pos, StringNode};

/// Name and text of a parsed statement, shared by every node of one tree.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
    name: String,
    text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Node variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Bool,
    Identifier,
    Null,
    String,
    Number,
    Operator,
    List,
    Statement,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Bool => "bool",
            NodeKind::Identifier => "identifier",
            NodeKind::Null => "null",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Operator => "operator",
            NodeKind::List => "list",
            NodeKind::Statement => "statement",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element of the parse tree.
///
/// `Display` produces the canonical form: no whitespace, operands joined by
/// bare commas, literals spelled exactly as they appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Statement(StatementNode),
    Operator(OperatorNode),
    List(ListNode),
    Identifier(IdentifierNode),
    Null(NullNode),
    Bool(BoolNode),
    String(StringNode),
    Number(NumberNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Statement(_) => NodeKind::Statement,
            Node::Operator(_) => NodeKind::Operator,
            Node::List(_) => NodeKind::List,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Null(_) => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::String(_) => NodeKind::String,
            Node::Number(_) => NodeKind::Number,
        }
    }

    pub fn pos(&self) -> Pos {
        match self {
            Node::Statement(n) => n.pos,
            Node::Operator(n) => n.pos,
            Node::List(n) => n.pos,
            Node::Identifier(n) => n.pos,
            Node::Null(n) => n.pos,
            Node::Bool(n) => n.pos,
            Node::String(n) => n.pos(),
            Node::Number(n) => n.pos(),
        }
    }

    /// Source this node was parsed from, `None` for detached nodes.
    pub fn source(&self) -> Option<&Arc<Source>> {
        match self {
            Node::Statement(n) => n.source.as_ref(),
            Node::Operator(n) => n.source.as_ref(),
            Node::List(n) => n.source.as_ref(),
            Node::Identifier(n) => n.source.as_ref(),
            Node::Null(n) => n.source.as_ref(),
            Node::Bool(n) => n.source.as_ref(),
            Node::String(n) => n.source(),
            Node::Number(n) => n.source(),
        }
    }

    /// Deep copy whose nodes all refer to `source`.
    pub fn copy_into(&self, source: &Arc<Source>) -> Node {
        match self {
            Node::Statement(n) => Node::Statement(n.copy_into(source)),
            Node::Operator(n) => Node::Operator(n.copy_into(source)),
            Node::List(n) => Node::List(n.copy_into(source)),
            Node::Identifier(n) => Node::Identifier(n.copy_into(source)),
            Node::Null(n) => Node::Null(n.copy_into(source)),
            Node::Bool(n) => Node::Bool(n.copy_into(source)),
            Node::String(n) => Node::String(n.copy_into(source)),
            Node::Number(n) => Node::Number(n.copy_into(source)),
        }
    }

    /// Reports whether the node holds nothing but space.
    ///
    /// Literals always count as content, even `false` and `""`. An operator is
    /// empty when its operands are; a list is empty when it has elements and
    /// all of them are empty. `op()` is content.
    pub fn is_empty_tree(&self) -> bool {
        match self {
            Node::Statement(n) => n.is_empty_tree(),
            Node::Operator(n) => n.is_empty_tree(),
            Node::List(n) => n.is_empty_tree(),
            Node::Identifier(n) => n.ident.is_empty(),
            Node::Null(_) | Node::Bool(_) | Node::String(_) | Node::Number(_) => false,
        }
    }
}

/// Emptiness check that also accepts a missing node, which is empty.
pub fn is_empty_tree(node: Option<&Node>) -> bool {
    node.is_none_or(Node::is_empty_tree)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Statement(n) => fmt::Display::fmt(n, f),
            Node::Operator(n) => fmt::Display::fmt(n, f),
            Node::List(n) => fmt::Display::fmt(n, f),
            Node::Identifier(n) => fmt::Display::fmt(n, f),
            Node::Null(n) => fmt::Display::fmt(n, f),
            Node::Bool(n) => fmt::Display::fmt(n, f),
            Node::String(n) => fmt::Display::fmt(n, f),
            Node::Number(n) => fmt::Display::fmt(n, f),
        }
    }
}

impl From<StatementNode> for Node {
    fn from(n: StatementNode) -> Self {
        Node::Statement(n)
    }
}

impl From<OperatorNode> for Node {
    fn from(n: OperatorNode) -> Self {
        Node::Operator(n)
    }
}

impl From<ListNode> for Node {
    fn from(n: ListNode) -> Self {
        Node::List(n)
    }
}

impl From<IdentifierNode> for Node {
    fn from(n: IdentifierNode) -> Self {
        Node::Identifier(n)
    }
}

impl From<NullNode> for Node {
    fn from(n: NullNode) -> Self {
        Node::Null(n)
    }
}

impl From<BoolNode> for Node {
    fn from(n: BoolNode) -> Self {
        Node::Bool(n)
    }
}

impl From<StringNode> for Node {
    fn from(n: StringNode) -> Self {
        Node::String(n)
    }
}

impl From<NumberNode> for Node {
    fn from(n: NumberNode) -> Self {
        Node::Number(n)
    }
}

/// Root of a parse tree. Holds no operator when the statement was empty or
/// all whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    operator: Option<OperatorNode>,
}

impl StatementNode {
    pub fn new(pos: Pos, operator: Option<OperatorNode>) -> Self {
        StatementNode {
            pos,
            source: None,
            operator,
        }
    }

    pub(crate) fn attached(pos: Pos, source: &Arc<Source>, operator: Option<OperatorNode>) -> Self {
        StatementNode {
            pos,
            source: Some(Arc::clone(source)),
            operator,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn source(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    pub fn operator(&self) -> Option<&OperatorNode> {
        self.operator.as_ref()
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        StatementNode::attached(
            self.pos,
            source,
            self.operator.as_ref().map(|op| op.copy_into(source)),
        )
    }

    pub fn is_empty_tree(&self) -> bool {
        self.operator.as_ref().is_none_or(OperatorNode::is_empty_tree)
    }
}

impl fmt::Display for StatementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operator {
            Some(op) => fmt::Display::fmt(op, f),
            None => Ok(()),
        }
    }
}

/// An operator keyword applied to a parenthesized operand list.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    operator: Operator,
    operands: ListNode,
}

impl OperatorNode {
    pub fn new(pos: Pos, operator: Operator, operands: ListNode) -> Self {
        OperatorNode {
            pos,
            source: None,
            operator,
            operands,
        }
    }

    pub(crate) fn attached(
        pos: Pos,
        source: &Arc<Source>,
        operator: Operator,
        operands: ListNode,
    ) -> Self {
        OperatorNode {
            pos,
            source: Some(Arc::clone(source)),
            operator,
            operands,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn source(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The operator keyword, e.g. `"eq"`.
    pub fn name(&self) -> &'static str {
        self.operator.as_str()
    }

    pub fn operands(&self) -> &ListNode {
        &self.operands
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        OperatorNode::attached(
            self.pos,
            source,
            self.operator,
            self.operands.copy_into(source),
        )
    }

    pub fn is_empty_tree(&self) -> bool {
        self.operands.is_empty_tree()
    }
}

impl fmt::Display for OperatorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.operands)
    }
}

/// Ordered operands. Position matters: for comparisons operand 0 is the
/// left-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    nodes: Vec<Node>,
}

impl ListNode {
    pub fn new(pos: Pos, nodes: Vec<Node>) -> Self {
        ListNode {
            pos,
            source: None,
            nodes,
        }
    }

    pub(crate) fn attached(pos: Pos, source: &Arc<Source>) -> Self {
        ListNode {
            pos,
            source: Some(Arc::clone(source)),
            nodes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn source(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        ListNode {
            pos: self.pos,
            source: Some(Arc::clone(source)),
            nodes: self.nodes.iter().map(|n| n.copy_into(source)).collect(),
        }
    }

    pub fn is_empty_tree(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(Node::is_empty_tree)
    }
}

impl<'a> IntoIterator for &'a ListNode {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            fmt::Display::fmt(node, f)?;
        }
        f.write_str(")")
    }
}

/// Field or column reference.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    ident: String,
}

impl IdentifierNode {
    pub fn new(pos: Pos, ident: impl Into<String>) -> Self {
        IdentifierNode {
            pos,
            source: None,
            ident: ident.into(),
        }
    }

    pub(crate) fn attached(pos: Pos, source: &Arc<Source>, ident: impl Into<String>) -> Self {
        IdentifierNode {
            pos,
            source: Some(Arc::clone(source)),
            ident: ident.into(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        IdentifierNode::attached(self.pos, source, self.ident.clone())
    }
}

impl fmt::Display for IdentifierNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ident)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullNode {
    pos: Pos,
    source: Option<Arc<Source>>,
}

impl NullNode {
    pub fn new(pos: Pos) -> Self {
        NullNode { pos, source: None }
    }

    pub(crate) fn attached(pos: Pos, source: &Arc<Source>) -> Self {
        NullNode {
            pos,
            source: Some(Arc::clone(source)),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        NullNode::attached(self.pos, source)
    }
}

impl fmt::Display for NullNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    value: bool,
}

impl BoolNode {
    pub fn new(pos: Pos, value: bool) -> Self {
        BoolNode {
            pos,
            source: None,
            value,
        }
    }

    pub(crate) fn attached(pos: Pos, source: &Arc<Source>, value: bool) -> Self {
        BoolNode {
            pos,
            source: Some(Arc::clone(source)),
            value,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        BoolNode::attached(self.pos, source, self.value)
    }
}

impl fmt::Display for BoolNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.value { "true" } else { "false" })
    }
}
