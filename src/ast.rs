//! # RQL - Abstract Syntax Tree
//!
//! This module defines the tokens and tree nodes for RQL, a small resource
//! query language that expresses filter predicates in prefix, LISP-like form.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, and byte positions
//! - **[operators]** - The nine operator keywords
//! - **[nodes]** - Tree nodes: statement, operator, list, identifier, null, bool
//! - **[literals]** - Number and string literal nodes and their interpretation
//!
//! ## Quick Start
//!
//! ```text
//! and(eq(id,12),lt(age,21))
//! ```
//!
//! parses to
//!
//! ```text
//! Statement
//! └── Operator and
//!     └── List
//!         ├── Operator eq
//!         │   └── List [Identifier id, Number 12]
//!         └── Operator lt
//!             └── List [Identifier age, Number 21]
//! ```
//!
//! ## Core Concepts
//!
//! ### Operators
//!
//! Every operator takes a parenthesized operand list. Logical operators (`and`,
//! `or`) take any number of predicates. Comparisons (`eq`, `ne`, `lt`, `gt`,
//! `le`, `ge`) take a field and a value. `in` takes a field followed by the
//! candidate values, usually as a nested list:
//!
//! ```text
//! in(first_name,("Jason","Kevin"))
//! ```
//!
//! ### Canonical Form
//!
//! Rendering a node with `Display` yields its canonical form: whitespace is
//! dropped, operands are joined by bare commas, and literals keep the exact
//! spelling they had in the source.
//!
//! ```text
//! and( eq(id, +12.0) )   →   and(eq(id,+12.0))
//! ```
pub mod literals;
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use literals::{NumberNode, StringNode, unquote};
pub use nodes::{
    BoolNode, IdentifierNode, ListNode, Node, NodeKind, NullNode, OperatorNode, Source,
    StatementNode, is_empty_tree,
};
pub use operators::Operator;
pub use tokens::{Pos, Token, TokenKind};
