pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod tree;

pub use ast::{Node, NodeKind, Operator, Pos, StatementNode, Token, TokenKind, is_empty_tree};
pub use diagnostics::Location;
pub use error::{Category, ErrorKind, LexError, LiteralError, ParseError, SyntaxError};
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty};
pub use tree::{Tree, parse};
