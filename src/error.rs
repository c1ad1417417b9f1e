//! Error types for RQL parsing.
//!
//! Every failure aborts the parse and surfaces as a single [`ParseError`]. The
//! error's [`ErrorKind`] says which stage rejected the input:
//!
//! - **Lexical** - the character stream could not be tokenized
//! - **Syntax** - a token appeared where the grammar does not allow it
//! - **Literal** - a number or string literal could not be converted

use std::fmt;

use crate::ast::Pos;

/// Renders a character the way diagnostics print it: `U+0029 ')'`, or just
/// `U+0001` when the character has no printable form.
#[derive(Debug, Clone, Copy)]
pub struct CharName(pub char);

fn char_name(c: &char) -> CharName {
    CharName(*c)
}

impl fmt::Display for CharName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        if c.is_control() {
            write!(f, "U+{:04X}", c as u32)
        } else {
            write!(f, "U+{:04X} '{}'", c as u32, c)
        }
    }
}

/// Errors produced by the lexer. They travel inside an error token and end
/// the token stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unrecognized character in statement: {}", char_name(.0))]
    UnrecognizedCharacter(char),

    /// An identifier ran into a character that cannot follow it.
    #[error("bad character {}", char_name(.0))]
    BadCharacter(char),

    #[error("bad number syntax: {0:?}")]
    BadNumber(String),

    #[error("unterminated quoted string")]
    UnterminatedString,

    #[error("unexpected right paren {}", CharName(')'))]
    UnexpectedRightParen,

    /// Input ended while a parenthesis was still open.
    #[error("unexpected end of statement")]
    UnexpectedEnd,
}

/// Grammar violations found by the parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("unexpected {found} in {context}")]
    Unexpected { found: String, context: &'static str },

    #[error("unexpected token after operator: {0}")]
    TrailingToken(String),

    /// More than the given number of lists open at once.
    #[error("statement nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Literal tokens that lexed fine but have no valid value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("illegal number syntax: {0:?}")]
    IllegalNumber(String),

    /// Bare integer text too large for both `i64` and `u64`.
    #[error("integer overflow: {0:?}")]
    IntegerOverflow(String),

    #[error("invalid string literal: {0}")]
    InvalidString(String),
}

/// Which stage of the front end rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntax,
    Literal,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lexical => write!(f, "lexical"),
            Category::Syntax => write!(f, "syntax"),
            Category::Literal => write!(f, "literal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Literal(#[from] LiteralError),
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        match self {
            ErrorKind::Lexical(_) => Category::Lexical,
            ErrorKind::Syntax(_) => Category::Syntax,
            ErrorKind::Literal(_) => Category::Literal,
        }
    }
}

/// A failed parse.
///
/// Carries the statement name, the line and byte position of the offending
/// token, and what went wrong. Displays as
/// `statement: <name>:<line>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("statement: {name}:{line}: {kind}")]
pub struct ParseError {
    name: String,
    line: usize,
    column: usize,
    pos: Pos,
    kind: ErrorKind,
}

impl ParseError {
    pub(crate) fn new(
        name: impl Into<String>,
        line: usize,
        column: usize,
        pos: Pos,
        kind: impl Into<ErrorKind>,
    ) -> Self {
        ParseError {
            name: name.into(),
            line,
            column,
            pos,
            kind: kind.into(),
        }
    }

    /// Name of the statement that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based line of the offending token.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based byte column of the offending token.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// `<name>:<line>:<column>`
    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.name, self.line, self.column)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
