use std::fmt;

use crate::ast::Operator;
use crate::error::LexError;

/// Byte offset into the original statement text.
///
/// Resolved to a line and column only when a diagnostic needs one, see
/// [`crate::diagnostics::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub usize);

impl Pos {
    pub fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Pos {
    fn from(offset: usize) -> Self {
        Pos(offset)
    }
}

/// Classification of a lexical token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Bare name referring to a field or column
    ///
    /// Letters, digits, `_` and `.`; must not start with a digit or `.`.
    ///
    /// # Examples
    /// ```text
    /// id
    /// first_name
    /// user.age
    /// ```
    Identifier,

    /// Double-quoted string, quotes and escapes included in the token text
    ///
    /// # Examples
    /// ```text
    /// "Jason"
    /// "this \"is\" a test"
    /// ```
    String,

    /// `true` or `false`
    Bool,

    /// Optional sign, digits, optional fraction
    ///
    /// # Examples
    /// ```text
    /// 12
    /// -12.3
    /// +1.2
    /// .50
    /// ```
    Number,

    /// The `null` keyword
    Null,

    // Punctuation
    /// `(`
    LeftParen,

    /// `)`
    RightParen,

    /// `,`
    Comma,

    /// Run of spaces, tabs and newlines
    ///
    /// Emitted as a token of its own; the parser skips it.
    Whitespace,

    /// One of the nine operator keywords
    ///
    /// # Examples
    /// ```text
    /// and
    /// eq
    /// in
    /// ```
    Operator(Operator),

    /// End of input
    #[default]
    Eof,

    /// Lexing failed; terminates the token stream
    Error(LexError),
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        matches!(self, TokenKind::Operator(_))
    }

    /// Keywords render as `<kw>` in diagnostics.
    fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Operator(_) | TokenKind::Null)
    }
}

/// A lexical unit with its source span and the line it started on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub pos: Pos,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, pos: Pos, line: usize) -> Self {
        Token {
            kind,
            text,
            pos,
            line,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Error(err) => write!(f, "{}", err),
            kind if kind.is_keyword() => write!(f, "<{}>", self.text),
            _ if self.text.chars().count() > 10 => {
                let head: String = self.text.chars().take(10).collect();
                write!(f, "{:?}...", head)
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}
