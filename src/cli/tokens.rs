//! Token stream dump for debugging statements

use crate::ast::{Token, TokenKind};
use crate::diagnostics;
use crate::lexer::Lexer;

pub fn token_kind_name(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Identifier => "identifier",
        TokenKind::String => "string",
        TokenKind::Bool => "boolean",
        TokenKind::Number => "number",
        TokenKind::Null => "null",
        TokenKind::LeftParen => "(",
        TokenKind::RightParen => ")",
        TokenKind::Comma => ",",
        TokenKind::Whitespace => "whitespace",
        TokenKind::Operator(op) => op.as_str(),
        TokenKind::Eof => "EOF",
        TokenKind::Error(_) => "error",
    }
}

fn format_token(statement: &str, token: &Token<'_>) -> String {
    let loc = diagnostics::resolve(statement, token.pos).to_string();
    format!("{:<8} {:<12} {}", loc, token_kind_name(&token.kind), token)
}

/// One line per token: `line:column`, kind, and the token itself.
pub fn format_tokens(statement: &str) -> String {
    let mut out = String::new();
    for token in Lexer::new(statement) {
        out.push_str(&format_token(statement, &token));
        out.push('\n');
    }
    out
}
