//! Tokenizer for RQL statements.
//!
//! The lexer is a small state machine. Each state consumes characters and
//! either emits a token or hands over to another state; [`Lexer::next_token`]
//! runs states until one token is ready, so tokens are produced lazily and
//! strictly in source order. Whitespace is emitted as a token of its own and
//! the first error token ends the stream.

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Operator, Pos, Token, TokenKind};
use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Statement,
    Whitespace,
    Identifier,
    Number,
    String,
}

pub struct Lexer<'a> {
    input: &'a str,
    state: Option<State>,
    /// Start of the token being scanned.
    start: usize,
    position: usize,
    /// Byte width of the last character read, for `backup_char`.
    width: usize,
    depth: usize,
    /// Line the next token starts on. Only advanced when a token spanning
    /// newlines is emitted.
    line: usize,
    pending: Option<Token<'a>>,
    terminal: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            state: Some(State::Statement),
            start: 0,
            position: 0,
            width: 0,
            depth: 0,
            line: 1,
            pending: None,
            terminal: None,
        }
    }

    /// Returns the next token. Once the stream has ended, keeps returning the
    /// token that ended it (EOF or the error).
    pub fn next_token(&mut self) -> Token<'a> {
        loop {
            if let Some(token) = self.pending.take() {
                if matches!(token.kind, TokenKind::Eof | TokenKind::Error(_)) {
                    self.terminal = Some(token.clone());
                }
                return token;
            }
            if let Some(token) = &self.terminal {
                return token.clone();
            }
            match self.state {
                Some(state) => self.state = self.step(state),
                None => {
                    let eof = Token::new(TokenKind::Eof, "", Pos(self.position), self.line);
                    self.terminal = Some(eof.clone());
                    return eof;
                }
            }
        }
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Statement => self.lex_statement(),
            State::Whitespace => self.lex_whitespace(),
            State::Identifier => self.lex_identifier(),
            State::Number => self.lex_number(),
            State::String => self.lex_string(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.input[self.position..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.position += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Steps back over the last character read. Only valid once per read.
    fn backup_char(&mut self) {
        self.position -= self.width;
        self.width = 0;
    }

    fn accept(&mut self, valid: &str) -> bool {
        match self.peek_char() {
            Some(c) if valid.contains(c) => {
                self.next_char();
                true
            }
            _ => false,
        }
    }

    fn accept_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.next_char();
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let input = self.input;
        let text = &input[self.start..self.position];
        let token = Token::new(kind, text, Pos(self.start), self.line);
        trace!(kind = ?token.kind, pos = self.start, line = self.line, "token");
        if matches!(token.kind, TokenKind::Whitespace | TokenKind::String) {
            self.line += text.matches('\n').count();
        }
        self.pending = Some(token);
        self.start = self.position;
    }

    fn error(&mut self, err: LexError) -> Option<State> {
        trace!(error = %err, pos = self.start, line = self.line, "lex error");
        let input = self.input;
        let text = &input[self.start..self.position];
        self.pending = Some(Token::new(
            TokenKind::Error(err),
            text,
            Pos(self.start),
            self.line,
        ));
        None
    }

    fn lex_statement(&mut self) -> Option<State> {
        match self.next_char() {
            None => {
                if self.depth > 0 {
                    return self.error(LexError::UnexpectedEnd);
                }
                self.emit(TokenKind::Eof);
                return None;
            }
            Some(c) if is_whitespace(c) => return Some(State::Whitespace),
            Some('"') => return Some(State::String),
            Some(c) if c == '.' || c == '+' || c == '-' || c.is_ascii_digit() => {
                self.backup_char();
                return Some(State::Number);
            }
            Some('(') => {
                self.depth += 1;
                self.emit(TokenKind::LeftParen);
            }
            Some(')') => {
                if self.depth == 0 {
                    return self.error(LexError::UnexpectedRightParen);
                }
                self.depth -= 1;
                self.emit(TokenKind::RightParen);
            }
            Some(',') => self.emit(TokenKind::Comma),
            Some(c) if is_alphanumeric(c) => {
                self.backup_char();
                return Some(State::Identifier);
            }
            Some(c) => return self.error(LexError::UnrecognizedCharacter(c)),
        }
        Some(State::Statement)
    }

    /// The first whitespace character has already been read.
    fn lex_whitespace(&mut self) -> Option<State> {
        while self.peek_char().is_some_and(is_whitespace) {
            self.next_char();
        }
        self.emit(TokenKind::Whitespace);
        Some(State::Statement)
    }

    fn lex_identifier(&mut self) -> Option<State> {
        while self.peek_char().is_some_and(is_alphanumeric) {
            self.next_char();
        }
        if let Some(c) = self.peek_char().filter(|&c| !is_terminator(c)) {
            return self.error(LexError::BadCharacter(c));
        }

        let word = &self.input[self.start..self.position];
        let kind = match word {
            "null" => TokenKind::Null,
            "true" | "false" => TokenKind::Bool,
            _ => match Operator::from_keyword(word) {
                Some(op) => TokenKind::Operator(op),
                None => TokenKind::Identifier,
            },
        };
        self.emit(kind);
        Some(State::Statement)
    }

    fn lex_number(&mut self) -> Option<State> {
        self.accept("+-");
        self.accept_digits();
        if self.accept(".") {
            self.accept_digits();
        }
        // a number must not run straight into a name
        if self.peek_char().is_some_and(is_alphanumeric) {
            self.next_char();
            let text = self.input[self.start..self.position].to_string();
            return self.error(LexError::BadNumber(text));
        }
        self.emit(TokenKind::Number);
        Some(State::Statement)
    }

    /// The opening quote has already been read.
    fn lex_string(&mut self) -> Option<State> {
        loop {
            match self.next_char() {
                Some('\\') => match self.next_char() {
                    None | Some('\n') => return self.error(LexError::UnterminatedString),
                    Some(_) => {}
                },
                None | Some('\n') => return self.error(LexError::UnterminatedString),
                Some('"') => break,
                Some(_) => {}
            }
        }
        self.emit(TokenKind::String);
        Some(State::Statement)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    /// Yields every token up to and including EOF or the first error.
    fn next(&mut self) -> Option<Token<'a>> {
        if self.terminal.is_some() && self.pending.is_none() {
            return None;
        }
        Some(self.next_token())
    }
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n'
}

/// Identifier characters: `_`, `.`, Unicode letters and decimal digits.
fn is_alphanumeric(c: char) -> bool {
    if c.is_ascii() {
        return c == '_' || c == '.' || c.is_ascii_alphanumeric();
    }
    let mut buf = [0u8; 4];
    letter_or_digit().is_match(c.encode_utf8(&mut buf))
}

/// General categories L* and Nd. Letter numbers, other numbers and marks
/// are excluded.
fn letter_or_digit() -> &'static Regex {
    static LETTER_OR_DIGIT: OnceLock<Regex> = OnceLock::new();
    LETTER_OR_DIGIT
        .get_or_init(|| Regex::new(r"^[\p{L}\p{Nd}]$").expect("letter/digit class compiles"))
}

/// Characters allowed right after an identifier.
fn is_terminator(c: char) -> bool {
    is_whitespace(c) || matches!(c, '.' | ',' | '(' | ')')
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input).map(|t| t.kind).collect()
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("and or null true"),
        vec![
            TokenKind::Operator(Operator::And),
            TokenKind::Whitespace,
            TokenKind::Operator(Operator::Or),
            TokenKind::Whitespace,
            TokenKind::Null,
            TokenKind::Whitespace,
            TokenKind::Bool,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_terminal_token_repeats() {
    let mut lexer = Lexer::new("(");
    assert_eq!(lexer.next_token().kind, TokenKind::LeftParen);
    let err = lexer.next_token();
    assert_eq!(err.kind, TokenKind::Error(LexError::UnexpectedEnd));
    assert_eq!(lexer.next_token(), err);
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_line_credited_on_emit() {
    let tokens: Vec<_> = Lexer::new("eq(\n\nid,\"a\")").collect();
    // eq ( ws id , "a" ) EOF
    assert_eq!(tokens[2].kind, TokenKind::Whitespace);
    assert_eq!(tokens[2].line, 1);
    assert_eq!(tokens[3].line, 3);
}
