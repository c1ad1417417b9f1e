//! Recursive-descent parser for RQL.
//!
//! Grammar:
//!
//! ```text
//! statement := operator? EOF
//! operator  := OPERATOR '(' list ')'
//! list      := (value (',' value)*)? ','?
//! value     := IDENT | STRING | NUMBER | BOOL | NULL | operator | '(' list ')'
//! ```
//!
//! Whitespace tokens are skipped everywhere. The first violation aborts the
//! parse and is returned as a [`ParseError`]; nothing is recovered.

use std::sync::Arc;

use crate::ast::{
    BoolNode, IdentifierNode, ListNode, NullNode, NumberNode, OperatorNode, Source,
    StatementNode, StringNode, Token, TokenKind,
};
use crate::diagnostics;
use crate::error::{ErrorKind, ParseError, Result, SyntaxError};
use crate::lexer::Lexer;

/// Size of the pushback buffer.
const LOOKAHEAD: usize = 3;

/// Deepest allowed nesting of parenthesized lists, counting operator operand
/// lists and value lists alike.
pub const MAX_NESTING: usize = 128;

/// Transient state of one parse: the token source and the pushback buffer.
pub struct Parser<'a> {
    source: &'a Arc<Source>,
    lexer: Lexer<'a>,
    token: [Token<'a>; LOOKAHEAD],
    peek_count: usize,
    /// Lists currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Arc<Source>) -> Self {
        Parser {
            source,
            lexer: Lexer::new(source.text()),
            token: Default::default(),
            peek_count: 0,
            depth: 0,
        }
    }

    /// Consumes the next token.
    fn next(&mut self) -> Token<'a> {
        if self.peek_count > 0 {
            self.peek_count -= 1;
        } else {
            self.token[0] = self.lexer.next_token();
        }
        self.token[self.peek_count].clone()
    }

    /// Pushes the last consumed token back.
    fn backup(&mut self) {
        debug_assert!(self.peek_count < LOOKAHEAD, "pushback buffer overflow");
        self.peek_count += 1;
    }

    /// Returns the next token without consuming it.
    fn peek(&mut self) -> Token<'a> {
        if self.peek_count > 0 {
            return self.token[self.peek_count - 1].clone();
        }
        self.peek_count = 1;
        self.token[0] = self.lexer.next_token();
        self.token[0].clone()
    }

    /// Consumes tokens up to and including the next non-whitespace one. A
    /// lexical error token becomes the parse error.
    fn next_non_space(&mut self) -> Result<Token<'a>> {
        loop {
            let token = self.next();
            match &token.kind {
                TokenKind::Whitespace => continue,
                TokenKind::Error(err) => return Err(self.fail(&token, err.clone())),
                _ => return Ok(token),
            }
        }
    }

    fn peek_non_space(&mut self) -> Result<Token<'a>> {
        let token = self.next_non_space()?;
        self.backup();
        Ok(token)
    }

    fn fail(&self, token: &Token<'_>, kind: impl Into<ErrorKind>) -> ParseError {
        let loc = diagnostics::resolve(self.source.text(), token.pos);
        ParseError::new(self.source.name(), token.line, loc.column, token.pos, kind)
    }

    fn unexpected(&self, token: &Token<'_>, context: &'static str) -> ParseError {
        self.fail(
            token,
            SyntaxError::Unexpected {
                found: token.to_string(),
                context,
            },
        )
    }

    /// Consumes the next token and checks that it is of the `expected` kind.
    fn expect(&mut self, expected: TokenKind, context: &'static str) -> Result<Token<'a>> {
        let token = self.next_non_space()?;
        if token.kind != expected {
            return Err(self.unexpected(&token, context));
        }
        Ok(token)
    }

    /// Parses a whole statement, through to EOF.
    pub fn parse(mut self) -> Result<StatementNode> {
        let start = self.peek().pos;
        let mut operator = None;
        if self.peek_non_space()?.kind.is_operator() {
            operator = Some(self.operator()?);
        }
        let token = self.next_non_space()?;
        if token.kind != TokenKind::Eof {
            return Err(self.fail(&token, SyntaxError::TrailingToken(token.to_string())));
        }
        Ok(StatementNode::attached(start, self.source, operator))
    }

    fn operator(&mut self) -> Result<OperatorNode> {
        let token = self.next_non_space()?;
        let TokenKind::Operator(op) = token.kind else {
            return Err(self.unexpected(&token, "operator"));
        };
        let operands = self.list()?;
        Ok(OperatorNode::attached(token.pos, self.source, op, operands))
    }

    fn list(&mut self) -> Result<ListNode> {
        let open = self.expect(TokenKind::LeftParen, "left parentheses")?;
        if self.depth >= MAX_NESTING {
            return Err(self.fail(&open, SyntaxError::NestingTooDeep(MAX_NESTING)));
        }
        self.depth += 1;
        let mut list = ListNode::attached(open.pos, self.source);
        let mut expect_comma = false;
        loop {
            if expect_comma {
                let token = self.next_non_space()?;
                match token.kind {
                    TokenKind::Comma => {}
                    TokenKind::RightParen => self.backup(),
                    _ => return Err(self.unexpected(&token, "comma or right parentheses")),
                }
            }
            let token = self.next_non_space()?;
            match token.kind {
                TokenKind::Identifier => {
                    list.push(IdentifierNode::attached(token.pos, self.source, token.text));
                }
                TokenKind::String => {
                    let node = StringNode::parse(token.pos, token.text)
                        .map_err(|e| self.fail(&token, e))?;
                    list.push(node.attach(self.source));
                }
                TokenKind::Bool => {
                    list.push(BoolNode::attached(token.pos, self.source, token.text == "true"));
                }
                TokenKind::Number => {
                    let node = NumberNode::parse(token.pos, token.text)
                        .map_err(|e| self.fail(&token, e))?;
                    list.push(node.attach(self.source));
                }
                TokenKind::Null => list.push(NullNode::attached(token.pos, self.source)),
                TokenKind::Operator(_) => {
                    self.backup();
                    let op = self.operator()?;
                    list.push(op);
                }
                TokenKind::LeftParen => {
                    self.backup();
                    let nested = self.list()?;
                    list.push(nested);
                }
                TokenKind::RightParen => break,
                _ => return Err(self.unexpected(&token, "value")),
            }
            expect_comma = true;
        }
        self.depth -= 1;
        Ok(list)
    }
}

#[test]
fn test_peek_backup() {
    let source = Arc::new(Source::new("test peek", "eq(id, 12)"));
    let mut parser = Parser::new(&source);
    let peeked = parser.peek();
    let token = parser.next();
    assert_eq!(peeked, token);
    parser.backup();
    assert_eq!(parser.peek(), token);
    assert_eq!(parser.next(), token);
    assert_eq!(parser.next().kind, TokenKind::LeftParen);
}

#[test]
fn test_peek_non_space() {
    let source = Arc::new(Source::new("test peekNonSpace", "  eq()"));
    let mut parser = Parser::new(&source);
    let token = parser.peek_non_space().unwrap();
    assert!(token.kind.is_operator());
    assert_eq!(parser.next_non_space().unwrap(), token);
}
