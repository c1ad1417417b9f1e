//! Literal leaves: numbers and strings.
//!
//! Both keep their source spelling so that rendering a tree reproduces
//! literals like `+1.2`, `073` or `"a\"b"` exactly, and also carry the
//! interpreted value for consumers that need it.

use std::fmt;
use std::str::Chars;
use std::sync::Arc;

use crate::ast::{Pos, Source};
use crate::error::LiteralError;

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// A numeric literal, stored under every representation that can hold it.
///
/// `100` is readable as `i64`, `u64` and `f64` at once; `-73` has no `u64`
/// form; `18446744073709551615` only fits `u64` (and `f64`). At least one of
/// the three flags is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    text: String,
    is_int: bool,
    is_uint: bool,
    is_float: bool,
    int64: i64,
    uint64: u64,
    float64: f64,
}

impl NumberNode {
    /// Interprets `text` as a number.
    ///
    /// Integer forms are tried first and the float derived from them. Text
    /// that only parses as a float is accepted when it has a fraction or an
    /// exponent; a bare integer that overflowed both `i64` and `u64` is an
    /// [`LiteralError::IntegerOverflow`] rather than a float.
    pub fn parse(pos: Pos, text: &str) -> Result<Self, LiteralError> {
        let mut n = NumberNode {
            pos,
            source: None,
            text: text.to_string(),
            is_int: false,
            is_uint: false,
            is_float: false,
            int64: 0,
            uint64: 0,
            float64: 0.0,
        };

        let unsigned = parse_uint(text);
        if let Some(u) = unsigned {
            n.is_uint = true;
            n.uint64 = u;
        }
        if let Some(i) = parse_int(text) {
            n.is_int = true;
            n.int64 = i;
            // "-0" fails the unsigned parse but is still zero
            if i == 0 {
                n.is_uint = true;
                n.uint64 = 0;
            }
        }

        if n.is_int {
            n.is_float = true;
            n.float64 = n.int64 as f64;
        } else if n.is_uint {
            n.is_float = true;
            n.float64 = n.uint64 as f64;
        } else if let Some(f) = parse_float(text) {
            if !text.contains(['.', 'e', 'E']) {
                return Err(LiteralError::IntegerOverflow(text.to_string()));
            }
            n.is_float = true;
            n.float64 = f;
            if (-TWO_POW_63..TWO_POW_63).contains(&f) && (f as i64) as f64 == f {
                n.is_int = true;
                n.int64 = f as i64;
            }
            if (0.0..TWO_POW_64).contains(&f) && (f as u64) as f64 == f {
                n.is_uint = true;
                n.uint64 = f as u64;
            }
        }

        if !n.is_int && !n.is_uint && !n.is_float {
            return Err(LiteralError::IllegalNumber(text.to_string()));
        }
        Ok(n)
    }

    pub(crate) fn attach(mut self, source: &Arc<Source>) -> Self {
        self.source = Some(Arc::clone(source));
        self
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn source(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    /// Literal as written in the source.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_int(&self) -> bool {
        self.is_int
    }

    pub fn is_uint(&self) -> bool {
        self.is_uint
    }

    pub fn is_float(&self) -> bool {
        self.is_float
    }

    /// Signed value; meaningful only when [`is_int`](Self::is_int).
    pub fn int64(&self) -> i64 {
        self.int64
    }

    /// Unsigned value; meaningful only when [`is_uint`](Self::is_uint).
    pub fn uint64(&self) -> u64 {
        self.uint64
    }

    /// Float value; meaningful only when [`is_float`](Self::is_float).
    pub fn float64(&self) -> f64 {
        self.float64
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.is_int.then_some(self.int64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.is_uint.then_some(self.uint64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.is_float.then_some(self.float64)
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        self.clone().attach(source)
    }
}

impl fmt::Display for NumberNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Splits off a base prefix. A leading `0` followed by more digits is octal.
fn split_radix(text: &str) -> (&str, u32) {
    let prefixed = |lower: &str, upper: &str| {
        text.strip_prefix(lower).or_else(|| text.strip_prefix(upper))
    };
    if let Some(rest) = prefixed("0x", "0X") {
        (rest, 16)
    } else if let Some(rest) = prefixed("0o", "0O") {
        (rest, 8)
    } else if let Some(rest) = prefixed("0b", "0B") {
        (rest, 2)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    }
}

/// Unsigned integer with optional base prefix and no sign.
fn parse_uint(text: &str) -> Option<u64> {
    let (digits, radix) = split_radix(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Signed integer: optional `+`/`-`, then an unsigned magnitude that must fit.
fn parse_int(text: &str) -> Option<i64> {
    let (negative, magnitude) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let m = parse_uint(magnitude)?;
    if negative {
        if m <= i64::MIN.unsigned_abs() {
            Some((m as i64).wrapping_neg())
        } else {
            None
        }
    } else {
        i64::try_from(m).ok()
    }
}

/// Decimal float. Finite text that overflows to infinity is rejected.
fn parse_float(text: &str) -> Option<f64> {
    let f: f64 = text.parse().ok()?;
    if f.is_infinite() && !text.to_ascii_lowercase().contains("inf") {
        return None;
    }
    Some(f)
}

/// A double-quoted string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringNode {
    pos: Pos,
    source: Option<Arc<Source>>,
    quoted: String,
    text: String,
}

impl StringNode {
    /// Builds a string node from its quoted source form, resolving escapes.
    pub fn parse(pos: Pos, quoted: &str) -> Result<Self, LiteralError> {
        let text = unquote(quoted)?;
        Ok(StringNode {
            pos,
            source: None,
            quoted: quoted.to_string(),
            text,
        })
    }

    pub(crate) fn attach(mut self, source: &Arc<Source>) -> Self {
        self.source = Some(Arc::clone(source));
        self
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn source(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    /// Source spelling, quotes and escapes included.
    pub fn quoted(&self) -> &str {
        &self.quoted
    }

    /// Value with quotes removed and escapes resolved.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn copy_into(&self, source: &Arc<Source>) -> Self {
        self.clone().attach(source)
    }
}

impl fmt::Display for StringNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quoted)
    }
}

/// Strips the surrounding double quotes and resolves escape sequences.
///
/// Supported escapes: `\a \b \f \n \r \t \v \\ \"`, `\xHH`, octal `\NNN`,
/// `\uHHHH` and `\UHHHHHHHH`. Byte escapes must combine into valid UTF-8.
pub fn unquote(quoted: &str) -> Result<String, LiteralError> {
    let invalid = || LiteralError::InvalidString(quoted.to_string());
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(invalid)?;

    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return Err(invalid()),
            '\\' => {
                let escape = chars.next().ok_or_else(invalid)?;
                match escape {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0c),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0b),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    'x' => {
                        let v = radix_digits(&mut chars, 2, 16).ok_or_else(invalid)?;
                        out.push(v as u8);
                    }
                    'u' | 'U' => {
                        let width = if escape == 'u' { 4 } else { 8 };
                        let v = radix_digits(&mut chars, width, 16).ok_or_else(invalid)?;
                        let ch = char::from_u32(v).ok_or_else(invalid)?;
                        push_char(&mut out, ch);
                    }
                    '0'..='7' => {
                        let rest = radix_digits(&mut chars, 2, 8).ok_or_else(invalid)?;
                        let v = escape.to_digit(8).unwrap_or(0) * 64 + rest;
                        if v > 0xff {
                            return Err(invalid());
                        }
                        out.push(v as u8);
                    }
                    _ => return Err(invalid()),
                }
            }
            c => push_char(&mut out, c),
        }
    }
    String::from_utf8(out).map_err(|_| invalid())
}

fn radix_digits(chars: &mut Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
