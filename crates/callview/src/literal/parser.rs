//! Recursive-descent decoder for call-syntax literals.
//!
//! Grammar (whitespace, including newlines, may appear between tokens):
//!
//! ```text
//! literal := value EOF
//! value   := string+ | number | tuple | list
//! tuple   := "(" [ value ( "," value )* [ "," ] ] ")"   "(v)" is just v
//! list    := "[" [ value ( "," value )* [ "," ] ] "]"
//! number  := ["+" | "-"] ( decimal | "0x" hex | "0o" oct | "0b" bin )
//! string  := "'" ... "'" | '"' ... '"'             adjacent strings join
//! ```
//!
//! A trailing comma is accepted inside a sequence (`(3,)`, `[1,]`), except
//! directly inside the outer parentheses of a call's argument list: there
//! `cmd(1, )` is malformed rather than a call with one argument.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use super::{Literal, escape::HexEscapeBuffer};
use crate::error::{LiteralError, SyntaxError};

/// Maximum nesting depth of tuples and lists.
pub const MAX_DEPTH: usize = 64;

pub(crate) struct LiteralParser<'src> {
    src: &'src str,
    pos: usize,
    depth: usize,
    /// Reject a trailing comma directly inside outer parentheses.
    strict_outer: bool,
}

impl<'src> LiteralParser<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            strict_outer: false,
        }
    }

    /// A parser for the parenthesized argument list of a call.
    pub(crate) fn for_arguments(src: &'src str) -> Self {
        Self {
            strict_outer: true,
            ..Self::new(src)
        }
    }

    pub(crate) fn parse(mut self) -> Result<Literal, LiteralError> {
        self.parse_complete()
    }

    /// Decodes the whole input and flattens it into call arguments.
    pub(crate) fn parse_arguments(mut self) -> Result<Vec<Literal>, LiteralError> {
        self.skip_ws();
        // Errors about the value as a whole point at its first character.
        let value_start = match self.src[self.pos..].strip_prefix('(') {
            Some(rest) => self.src.len() - rest.trim_start().len(),
            None => self.pos,
        };
        self.parse_complete()?
            .into_arguments()
            .map_err(|e| Self::error_at(e, value_start))
    }

    fn parse_complete(&mut self) -> Result<Literal, LiteralError> {
        self.skip_ws();
        let value = if self.strict_outer && self.peek() == Some('(') {
            self.parse_parenthesized(true)?
        } else {
            self.parse_value()?
        };
        self.skip_ws();
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(self.error(SyntaxError::InvalidCharacter(c))),
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    #[inline]
    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, source: SyntaxError) -> LiteralError {
        LiteralError::new(source, self.pos)
    }

    fn error_at(source: SyntaxError, offset: usize) -> LiteralError {
        LiteralError::new(source, offset)
    }

    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        match self.peek() {
            None => Err(self.error(SyntaxError::UnexpectedEndOfInput)),
            Some('(') => self.parse_parenthesized(false),
            Some('[') => {
                self.bump();
                let items = self.parse_items(']')?;
                Ok(Literal::List(items))
            }
            Some('\'' | '"') => self.parse_strings(),
            Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.parse_number(),
            Some(c) => Err(self.error(SyntaxError::InvalidCharacter(c))),
        }
    }

    /// `( ... )` is a tuple unless it holds exactly one value and no comma,
    /// in which case it is that value. `outer` marks the argument list of a
    /// call, where a trailing comma is an error.
    fn parse_parenthesized(&mut self, outer: bool) -> Result<Literal, LiteralError> {
        self.enter()?;
        self.bump();
        self.skip_ws();

        if self.peek() == Some(')') {
            self.bump();
            self.depth -= 1;
            return Ok(Literal::Tuple(Vec::new()));
        }

        let first = self.parse_value()?;
        self.skip_ws();
        let result = match self.peek() {
            Some(')') => {
                self.bump();
                first
            }
            Some(',') => {
                self.bump();
                let mut items = alloc::vec![first];
                self.parse_rest(')', &mut items, !outer)?;
                Literal::Tuple(items)
            }
            Some(c) => return Err(self.error(SyntaxError::InvalidCharacter(c))),
            None => return Err(self.error(SyntaxError::UnexpectedEndOfInput)),
        };
        self.depth -= 1;
        Ok(result)
    }

    /// Parses the items of a sequence whose opening bracket was consumed.
    fn parse_items(&mut self, close: char) -> Result<Vec<Literal>, LiteralError> {
        self.enter()?;
        self.skip_ws();
        let mut items = Vec::new();
        if self.peek() == Some(close) {
            self.bump();
        } else {
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.bump() {
                Some(c) if c == close => {}
                Some(',') => self.parse_rest(close, &mut items, true)?,
                Some(c) => {
                    return Err(Self::error_at(
                        SyntaxError::InvalidCharacter(c),
                        self.pos - c.len_utf8(),
                    ));
                }
                None => return Err(self.error(SyntaxError::UnexpectedEndOfInput)),
            }
        }
        self.depth -= 1;
        Ok(items)
    }

    /// Parses `value ("," value)* [","] close` after a separating comma.
    fn parse_rest(
        &mut self,
        close: char,
        items: &mut Vec<Literal>,
        allow_trailing: bool,
    ) -> Result<(), LiteralError> {
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                if !allow_trailing {
                    return Err(self.error(SyntaxError::TrailingComma));
                }
                self.bump();
                return Ok(());
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => {}
                Some(c) if c == close => return Ok(()),
                Some(c) => {
                    return Err(Self::error_at(
                        SyntaxError::InvalidCharacter(c),
                        self.pos - c.len_utf8(),
                    ));
                }
                None => return Err(self.error(SyntaxError::UnexpectedEndOfInput)),
            }
        }
    }

    fn enter(&mut self) -> Result<(), LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(SyntaxError::NestingTooDeep(MAX_DEPTH)));
        }
        self.depth += 1;
        Ok(())
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_strings(&mut self) -> Result<Literal, LiteralError> {
        let mut out = String::new();
        while let Some(quote @ ('\'' | '"')) = self.peek() {
            self.bump();
            self.parse_string_body(quote, &mut out)?;
            self.skip_ws();
        }
        Ok(Literal::String(out))
    }

    fn parse_string_body(&mut self, quote: char, out: &mut String) -> Result<(), LiteralError> {
        loop {
            let start = self.pos;
            let Some(c) = self.bump() else {
                return Err(self.error(SyntaxError::UnterminatedString));
            };
            match c {
                c if c == quote => return Ok(()),
                '\n' => {
                    return Err(Self::error_at(SyntaxError::UnterminatedString, start));
                }
                '\\' => self.parse_escape(out)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let Some(c) = self.bump() else {
            return Err(self.error(SyntaxError::UnterminatedString));
        };
        match c {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(c),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            self.bump();
                            code = code * 8 + d;
                        }
                        None => break,
                    }
                }
                let ch = char::from_u32(code)
                    .ok_or_else(|| self.error(SyntaxError::InvalidUnicodeEscapeSequence(code)))?;
                out.push(ch);
            }
            'x' | 'u' | 'U' => {
                let mut escape = HexEscapeBuffer::for_introducer(c)
                    .ok_or_else(|| self.error(SyntaxError::InvalidEscapeChar(c)))?;
                loop {
                    let at = self.pos;
                    let Some(d) = self.bump() else {
                        return Err(self.error(SyntaxError::UnterminatedString));
                    };
                    match escape.feed(d) {
                        Ok(None) => {}
                        Ok(Some(ch)) => {
                            out.push(ch);
                            break;
                        }
                        Err(e) => return Err(Self::error_at(e, at)),
                    }
                }
            }
            // Unknown escapes are kept verbatim.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        self.skip_ws();

        let radix = match (self.peek(), self.peek_second()) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.bump();
            self.bump();
            let digits = self.take_digits(|c| c.is_digit(radix))?;
            if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                return Err(self.invalid_number(start));
            }
            let magnitude = to_decimal(&digits, radix);
            let text = if negative && magnitude != "0" {
                alloc::format!("-{magnitude}")
            } else {
                magnitude
            };
            return Ok(integer(text));
        }

        let mut text = String::new();
        if negative {
            text.push('-');
        }
        let mut is_float = false;

        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            text.push_str(&self.take_digits(|c| c.is_ascii_digit())?);
        }
        if self.peek() == Some('.') {
            self.bump();
            is_float = true;
            text.push('.');
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                text.push_str(&self.take_digits(|c| c.is_ascii_digit())?);
            }
        }
        if text.trim_start_matches('-') == "." || text.trim_start_matches('-').is_empty() {
            return Err(self.invalid_number(start));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            is_float = true;
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.bump();
                text.push(sign);
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.invalid_number(start));
            }
            text.push_str(&self.take_digits(|c| c.is_ascii_digit())?);
        }
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.invalid_number(start));
        }

        if is_float {
            text.parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| self.invalid_number(start))
        } else {
            let digits = text.trim_start_matches('-');
            // Leading zeros are only allowed for zero itself.
            if digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
                return Err(self.invalid_number(start));
            }
            Ok(integer(text))
        }
    }

    /// Consumes a run of digits matching `is_digit`, with single `_`
    /// separators between digits. Returns the digits without separators.
    fn take_digits<F>(&mut self, is_digit: F) -> Result<String, LiteralError>
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos;
        let mut digits = String::new();
        let mut after_separator = false;
        while let Some(c) = self.peek() {
            if is_digit(c) {
                digits.push(c);
                after_separator = false;
            } else if c == '_' && !digits.is_empty() && !after_separator {
                after_separator = true;
            } else {
                break;
            }
            self.bump();
        }
        if digits.is_empty() || after_separator {
            return Err(self.invalid_number(start));
        }
        Ok(digits)
    }

    fn invalid_number(&self, start: usize) -> LiteralError {
        let end = self.pos.max(start);
        Self::error_at(
            SyntaxError::InvalidNumber(self.src[start..end].to_string()),
            start,
        )
    }
}

/// An integer literal from its decimal text, which has no leading zeros
/// unless it is all zeros.
fn integer(text: String) -> Literal {
    match text.parse::<i64>() {
        Ok(n) => Literal::Integer(n),
        Err(_) => Literal::BigInteger(text),
    }
}

/// Converts digits in `radix` to decimal text without leading zeros.
fn to_decimal(digits: &str, radix: u32) -> String {
    // Little-endian decimal digits.
    let mut acc: Vec<u8> = Vec::new();
    for d in digits.chars().filter_map(|c| c.to_digit(radix)) {
        let mut carry = d;
        for slot in &mut acc {
            let v = u32::from(*slot) * radix + carry;
            *slot = decimal_digit(v);
            carry = v / 10;
        }
        while carry > 0 {
            acc.push(decimal_digit(carry));
            carry /= 10;
        }
    }
    if acc.is_empty() {
        return "0".to_string();
    }
    acc.iter().rev().map(|&d| char::from(b'0' + d)).collect()
}

#[allow(clippy::cast_possible_truncation)]
fn decimal_digit(v: u32) -> u8 {
    (v % 10) as u8
}
