//! Literal values accepted inside a call-syntax argument list.
//!
//! This module defines the [`Literal`] enum and [`decode`], the entry point of
//! the recursive-descent decoder in [`parser`]. The grammar is deliberately
//! small: numbers, quoted strings, and tuples or lists of these.
//!
//! The textual form of a literal ([`Display`](core::fmt::Display)) matches
//! what the bot's command handlers historically received: integers in
//! decimal, floats with a trailing `.0` when integral, and nested sequences in
//! their bracketed form with single-quoted strings. Inside a sequence,
//! non-printable characters in strings are written as `\xhh`, `\uhhhh` or
//! `\Uhhhhhhhh` escapes, so the text decodes back to the same value.

mod escape;
mod parser;

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

pub use parser::MAX_DEPTH;

use crate::error::{LiteralError, SyntaxError};

/// A decoded literal value.
///
/// # Examples
///
/// ```
/// use callview::{Literal, decode};
///
/// let value = decode(r#"("key", 2, 3.5)"#).unwrap();
/// assert_eq!(
///     value,
///     Literal::Tuple(vec![
///         Literal::String("key".into()),
///         Literal::Integer(2),
///         Literal::Float(3.5),
///     ])
/// );
/// assert_eq!(value.to_string(), "('key', 2, 3.5)");
/// ```
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// An integer that fits in an `i64`.
    Integer(i64),
    /// An integer outside the `i64` range, as decimal text with an optional
    /// leading `-` and no leading zeros.
    BigInteger(String),
    /// A number written with a fraction or an exponent.
    Float(f64),
    /// A quoted string, with escapes already decoded.
    String(String),
    /// A parenthesized, comma-separated sequence.
    Tuple(Vec<Literal>),
    /// A bracketed, comma-separated sequence.
    List(Vec<Literal>),
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl Literal {
    /// Returns `true` if the literal is a [`String`](Literal::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the literal is a tuple or a list.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Tuple(..) | Self::List(..))
    }

    /// Returns the string contents if the literal is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Flattens the decoded argument list of a call into its elements.
    ///
    /// A lone string is an argument list of one: `cmd("hello world")` passes
    /// a single argument, not one per word.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::NotASequence`] when the literal is a bare number.
    pub fn into_arguments(self) -> Result<Vec<Literal>, SyntaxError> {
        match self {
            Self::String(s) => Ok(alloc::vec![Self::String(s)]),
            Self::Tuple(items) | Self::List(items) => Ok(items),
            Self::Integer(_) | Self::BigInteger(_) | Self::Float(_) => {
                Err(SyntaxError::NotASequence)
            }
        }
    }
}

/// Decodes `src` as a single literal value.
///
/// Surrounding whitespace is ignored; anything else after the value is an
/// error.
///
/// # Errors
///
/// Returns a [`LiteralError`] carrying the byte offset into `src` where the
/// input stopped making sense.
pub fn decode(src: &str) -> Result<Literal, LiteralError> {
    parser::LiteralParser::new(src).parse()
}

/// Decodes the parenthesized argument list of a call, such as
/// `("key", 2, 3.5)`, into its arguments.
///
/// Unlike [`decode`], a trailing comma directly inside the outer parentheses
/// is rejected: `(1, )` is malformed here. Nested sequences may still end in
/// a comma, so `((1,), [2,])` passes two arguments.
///
/// ```
/// use callview::{Literal, decode_arguments};
///
/// let args = decode_arguments(r#"("key", (3,))"#).unwrap();
/// assert_eq!(args[1], Literal::Tuple(vec![Literal::Integer(3)]));
/// assert!(decode_arguments("(1, )").is_err());
/// ```
///
/// # Errors
///
/// Any error of [`decode`], [`SyntaxError::TrailingComma`] for the outer
/// list, and [`SyntaxError::NotASequence`] (at the offset of the value) when
/// the list holds a single number.
pub fn decode_arguments(src: &str) -> Result<Vec<Literal>, LiteralError> {
    parser::LiteralParser::for_arguments(src).parse_arguments()
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::BigInteger(n) => f.write_str(n),
            Literal::Float(n) => write_float(*n, f),
            Literal::String(s) => f.write_str(s),
            Literal::Tuple(items) => {
                f.write_char('(')?;
                write_items(items, f)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Literal::List(items) => {
                f.write_char('[')?;
                write_items(items, f)?;
                f.write_char(']')
            }
        }
    }
}

fn write_items(items: &[Literal], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for item in items {
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        match item {
            Literal::String(s) => write_repr(s, f)?,
            other => write!(f, "{other}")?,
        }
    }
    Ok(())
}

/// Writes a float the way the bot's handlers expect numbers to look:
/// shortest round-trip digits, `.0` for integral values, and a signed
/// two-digit exponent outside `[1e-4, 1e16)`.
fn write_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("nan");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "inf" } else { "-inf" });
    }

    let magnitude = if n < 0.0 { -n } else { n };
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let mut sci = String::new();
        write!(sci, "{n:e}")?;
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return write!(f, "{mantissa}e{sign}{digits:0>2}");
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let integral = n == (n as i64) as f64;
    if integral {
        write!(f, "{n:.1}")
    } else {
        write!(f, "{n}")
    }
}

/// Writes `s` as a quoted string literal, preferring single quotes.
fn write_repr(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if !is_printable(c) => match u32::from(c) {
                code @ ..0x100 => write!(f, "\\x{code:02x}")?,
                code @ ..0x1_0000 => write!(f, "\\u{code:04x}")?,
                code => write!(f, "\\U{code:08x}")?,
            },
            _ => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Control characters, separators other than the ASCII space, format
/// characters and private-use characters are not printable. Unassigned code
/// points are treated as printable.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{61c}'
                | '\u{6dd}'
                | '\u{70f}'
                | '\u{180e}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{e000}'..='\u{f8ff}'
                | '\u{f0000}'..='\u{10ffff}'
        ))
}
