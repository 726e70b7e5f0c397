use alloc::string::String;

use thiserror::Error;

/// A literal that could not be decoded, with the offset (in bytes, relative
/// to the start of the literal text) where decoding stopped.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at offset {offset}")]
pub struct LiteralError {
    pub(crate) source: SyntaxError,
    pub(crate) offset: usize,
}

impl LiteralError {
    pub(crate) fn new(source: SyntaxError, offset: usize) -> Self {
        Self { source, offset }
    }

    /// The underlying syntax error.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxError {
        &self.source
    }

    /// Byte offset into the literal text.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Reasons the literal decoder rejects its input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    /// A character that cannot start or continue a literal.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A non-hex digit inside a `\x`, `\u` or `\U` escape.
    #[error("invalid escape sequence at character: '{0}'")]
    InvalidEscapeChar(char),
    /// An escape whose code point is not a Unicode scalar value.
    #[error("invalid unicode escape sequence \\u{0:X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// A malformed or out-of-range number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// A string literal without its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// The literal ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A comma directly followed by the closing bracket.
    #[error("trailing comma in sequence")]
    TrailingComma,
    /// Sequences nested beyond the decoder's depth limit.
    #[error("sequences nested deeper than {0} levels")]
    NestingTooDeep(usize),
    /// The call arguments decoded to a value that is neither a string nor a
    /// sequence.
    #[error("call arguments must be a string or a sequence")]
    NotASequence,
}

/// Failure to tokenize a command invocation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenizeError {
    /// The parenthesized argument list after the command name is not a valid
    /// literal. The message must not be treated as a command invocation.
    #[error("malformed call syntax at {position}: {source}")]
    MalformedCallSyntax {
        /// Byte offset of the opening parenthesis in the buffer.
        position: usize,
        /// Why the argument list was rejected.
        source: LiteralError,
    },
}

/// Failure to split the argument region into words.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// A quote character inside an unquoted word.
    #[error("unexpected quote mark '{0}' in non-quoted string")]
    UnexpectedQuote(char),
    /// A closing quote followed by something other than whitespace.
    #[error("expected space after closing quotation but received '{0}'")]
    InvalidEndOfQuotedString(char),
    /// The buffer ended inside a quoted word.
    #[error("expected closing '{0}'")]
    ExpectedClosingQuote(char),
}

/// Failure to turn a message into an invocation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// See [`TokenizeError`].
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// See [`ArgumentError`].
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}
