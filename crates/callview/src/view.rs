//! Per-message tokenizer state.
//!
//! A [`StringView`] owns the message buffer together with three offsets into
//! it:
//!
//! - `index`: the read cursor,
//! - `previous`: the cursor before the last advance, for [`StringView::undo`],
//! - `end`: the logical end of the buffer, kept equal to its length across
//!   rewrites.
//!
//! Offsets are byte offsets that always fall on a `char` boundary, and
//! `previous <= index <= end == buffer.len()` holds after every operation.
//!
//! One view is created per incoming message and is never shared; tokenizers
//! receive it by `&mut` and keep no state of their own.

use alloc::string::String;

use crate::error::ArgumentError;

/// Opening quote marks and the mark that closes each of them.
const QUOTES: [(char, char); 3] = [('"', '"'), ('“', '”'), ('«', '»')];

fn closing_quote(open: char) -> Option<char> {
    QUOTES
        .iter()
        .find_map(|&(o, c)| (o == open).then_some(c))
}

fn is_quote(c: char) -> bool {
    QUOTES.iter().any(|&(o, cl)| o == c || cl == c)
}

/// The buffer and cursor state of one message being tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringView {
    buffer: String,
    index: usize,
    previous: usize,
    end: usize,
}

impl StringView {
    /// Creates a view over `message` with the cursor at the start.
    pub fn new(message: impl Into<String>) -> Self {
        let buffer = message.into();
        let end = buffer.len();
        Self {
            buffer,
            index: 0,
            previous: 0,
            end,
        }
    }

    /// The current buffer, including any rewritten argument region.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The read cursor.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cursor position before the most recent advance.
    #[must_use]
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// The logical end of the buffer.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns `true` when the cursor has reached the end of the buffer.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.index >= self.end
    }

    /// The unread part of the buffer.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.buffer[self.index..]
    }

    /// The character under the cursor, if any.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The character right after the one under the cursor.
    ///
    /// Running past the end of the buffer yields `None` rather than a fault.
    #[must_use]
    pub fn lookahead(&self) -> Option<char> {
        let mut chars = self.remaining().chars();
        chars.next();
        chars.next()
    }

    /// Moves the cursor back to where it was before the last advance.
    pub fn undo(&mut self) {
        self.index = self.previous;
    }

    /// Skips whitespace under the cursor. Returns `true` if anything was
    /// skipped.
    pub fn skip_ws(&mut self) -> bool {
        let skipped = self
            .remaining()
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(self.end - self.index);
        if skipped > 0 {
            self.previous = self.index;
            self.index += skipped;
        }
        skipped > 0
    }

    /// Consumes and returns everything from the cursor to the end.
    pub fn read_rest(&mut self) -> &str {
        self.previous = self.index;
        self.index = self.end;
        &self.buffer[self.previous..]
    }

    /// Reads one argument word starting at the cursor.
    ///
    /// A word is either a run of non-whitespace characters, or a quoted
    /// string. Inside a quoted string a backslash escapes the quote marks of
    /// that string and the backslash itself; any other backslash is kept.
    /// The cursor is left after the word (and after its closing quote).
    ///
    /// Returns `Ok(None)` when the cursor is at the end of the buffer.
    ///
    /// # Errors
    ///
    /// - [`ArgumentError::ExpectedClosingQuote`] if the buffer ends inside a
    ///   quoted word,
    /// - [`ArgumentError::InvalidEndOfQuotedString`] if a closing quote is
    ///   followed by something other than whitespace,
    /// - [`ArgumentError::UnexpectedQuote`] if an unquoted word contains a
    ///   quote mark.
    pub fn get_quoted_word(&mut self) -> Result<Option<String>, ArgumentError> {
        let Some(first) = self.current() else {
            return Ok(None);
        };
        let start = self.index;
        let close = closing_quote(first);

        let mut chars = self.buffer[start..].char_indices().peekable();
        let mut word = String::new();
        if close.is_some() {
            chars.next();
        }

        let consumed = loop {
            let Some((at, c)) = chars.next() else {
                if let Some(close) = close {
                    return Err(ArgumentError::ExpectedClosingQuote(close));
                }
                break self.end - start;
            };
            match close {
                Some(close) => {
                    if c == '\\' {
                        match chars.peek() {
                            Some(&(_, next)) if next == close || next == first || next == '\\' => {
                                word.push(next);
                                chars.next();
                            }
                            _ => word.push(c),
                        }
                    } else if c == close {
                        match chars.peek() {
                            Some(&(_, next)) if !next.is_whitespace() => {
                                return Err(ArgumentError::InvalidEndOfQuotedString(next));
                            }
                            _ => break at + c.len_utf8(),
                        }
                    } else {
                        word.push(c);
                    }
                }
                None => {
                    if c.is_whitespace() {
                        break at;
                    }
                    if is_quote(c) {
                        return Err(ArgumentError::UnexpectedQuote(c));
                    }
                    word.push(c);
                }
            }
        };

        self.previous = start;
        self.index = start + consumed;
        Ok(Some(word))
    }

    /// Advances the cursor to `index`, remembering the old position.
    pub(crate) fn advance_to(&mut self, index: usize) {
        debug_assert!(index >= self.index && index <= self.end);
        self.previous = self.index;
        self.index = index;
    }

    /// Points the previous marker at `index` without moving the cursor.
    pub(crate) fn set_previous(&mut self, index: usize) {
        debug_assert!(index <= self.index);
        self.previous = index;
    }

    /// Replaces everything from the cursor onwards with `" " + tail` and
    /// recomputes the end. The cursor is left on the inserted space.
    pub(crate) fn splice_tail(&mut self, tail: &str) {
        self.buffer.truncate(self.index);
        self.buffer.reserve(tail.len() + 1);
        self.buffer.push(' ');
        self.buffer.push_str(tail);
        self.end = self.buffer.len();
    }
}
