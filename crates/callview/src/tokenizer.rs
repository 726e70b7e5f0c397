//! Prefix matching and command-name extraction.
//!
//! The dispatcher drives a [`Tokenizer`] in two steps on a fresh
//! [`StringView`]: [`match_prefix`](Tokenizer::match_prefix) for each
//! configured prefix, then [`extract_token`](Tokenizer::extract_token) once a
//! prefix matched. After that the view's cursor sits right behind the command
//! name, and the argument words can be read with
//! [`StringView::get_quoted_word`].
//!
//! [`CallSyntaxTokenizer`] additionally understands
//! `bot.tags.set("key", "a value")`: the parenthesized argument list is
//! decoded as a [`Literal`](crate::Literal) and the buffer tail is rewritten
//! to `"key" "a value"` before argument reading starts.

use alloc::string::{String, ToString};

use tracing::{debug, trace};

use crate::{
    encode::encode_arguments,
    error::{LiteralError, TokenizeError},
    literal::decode_arguments,
    options::TokenizerOptions,
    view::StringView,
};

/// The two operations the dispatcher needs from a command tokenizer.
pub trait Tokenizer {
    /// Tests whether the unread buffer starts with `prefix`.
    ///
    /// On a match the cursor moves past the prefix and the previous marker
    /// holds the old cursor. On a mismatch the view is unchanged. A buffer
    /// shorter than the prefix simply does not match.
    fn match_prefix(&self, view: &mut StringView, prefix: &str) -> bool;

    /// Extracts the command name at the cursor.
    ///
    /// # Errors
    ///
    /// Implementations that rewrite the buffer fail with
    /// [`TokenizeError::MalformedCallSyntax`] when the rewrite is impossible;
    /// the view is then left as it was before the rewrite.
    fn extract_token(&self, view: &mut StringView) -> Result<String, TokenizeError>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn match_prefix(&self, view: &mut StringView, prefix: &str) -> bool {
        (**self).match_prefix(view, prefix)
    }

    fn extract_token(&self, view: &mut StringView) -> Result<String, TokenizeError> {
        (**self).extract_token(view)
    }
}

/// Compares `prefix` against the start of the unread buffer and returns the
/// number of buffer bytes it covers.
fn prefix_len(view: &StringView, prefix: &str, case_sensitive: bool) -> Option<usize> {
    let mut haystack = view.remaining().chars();
    let mut consumed = 0;
    for p in prefix.chars() {
        let c = haystack.next()?;
        let same = c == p || (!case_sensitive && c.to_lowercase().eq(p.to_lowercase()));
        if !same {
            return None;
        }
        consumed += c.len_utf8();
    }
    Some(consumed)
}

/// The tokenizer with case-insensitive prefixes and call-syntax rewriting.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSyntaxTokenizer {
    options: TokenizerOptions,
}

impl CallSyntaxTokenizer {
    /// Creates a tokenizer with the given options.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self { options }
    }

    /// The options this tokenizer was built with.
    #[must_use]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    fn finish_token(&self, token: String) -> String {
        if self.options.preserve_command_case {
            token
        } else {
            token.to_lowercase()
        }
    }

    /// Decodes the literal under the cursor and splices the re-encoded
    /// arguments into the buffer. Nothing is modified on failure.
    fn rewrite_call(&self, view: &mut StringView) -> Result<(), TokenizeError> {
        let position = view.index();
        debug!(
            buffer = view.buffer(),
            "a call-style command was used, attempting to parse its arguments"
        );

        trace!("decoding the argument list as a literal");
        let args = decode_arguments(view.remaining())
            .map_err(|source| self.fail(position, source))?;

        let tail = encode_arguments(&args);
        view.splice_tail(&tail);
        trace!(buffer = view.buffer(), "modified the buffer");
        Ok(())
    }

    #[cfg(any(test, feature = "fuzzing"))]
    fn fail(&self, position: usize, source: LiteralError) -> TokenizeError {
        let err = TokenizeError::MalformedCallSyntax { position, source };
        if self.options.panic_on_error {
            panic!("{err}");
        }
        err
    }

    #[cfg(not(any(test, feature = "fuzzing")))]
    #[allow(clippy::unused_self)]
    fn fail(&self, position: usize, source: LiteralError) -> TokenizeError {
        TokenizeError::MalformedCallSyntax { position, source }
    }
}

impl Tokenizer for CallSyntaxTokenizer {
    fn match_prefix(&self, view: &mut StringView, prefix: &str) -> bool {
        match prefix_len(view, prefix, self.options.case_sensitive_prefix) {
            Some(len) => {
                view.advance_to(view.index() + len);
                true
            }
            None => false,
        }
    }

    fn extract_token(&self, view: &mut StringView) -> Result<String, TokenizeError> {
        let call_syntax = !self.options.disable_call_syntax;
        let start = view.index();
        let len = view
            .remaining()
            .find(|c: char| c.is_whitespace() || (call_syntax && c == '('))
            .unwrap_or(view.end() - start);

        view.advance_to(start + len);
        let mut token = view.buffer()[start..start + len].to_string();

        if call_syntax && view.current() == Some('(') {
            match view.lookahead() {
                Some(')') => {
                    debug!("command called without providing arguments");
                    let after = view.index() + 2;
                    token = view.buffer()[start..after].to_string();
                    view.advance_to(after);
                    view.set_previous(start);
                }
                Some(_) => self.rewrite_call(view)?,
                // A lone `(` at the end of the buffer is part of no call.
                None => {}
            }
        }

        Ok(self.finish_token(token))
    }
}

/// The conventional tokenizer: the prefix must match exactly and the command
/// name runs up to the next whitespace. Parentheses have no meaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn match_prefix(&self, view: &mut StringView, prefix: &str) -> bool {
        match prefix_len(view, prefix, true) {
            Some(len) => {
                view.advance_to(view.index() + len);
                true
            }
            None => false,
        }
    }

    fn extract_token(&self, view: &mut StringView) -> Result<String, TokenizeError> {
        let start = view.index();
        let len = view
            .remaining()
            .find(char::is_whitespace)
            .unwrap_or(view.end() - start);
        view.advance_to(start + len);
        Ok(view.buffer()[start..start + len].to_string())
    }
}
