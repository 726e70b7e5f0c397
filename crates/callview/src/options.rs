use alloc::{string::String, vec::Vec};

/// Configuration options for the command tokenizer.
///
/// These options control how the prefix is compared and whether the
/// parenthesized call syntax (`bot.tags.set("key", "value")`) is recognized.
///
/// # Examples
///
/// ```rust
/// use callview::{CallSyntaxTokenizer, TokenizerOptions};
///
/// let tokenizer = CallSyntaxTokenizer::new(TokenizerOptions {
///     preserve_command_case: true,
///     ..Default::default()
/// });
/// ```
///
/// # Default
///
/// All options default to `false`.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TokenizerOptions {
    /// Whether the prefix must match the message exactly.
    ///
    /// By default `BOT.` matches the prefix `bot.`.
    ///
    /// # Default
    ///
    /// `false`
    pub case_sensitive_prefix: bool,

    /// Whether to treat `(` as an ordinary character of the command name.
    ///
    /// When `true`, `cmd("a")` yields the token `cmd("a")` and the buffer is
    /// never rewritten.
    ///
    /// # Default
    ///
    /// `false`
    pub disable_call_syntax: bool,

    /// Whether to return the command token with its original casing.
    ///
    /// # Default
    ///
    /// `false`
    pub preserve_command_case: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    /// Panic on malformed call syntax instead of returning the error.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces.
    pub panic_on_error: bool,
}

/// Bot-level configuration for the [`Dispatcher`](crate::Dispatcher).
///
/// The host application usually deserializes this from its configuration
/// file (with the `serde` feature enabled):
///
/// ```yaml
/// prefixes: ["bot.", "!"]
/// tokenizer:
///   preserve_command_case: false
/// ```
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotConfig {
    /// Command prefixes, tried in order.
    pub prefixes: Vec<String>,

    /// Options forwarded to the [`CallSyntaxTokenizer`](crate::CallSyntaxTokenizer).
    #[cfg_attr(any(test, feature = "serde"), serde(default))]
    pub tokenizer: TokenizerOptions,
}
