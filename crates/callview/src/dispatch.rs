//! Turning a chat message into a command invocation.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use tracing::{debug, trace};

use crate::{
    error::DispatchError,
    options::BotConfig,
    tokenizer::{CallSyntaxTokenizer, Tokenizer},
    view::StringView,
};

/// Command names and aliases, mapped to the canonical command name.
///
/// Lookups are case-insensitive. A token written as an empty call
/// (`info()`) falls back to the plain name when no alias spells it out.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    names: BTreeMap<String, String>,
}

impl CommandTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` together with its aliases. Later registrations
    /// replace earlier ones for the same spelling.
    pub fn register<I, S>(&mut self, name: &str, aliases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical = name.to_lowercase();
        for alias in aliases {
            self.names
                .insert(alias.as_ref().to_lowercase(), canonical.clone());
        }
        self.names.insert(canonical.clone(), canonical);
        self
    }

    /// Resolves a command token to its canonical name.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let token = token.to_lowercase();
        self.names
            .get(&token)
            .or_else(|| {
                token
                    .strip_suffix("()")
                    .and_then(|bare| self.names.get(bare))
            })
            .map(String::as_str)
    }

    /// Number of registered spellings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A recognized command invocation.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The prefix as configured (not as typed).
    pub prefix: String,
    /// The command token as returned by the tokenizer.
    pub invoked_with: String,
    /// The canonical command name.
    pub command: String,
    /// Argument words, in order.
    pub args: Vec<String>,
}

/// Matches messages against prefixes and commands using a [`Tokenizer`].
#[derive(Debug, Clone)]
pub struct Dispatcher<T = CallSyntaxTokenizer> {
    tokenizer: T,
    prefixes: Vec<String>,
    commands: CommandTable,
}

impl Dispatcher<CallSyntaxTokenizer> {
    /// Builds a dispatcher from bot configuration.
    #[must_use]
    pub fn from_config(config: &BotConfig, commands: CommandTable) -> Self {
        Self::new(
            CallSyntaxTokenizer::new(config.tokenizer),
            config.prefixes.iter().cloned(),
            commands,
        )
    }
}

impl<T: Tokenizer> Dispatcher<T> {
    /// Creates a dispatcher. Prefixes are tried in the given order.
    pub fn new<I, S>(tokenizer: T, prefixes: I, commands: CommandTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokenizer,
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            commands,
        }
    }

    /// The tokenizer in use.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// The registered commands.
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Parses `message` into an [`Invocation`].
    ///
    /// Returns `Ok(None)` when no prefix matches or the command is unknown.
    ///
    /// # Errors
    ///
    /// A malformed call (`bot.tags.set("key"`) or a malformed argument word.
    /// Either way the message must not run any command.
    pub fn dispatch(&self, message: &str) -> Result<Option<Invocation>, DispatchError> {
        let mut view = StringView::new(message);

        let Some(prefix) = self
            .prefixes
            .iter()
            .find(|prefix| self.tokenizer.match_prefix(&mut view, prefix))
        else {
            trace!("no prefix matched");
            return Ok(None);
        };

        let token = self.tokenizer.extract_token(&mut view)?;
        let Some(command) = self.commands.resolve(&token) else {
            debug!("no command found matching '{token}'");
            return Ok(None);
        };

        let mut args = Vec::new();
        loop {
            view.skip_ws();
            match view.get_quoted_word()? {
                Some(word) => args.push(word),
                None => break,
            }
        }

        debug!(command, args = args.len(), "dispatching command");
        Ok(Some(Invocation {
            prefix: prefix.clone(),
            invoked_with: token,
            command: command.to_string(),
            args,
        }))
    }
}
