//! Command tokenizer for chat bots.
//!
//! `callview` decides whether a chat message invokes a bot command and splits
//! it into a command name and argument words. On top of the usual
//! `bot.tags set key value` form it accepts a code-like call syntax:
//!
//! ```rust
//! use callview::{CommandTable, Dispatcher, BotConfig};
//!
//! let mut commands = CommandTable::new();
//! commands.register("tags.set", ["tags.add"]);
//!
//! let config = BotConfig {
//!     prefixes: vec!["bot.".into()],
//!     ..Default::default()
//! };
//! let dispatcher = Dispatcher::from_config(&config, commands);
//!
//! let invocation = dispatcher
//!     .dispatch(r#"BOT.TAGS.SET("key", "a value")"#)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(invocation.command, "tags.set");
//! assert_eq!(invocation.args, ["key", "a value"]);
//! ```
//!
//! The pieces can also be driven by hand through a [`StringView`] and a
//! [`Tokenizer`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod dispatch;
mod encode;
mod error;
mod literal;
mod options;
mod tokenizer;
mod view;

#[cfg(test)]
mod tests;

pub use dispatch::{CommandTable, Dispatcher, Invocation};
pub use encode::encode_arguments;
pub use error::{ArgumentError, DispatchError, LiteralError, SyntaxError, TokenizeError};
pub use literal::{Literal, MAX_DEPTH, decode, decode_arguments};
pub use options::{BotConfig, TokenizerOptions};
pub use tokenizer::{CallSyntaxTokenizer, PlainTokenizer, Tokenizer};
pub use view::StringView;
