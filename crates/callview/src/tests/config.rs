use alloc::vec;

use crate::{BotConfig, CommandTable, Dispatcher, Literal, TokenizerOptions};

const CONFIG: &str = r#"
prefixes:
  - "bot."
  - "!"
tokenizer:
  preserve_command_case: true
"#;

#[test]
fn bot_config_from_yaml() {
    let config: BotConfig = serde_yaml::from_str(CONFIG).unwrap();
    assert_eq!(config.prefixes, ["bot.", "!"]);
    assert_eq!(
        config.tokenizer,
        TokenizerOptions {
            preserve_command_case: true,
            ..Default::default()
        }
    );
}

#[test]
fn tokenizer_section_is_optional() {
    let config: BotConfig = serde_yaml::from_str("prefixes: [\"bot.\"]").unwrap();
    assert_eq!(config.tokenizer, TokenizerOptions::default());
}

#[test]
fn unknown_option_values_are_rejected() {
    let parsed =
        serde_yaml::from_str::<BotConfig>("prefixes: []\ntokenizer:\n  disable_call_syntax: maybe\n");
    assert!(parsed.is_err());
}

#[test]
fn configured_dispatcher() {
    let config: BotConfig = serde_yaml::from_str(CONFIG).unwrap();
    let mut commands = CommandTable::new();
    commands.register("Tags.Set", ["tags.add"]);
    let dispatcher = Dispatcher::from_config(&config, commands);

    let invocation = dispatcher
        .dispatch(r#"!Tags.Set("k", 1)"#)
        .unwrap()
        .unwrap();
    assert_eq!(invocation.invoked_with, "Tags.Set");
    assert_eq!(invocation.command, "tags.set");

    let json = serde_json::to_string(&invocation).unwrap();
    assert_eq!(
        json,
        r#"{"prefix":"!","invoked_with":"Tags.Set","command":"tags.set","args":["k","1"]}"#
    );
}

#[test]
fn literal_serializes_for_logging() {
    let value = Literal::Tuple(vec![Literal::from("a"), Literal::Integer(2)]);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"Tuple":[{"String":"a"},{"Integer":2}]}"#);
    let back: Literal = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}
