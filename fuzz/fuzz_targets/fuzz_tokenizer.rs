#![no_main]

use arbitrary::Arbitrary;
use callview::{
    CallSyntaxTokenizer, Literal, StringView, Tokenizer, TokenizerOptions, encode_arguments,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Input {
    /// Free-form text, which must never fault the tokenizer.
    Raw {
        flags: u8,
        prefix: String,
        message: String,
    },
    /// A well-formed call whose arguments must reach the reader intact.
    Call { name: String, args: Vec<Arg> },
}

#[derive(Debug, Arbitrary)]
enum Arg {
    Int(i64),
    Str(String),
}

impl Arg {
    fn source(&self) -> String {
        match self {
            Arg::Int(n) => n.to_string(),
            Arg::Str(s) => {
                let mut out = String::from("\"");
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        c => out.push(c),
                    }
                }
                out.push('"');
                out
            }
        }
    }

    fn literal(&self) -> Literal {
        match self {
            Arg::Int(n) => Literal::Integer(*n),
            Arg::Str(s) => Literal::from(s.as_str()),
        }
    }
}

fn options(flags: u8) -> TokenizerOptions {
    TokenizerOptions {
        case_sensitive_prefix: flags & 1 != 0,
        disable_call_syntax: flags & 2 != 0,
        preserve_command_case: flags & 4 != 0,
        panic_on_error: false,
    }
}

fn words(view: &mut StringView) -> Option<Vec<String>> {
    let mut out = Vec::new();
    loop {
        view.skip_ws();
        match view.get_quoted_word() {
            Ok(Some(word)) => out.push(word),
            Ok(None) => return Some(out),
            Err(_) => return None,
        }
    }
}

fn raw(flags: u8, prefix: &str, message: String) {
    let tokenizer = CallSyntaxTokenizer::new(options(flags));
    let mut view = StringView::new(message.clone());
    if !tokenizer.match_prefix(&mut view, prefix) {
        assert_eq!(view.index(), 0);
        assert_eq!(view.buffer(), message);
        return;
    }
    if tokenizer.extract_token(&mut view).is_err() {
        // A rejected call leaves the message as it was.
        assert_eq!(view.buffer(), message);
    }
    assert!(view.index() <= view.end());
    assert_eq!(view.end(), view.buffer().len());
    let _ = words(&mut view);
}

fn call(name: &str, args: &[Arg]) {
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '(') {
        return;
    }
    // `name()` is an empty call and `name(5)` has no argument list.
    if args.is_empty() || matches!(args, [Arg::Int(_)]) {
        return;
    }

    let sources: Vec<String> = args.iter().map(Arg::source).collect();
    let message = format!("{name}({})", sources.join(", "));
    let mut view = StringView::new(message);
    let token = CallSyntaxTokenizer::default()
        .extract_token(&mut view)
        .expect("well-formed call was rejected");
    assert_eq!(token, name.to_lowercase());

    let literals: Vec<Literal> = args.iter().map(Arg::literal).collect();
    assert_eq!(view.remaining(), format!(" {}", encode_arguments(&literals)));

    let expected: Vec<String> = args
        .iter()
        .map(|a| match a {
            Arg::Int(n) => n.to_string(),
            Arg::Str(s) => s.clone(),
        })
        .collect();
    assert_eq!(words(&mut view), Some(expected));
}

fuzz_target!(|input: Input| match input {
    Input::Raw {
        flags,
        prefix,
        message,
    } => raw(flags, &prefix, message),
    Input::Call { name, args } => call(&name, &args),
});
