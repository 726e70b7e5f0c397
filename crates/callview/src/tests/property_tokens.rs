use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{Arbitrary, Gen, QuickCheck};

use crate::{CallSyntaxTokenizer, Literal, StringView, Tokenizer, encode_arguments};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// A command name: no whitespace and no parentheses.
#[derive(Debug, Clone)]
struct Word(String);

impl Arbitrary for Word {
    fn arbitrary(g: &mut Gen) -> Self {
        let word: String = String::arbitrary(g)
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(')
            .collect();
        Self(word)
    }
}

/// A call argument that round-trips through its textual form.
#[derive(Debug, Clone)]
struct Arg(Literal);

impl Arbitrary for Arg {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 3 {
            0 => Self(Literal::Integer(i64::arbitrary(g))),
            1 => Self(Literal::String(String::arbitrary(g))),
            _ => {
                let choices = ["a value", "", "it's", "say \"hi\"", "back\\slash", "🐍"];
                Self(Literal::from(*g.choose(&choices).unwrap_or(&"")))
            }
        }
    }
}

/// Source text for a literal string that decodes to `s`.
fn string_source(s: &str) -> String {
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

fn arg_source(arg: &Literal) -> String {
    match arg {
        Literal::String(s) => string_source(s),
        other => other.to_string(),
    }
}

#[test]
fn prefix_matching_ignores_case() {
    fn prop(prefix: Word, rest: String, upper: bool) -> bool {
        let typed = if upper {
            prefix.0.to_uppercase()
        } else {
            prefix.0.to_lowercase()
        };
        // Case mappings that change the number of chars are not a prefix match.
        if typed.chars().count() != prefix.0.chars().count() {
            return true;
        }
        let mut view = StringView::new(format!("{typed}{rest}"));
        let matched = CallSyntaxTokenizer::default().match_prefix(&mut view, &prefix.0);
        let expected = typed
            .chars()
            .zip(prefix.0.chars())
            .all(|(a, b)| a == b || a.to_lowercase().eq(b.to_lowercase()));
        matched == expected && (!matched || view.remaining() == rest)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Word, String, bool) -> bool);
}

#[test]
fn mismatched_prefix_leaves_cursor() {
    fn prop(prefix: String, message: String) -> bool {
        let mut view = StringView::new(message.clone());
        let matched = CallSyntaxTokenizer::default().match_prefix(&mut view, &prefix);
        matched || (view.index() == 0 && view.buffer() == message)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, String) -> bool);
}

#[test]
fn plain_token_advances_by_its_length() {
    fn prop(word: Word, rest: String) -> bool {
        let message = format!("{} {rest}", word.0);
        let mut view = StringView::new(message.clone());
        let Ok(token) = CallSyntaxTokenizer::default().extract_token(&mut view) else {
            return false;
        };
        token == word.0.to_lowercase() && view.index() == word.0.len() && view.buffer() == message
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Word, String) -> bool);
}

#[test]
fn call_arguments_reach_the_reader_intact() {
    fn prop(name: Word, args: Vec<Arg>) -> bool {
        // `name()` is an empty call, and `name(5)` is not an argument list.
        if args.is_empty() || (args.len() == 1 && !args[0].0.is_string()) {
            return true;
        }
        let sources: Vec<String> = args.iter().map(|a| arg_source(&a.0)).collect();
        let message = format!("{}({})", name.0, sources.join(", "));
        let mut view = StringView::new(message);
        if CallSyntaxTokenizer::default()
            .extract_token(&mut view)
            .is_err()
        {
            return false;
        }

        let literals: Vec<Literal> = args.iter().map(|a| a.0.clone()).collect();
        let expected_tail = format!(" {}", encode_arguments(&literals));
        if view.remaining() != expected_tail || view.end() != view.buffer().len() {
            return false;
        }

        let mut words = Vec::new();
        loop {
            view.skip_ws();
            match view.get_quoted_word() {
                Ok(Some(w)) => words.push(w),
                Ok(None) => break,
                Err(_) => return false,
            }
        }
        let expected: Vec<String> = literals
            .iter()
            .map(|l| match l {
                Literal::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        words == expected
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Word, Vec<Arg>) -> bool);
}

#[test]
fn extraction_never_faults() {
    fn prop(prefix: String, message: String) -> bool {
        let tokenizer = CallSyntaxTokenizer::default();
        let mut view = StringView::new(message);
        let _ = tokenizer.match_prefix(&mut view, &prefix);
        let _ = tokenizer.extract_token(&mut view);
        view.index() <= view.end() && view.end() == view.buffer().len()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, String) -> bool);
}
