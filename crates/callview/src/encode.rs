//! Re-encoding of decoded call arguments into the space-delimited form read
//! by [`StringView::get_quoted_word`](crate::StringView::get_quoted_word).

use alloc::string::{String, ToString};

use tracing::trace;

use crate::literal::Literal;

/// Joins `args` into a buffer tail of double-quoted words.
///
/// Non-string values are converted to their textual form first. A `"` or `\`
/// inside a value is escaped with a backslash so the quoted-word reader gives
/// back exactly the original text.
///
/// ```
/// use callview::{Literal, encode_arguments};
///
/// let tail = encode_arguments(&[Literal::from("a"), Literal::Integer(2), Literal::Float(3.5)]);
/// assert_eq!(tail, r#""a" "2" "3.5""#);
/// ```
#[must_use]
pub fn encode_arguments(args: &[Literal]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let text = match arg {
            Literal::String(s) => s.clone(),
            other => {
                trace!("{other:?} is not a string, casting to string");
                other.to_string()
            }
        };
        push_quoted(&text, &mut out);
    }
    trace!(args = args.len(), "wrapped all args in double quotes");
    out
}

fn push_quoted(text: &str, out: &mut String) {
    out.reserve(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn quotes_every_element() {
        let tail = encode_arguments(&[
            Literal::from("key"),
            Literal::from("a value"),
            Literal::Integer(-1),
            Literal::List(vec![Literal::Integer(1), Literal::from("x")]),
        ]);
        assert_eq!(tail, r#""key" "a value" "-1" "[1, 'x']""#);
    }

    #[test]
    fn empty_argument_list() {
        assert_eq!(encode_arguments(&[]), "");
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        let tail = encode_arguments(&[Literal::from(r#"say "hi" \o/"#)]);
        assert_eq!(tail, r#""say \"hi\" \\o/""#);
    }
}
