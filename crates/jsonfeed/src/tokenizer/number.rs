use alloc::string::String;
use core::fmt::Write;

use crate::token::Token;

/// Bytes that keep a number token going. Anything else terminates it.
pub(crate) fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
}

/// Checks `text` against `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
fn is_json_number(text: &[u8]) -> bool {
    fn digits(text: &[u8], i: &mut usize) -> usize {
        let start = *i;
        while text.get(*i).is_some_and(u8::is_ascii_digit) {
            *i += 1;
        }
        *i - start
    }

    let mut i = 0;
    if text.first() == Some(&b'-') {
        i += 1;
    }

    match text.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(text, &mut i);
        }
        _ => return false,
    }

    if text.get(i) == Some(&b'.') {
        i += 1;
        if digits(text, &mut i) == 0 {
            return false;
        }
    }

    if matches!(text.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(text.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(text, &mut i) == 0 {
            return false;
        }
    }

    i == text.len()
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Converts accumulated number text into a token.
///
/// Returns `None` for text outside the JSON number grammar. Integer literals
/// whose `f64` rendering differs from their text (they lost precision) are
/// returned as [`Token::Integer`] with the original digits.
pub(crate) fn number_token(text: String) -> Option<Token> {
    if !is_json_number(text.as_bytes()) {
        return None;
    }
    let value: f64 = text.parse().ok()?;

    if is_integer_literal(&text) {
        let mut rendered = String::with_capacity(text.len());
        // Writing to a `String` cannot fail.
        let _ = write!(rendered, "{value}");
        if rendered != text {
            return Some(Token::Integer(text));
        }
    }

    Some(Token::Number(value))
}
