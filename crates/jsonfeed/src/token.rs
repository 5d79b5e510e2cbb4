use alloc::string::String;
use core::fmt;

use crate::Value;

/// A lexical unit handed from the tokenizer to the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// A string literal with its escapes decoded.
    String(String),
    /// A number literal.
    Number(f64),
    /// An integer literal that an `f64` would not reproduce, kept as text.
    ///
    /// It decodes to [`Value::String`] but, being a number, cannot name an
    /// object member.
    Integer(String),
}

impl Token {
    /// Converts a scalar token into the value it denotes.
    ///
    /// Punctuation is returned unchanged as `Err`.
    pub(crate) fn into_scalar(self) -> Result<Value, Token> {
        match self {
            Token::True => Ok(Value::Boolean(true)),
            Token::False => Ok(Value::Boolean(false)),
            Token::Null => Ok(Value::Null),
            Token::String(s) | Token::Integer(s) => Ok(Value::String(s)),
            Token::Number(n) => Ok(Value::Number(n)),
            other => Err(other),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Token::LeftBrace => "LEFT_BRACE",
            Token::RightBrace => "RIGHT_BRACE",
            Token::LeftBracket => "LEFT_BRACKET",
            Token::RightBracket => "RIGHT_BRACKET",
            Token::Colon => "COLON",
            Token::Comma => "COMMA",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::Null => "NULL",
            Token::String(_) => "STRING",
            Token::Number(_) | Token::Integer(_) => "NUMBER",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "{}({s:?})", self.name()),
            Token::Number(n) => write!(f, "{}({n})", self.name()),
            Token::Integer(digits) => write!(f, "{}({digits})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
