//! Byte-level tokenizer.
//!
//! The tokenizer walks each chunk exactly once and hands every completed
//! token to a callback (the grammar parser). It never keeps unread input:
//! whatever a chunk leaves unfinished lives in the tokenizer state, the
//! literal matcher, the number text, the string accumulator or the `\u`
//! digit buffer.
//!
//! A number has no closing delimiter, so it ends on the first byte that
//! cannot continue it. That byte is not consumed: the loop converts the
//! number, switches to `Start`, and dispatches the same byte again.

mod escape;
mod literal;
mod number;
pub(crate) mod string_buffer;


use alloc::string::String;
use core::fmt;

use escape::UnicodeEscapeBuffer;
use literal::{ExpectedLiteral, Step};
use string_buffer::StringBuffer;

use crate::{error::DecodeError, token::Token};

/// Where the byte scanner currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerState {
    /// Between tokens.
    Start,
    /// Halted by an error; no further input is accepted.
    Stop,
    /// Partway through `true`, `false` or `null`.
    Literal,
    /// Accumulating number text.
    Number,
    /// Inside a string literal, after the opening quote.
    String,
    /// Directly after a backslash inside a string.
    StringEscape,
    /// Reading the four hex digits of a `\u` escape.
    StringUnicode,
}

impl TokenizerState {
    /// The state's diagnostic name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TokenizerState::Start => "START",
            TokenizerState::Stop => "STOP",
            TokenizerState::Literal => "LITERAL",
            TokenizerState::Number => "NUMBER",
            TokenizerState::String => "STRING",
            TokenizerState::StringEscape => "STRING_ESCAPE",
            TokenizerState::StringUnicode => "STRING_UNICODE",
        }
    }
}

impl fmt::Display for TokenizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub(crate) struct Tokenizer {
    state: TokenizerState,
    literal: ExpectedLiteral,
    number: String,
    string: StringBuffer,
    unicode: UnicodeEscapeBuffer,
    /// Bytes consumed by earlier `write` calls.
    offset: usize,
}

impl Tokenizer {
    pub(crate) fn new(string_buffer_capacity: usize) -> Self {
        Self {
            state: TokenizerState::Start,
            literal: ExpectedLiteral::default(),
            number: String::new(),
            string: StringBuffer::with_capacity(string_buffer_capacity),
            unicode: UnicodeEscapeBuffer::default(),
            offset: 0,
        }
    }

    pub(crate) fn state(&self) -> TokenizerState {
        self.state
    }

    pub(crate) fn halt(&mut self) {
        self.state = TokenizerState::Stop;
    }

    /// Tokenizes one chunk, passing every completed token to `emit`.
    ///
    /// Any error, including one returned by `emit`, halts the tokenizer.
    pub(crate) fn write<F>(&mut self, chunk: &[u8], emit: &mut F) -> Result<(), DecodeError>
    where
        F: FnMut(Token) -> Result<(), DecodeError>,
    {
        if self.state == TokenizerState::Stop {
            return Err(DecodeError::Halted);
        }

        let result = self.scan(chunk, emit);
        self.offset += chunk.len();
        if result.is_err() {
            self.halt();
        }
        result
    }

    /// Signals end of input.
    ///
    /// A number still in progress is completed as if a delimiter had
    /// arrived. Returns `Ok(false)` if the input stopped inside a token.
    pub(crate) fn end<F>(&mut self, emit: &mut F) -> Result<bool, DecodeError>
    where
        F: FnMut(Token) -> Result<(), DecodeError>,
    {
        match self.state {
            TokenizerState::Stop => Err(DecodeError::Halted),
            TokenizerState::Start => Ok(true),
            TokenizerState::Number => match number::number_token(core::mem::take(&mut self.number)) {
                Some(token) => {
                    self.state = TokenizerState::Start;
                    emit(token).inspect_err(|_| self.halt())?;
                    Ok(true)
                }
                None => Ok(false),
            },
            _ => Ok(false),
        }
    }

    fn scan<F>(&mut self, chunk: &[u8], emit: &mut F) -> Result<(), DecodeError>
    where
        F: FnMut(Token) -> Result<(), DecodeError>,
    {
        let mut i = 0;
        while let Some(&byte) = chunk.get(i) {
            match self.state {
                TokenizerState::Stop => return Err(DecodeError::Halted),

                TokenizerState::Start => {
                    match byte {
                        b'{' => emit(Token::LeftBrace)?,
                        b'}' => emit(Token::RightBrace)?,
                        b'[' => emit(Token::LeftBracket)?,
                        b']' => emit(Token::RightBracket)?,
                        b':' => emit(Token::Colon)?,
                        b',' => emit(Token::Comma)?,
                        b't' | b'f' | b'n' => {
                            self.literal = ExpectedLiteral::start(byte);
                            self.state = TokenizerState::Literal;
                        }
                        b'"' => {
                            self.string.begin();
                            self.state = TokenizerState::String;
                        }
                        b'-' | b'0'..=b'9' => {
                            self.number.clear();
                            self.number.push(char::from(byte));
                            self.state = TokenizerState::Number;
                        }
                        b' ' | b'\t' | b'\n' | b'\r' => {}
                        _ => return Err(self.unexpected(chunk, i)),
                    }
                    i += 1;
                }

                TokenizerState::Literal => match self.literal.step(byte) {
                    Step::NeedMore => i += 1,
                    Step::Done(token) => {
                        self.state = TokenizerState::Start;
                        i += 1;
                        emit(token)?;
                    }
                    Step::Reject => return Err(self.unexpected(chunk, i)),
                },

                TokenizerState::Number if number::is_number_byte(byte) => {
                    let run = chunk[i..]
                        .iter()
                        .take_while(|&&b| number::is_number_byte(b))
                        .count();
                    self.number
                        .extend(chunk[i..i + run].iter().copied().map(char::from));
                    i += run;
                }
                TokenizerState::Number => {
                    // `byte` stays unconsumed and is dispatched again in `Start`.
                    let Some(token) = number::number_token(core::mem::take(&mut self.number))
                    else {
                        return Err(self.unexpected(chunk, i));
                    };
                    self.state = TokenizerState::Start;
                    emit(token)?;
                }

                TokenizerState::String if self.string.in_sequence() => {
                    // Completes a character begun at the end of an earlier chunk.
                    let used = self
                        .string
                        .continue_sequence(&chunk[i..])
                        .map_err(|err| self.unexpected(chunk, i + err.at))?;
                    i += used;
                }
                TokenizerState::String => match byte {
                    b'"' => {
                        let value = self.string.finish();
                        self.state = TokenizerState::Start;
                        i += 1;
                        emit(Token::String(value))?;
                    }
                    b'\\' => {
                        self.state = TokenizerState::StringEscape;
                        i += 1;
                    }
                    0x80..=0xFF => {
                        let used = self
                            .string
                            .begin_sequence(&chunk[i..])
                            .map_err(|err| self.unexpected(chunk, i + err.at))?;
                        i += used;
                    }
                    0x20..=0x7F => {
                        let run = chunk[i..]
                            .iter()
                            .take_while(|&&b| matches!(b, 0x20..=0x7F) && b != b'"' && b != b'\\')
                            .count();
                        self.string.push_ascii(&chunk[i..i + run]);
                        i += run;
                    }
                    _ => return Err(self.unexpected(chunk, i)),
                },

                TokenizerState::StringEscape => {
                    let unescaped = match byte {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'/' => b'/',
                        b'b' => 0x08,
                        b'f' => 0x0C,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'u' => {
                            self.unicode.reset();
                            self.state = TokenizerState::StringUnicode;
                            i += 1;
                            continue;
                        }
                        _ => return Err(self.unexpected(chunk, i)),
                    };
                    self.string.push_byte(unescaped);
                    self.state = TokenizerState::String;
                    i += 1;
                }

                TokenizerState::StringUnicode => {
                    match self.unicode.feed(byte) {
                        Ok(None) => {}
                        Ok(Some(unit)) => {
                            self.string.push_code_unit(unit);
                            self.state = TokenizerState::String;
                        }
                        Err(_) => return Err(self.unexpected(chunk, i)),
                    }
                    i += 1;
                }
            }
        }
        Ok(())
    }

    fn unexpected(&self, chunk: &[u8], at: usize) -> DecodeError {
        DecodeError::Lexical {
            byte: chunk.get(at).copied().unwrap_or_default(),
            position: at,
            offset: self.offset + at,
            state: self.state,
        }
    }
}
