//! Grammar layer.
//!
//! The parser receives tokens one at a time and keeps every container that is
//! still open on an explicit stack of [`Frame`]s, innermost last. A completed
//! value is moved into its parent (or, at top level, handed out and dropped)
//! and reported to the [`ValueSink`] together with that stack.


use alloc::{vec, vec::Vec};
use core::fmt;

use crate::{
    Key, Map, Value, error::DecodeError, options::Emission, sink::ValueSink, token::Token,
};

/// What the grammar expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// A value, or the closer of an empty array.
    Value,
    /// An object member name, or the closer of an empty object.
    Key,
    /// The `:` after a member name.
    Colon,
    /// A `,` or the closer of the open container.
    Comma,
}

impl ParserState {
    /// The state's diagnostic name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ParserState::Value => "VALUE",
            ParserState::Key => "KEY",
            ParserState::Colon => "COLON",
            ParserState::Comma => "COMMA",
        }
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of an open container.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Inside `{ ... }`.
    Object,
    /// Inside `[ ... ]`.
    Array,
}

/// A container that has been opened but not yet closed.
///
/// `value` holds the members or elements completed so far. `key` is the slot
/// the next completed child goes into: the most recent member name for
/// objects (`None` until the first one is read), the current index for
/// arrays.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The container built so far.
    pub value: Value,
    /// Slot for the next child.
    pub key: Option<Key>,
    /// Object or array.
    pub mode: Mode,
}

impl Frame {
    fn open(mode: Mode) -> Self {
        match mode {
            Mode::Object => Self {
                value: Value::Object(Map::new()),
                key: None,
                mode,
            },
            Mode::Array => Self {
                value: Value::Array(vec![]),
                key: Some(Key::Index(0)),
                mode,
            },
        }
    }

    fn is_empty(&self) -> bool {
        match &self.value {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => true,
        }
    }

    fn store(&mut self, child: Value) {
        match (&mut self.value, &self.key) {
            (Value::Array(items), _) => items.push(child),
            (Value::Object(map), Some(Key::Name(name))) => {
                map.insert(name.clone(), child);
            }
            _ => {}
        }
    }

    /// The child stored under the current key.
    fn current(&self) -> Option<&Value> {
        match (&self.value, &self.key) {
            (Value::Array(items), Some(Key::Index(i))) => items.get(*i),
            (Value::Object(map), Some(Key::Name(name))) => map.get(name),
            _ => None,
        }
    }

    fn advance(&mut self) {
        if let Some(Key::Index(i)) = &mut self.key {
            *i += 1;
        }
    }
}

#[derive(Debug)]
pub(crate) struct Parser {
    state: ParserState,
    frames: Vec<Frame>,
    emission: Emission,
}

impl Parser {
    pub(crate) fn new(emission: Emission) -> Self {
        Self {
            state: ParserState::Value,
            frames: Vec::new(),
            emission,
        }
    }

    pub(crate) fn state(&self) -> ParserState {
        self.state
    }

    pub(crate) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// `true` between top-level values.
    pub(crate) fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.state == ParserState::Value
    }

    pub(crate) fn on_token<S: ValueSink>(
        &mut self,
        token: Token,
        sink: &mut S,
    ) -> Result<(), DecodeError> {
        let mode = self.frames.last().map(|frame| frame.mode);
        match (self.state, token) {
            (ParserState::Value, Token::LeftBrace) => self.open(Mode::Object),
            (ParserState::Value, Token::LeftBracket) => self.open(Mode::Array),
            (ParserState::Value, Token::RightBracket) if self.is_empty(Mode::Array) => {
                self.close(sink);
            }
            (ParserState::Value, token) => match token.into_scalar() {
                Ok(value) => self.emit(value, sink),
                Err(token) => return Err(self.unexpected(token)),
            },

            (ParserState::Key, Token::String(name)) => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.key = Some(Key::Name(name));
                }
                self.state = ParserState::Colon;
            }
            (ParserState::Key, Token::RightBrace) if self.is_empty(Mode::Object) => {
                self.close(sink);
            }

            (ParserState::Colon, Token::Colon) => self.state = ParserState::Value,

            (ParserState::Comma, Token::Comma) => match self.frames.last_mut() {
                Some(frame) if frame.mode == Mode::Array => {
                    frame.advance();
                    self.state = ParserState::Value;
                }
                Some(_) => self.state = ParserState::Key,
                None => return Err(self.unexpected(Token::Comma)),
            },
            (ParserState::Comma, Token::RightBracket) if mode == Some(Mode::Array) => {
                self.close(sink);
            }
            (ParserState::Comma, Token::RightBrace) if mode == Some(Mode::Object) => {
                self.close(sink);
            }

            (_, token) => return Err(self.unexpected(token)),
        }
        Ok(())
    }

    /// Whether the innermost container has kind `mode` and no children yet.
    fn is_empty(&self, mode: Mode) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.mode == mode && frame.is_empty())
    }

    fn open(&mut self, mode: Mode) {
        self.frames.push(Frame::open(mode));
        self.state = match mode {
            Mode::Object => ParserState::Key,
            Mode::Array => ParserState::Value,
        };
    }

    fn close<S: ValueSink>(&mut self, sink: &mut S) {
        if let Some(frame) = self.frames.pop() {
            self.emit(frame.value, sink);
        }
    }

    fn emit<S: ValueSink>(&mut self, value: Value, sink: &mut S) {
        let Some(parent) = self.frames.last_mut() else {
            self.state = ParserState::Value;
            sink.on_value(&value, &[]);
            return;
        };

        parent.store(value);
        self.state = ParserState::Comma;
        if self.emission == Emission::Roots {
            return;
        }
        if let Some(stored) = self.frames.last().and_then(Frame::current) {
            sink.on_value(stored, &self.frames);
        }
    }

    fn unexpected(&self, token: Token) -> DecodeError {
        DecodeError::Grammar {
            token,
            state: self.state,
        }
    }
}
