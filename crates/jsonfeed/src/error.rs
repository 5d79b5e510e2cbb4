use core::fmt;

use thiserror::Error;

use crate::{parser::ParserState, token::Token, tokenizer::TokenizerState};

/// A fatal decoding error.
///
/// Every variant halts the [`Decoder`](crate::Decoder) that produced it; the
/// instance must be discarded and a new one created to decode further input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A byte the tokenizer cannot accept in its current state.
    ///
    /// `position` is the index of the byte within the chunk passed to the
    /// failing `write` call, `offset` its index in the whole stream.
    #[error("unexpected {} at position {position} (offset {offset}) in state {state}", byte_repr(.byte))]
    Lexical {
        /// The rejected byte.
        byte: u8,
        /// Index within the chunk.
        position: usize,
        /// Index within the stream.
        offset: usize,
        /// Tokenizer state when the byte arrived.
        state: TokenizerState,
    },
    /// A token the grammar does not allow in the parser's current state.
    #[error("unexpected {token} in state {state}")]
    Grammar {
        /// The rejected token.
        token: Token,
        /// What the parser expected instead.
        state: ParserState,
    },
    /// The stream ended inside a token or an open container.
    #[error("unexpected end of input in tokenizer state {tokenizer}, parser state {parser}")]
    UnexpectedEnd {
        /// Tokenizer state at the end of input.
        tokenizer: TokenizerState,
        /// Parser state at the end of input.
        parser: ParserState,
    },
    /// The decoder already failed and accepts no more input.
    #[error("decoder halted by an earlier error")]
    Halted,
}

impl DecodeError {
    /// Returns `true` for [`DecodeError::Lexical`].
    #[must_use]
    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical { .. })
    }

    /// Returns `true` for [`DecodeError::Grammar`].
    #[must_use]
    pub fn is_grammar(&self) -> bool {
        matches!(self, Self::Grammar { .. })
    }
}

struct ByteRepr(u8);

fn byte_repr(byte: &u8) -> ByteRepr {
    ByteRepr(*byte)
}

impl fmt::Display for ByteRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "{:?}", char::from(self.0))
        } else {
            write!(f, "byte 0x{:02X}", self.0)
        }
    }
}
