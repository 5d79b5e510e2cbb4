//! An incremental JSON decoder.
//!
//! Bytes go in through [`Decoder::write`] in chunks of any size and completed
//! values come out through a [`ValueSink`] as soon as their last byte has been
//! read. A chunk boundary may fall anywhere, including inside a string, an
//! escape sequence or a multi-byte UTF-8 character.
//!
//! Decoding runs in two layers: a byte tokenizer that recognizes literals,
//! numbers, strings and punctuation, and a grammar parser that keeps the open
//! containers on an explicit stack. Each emitted value comes with that stack,
//! so a sink can tell where in the document the value sits (see [`path_of`]).

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod error;
mod key;
mod objects;
mod options;
mod parser;
mod sink;
mod token;
mod tokenizer;
mod value;

#[cfg(test)]
mod tests;

pub use decoder::Decoder;
pub use error::DecodeError;
pub use key::{Key, KeyFrom, path_of};
pub use objects::ObjectStream;
pub use options::{DecoderOptions, Emission};
pub use parser::{Frame, Mode, ParserState};
pub use sink::{Roots, ValueSink};
pub use token::Token;
pub use tokenizer::{TokenizerState, string_buffer::DEFAULT_STRING_BUFFER_CAPACITY};
pub use value::{Array, Map, Value};

#[doc(hidden)]
pub use alloc::vec;

/// Builds a `Vec<Key>` from a heterogeneous list of member names and indices.
///
/// ```rust
/// use jsonfeed::{Key, path};
///
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![Key::Index(0), Key::Name("foo".into()), Key::Index(2)]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::KeyFrom;
        $crate::vec![$($crate::Key::from_key($elem)),*]
    }};
}
