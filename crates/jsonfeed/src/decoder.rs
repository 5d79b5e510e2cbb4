use core::fmt;

use crate::{
    DecoderOptions, Frame, ValueSink,
    error::DecodeError,
    parser::{Parser, ParserState},
    token::Token,
    tokenizer::{Tokenizer, TokenizerState},
};

/// An incremental JSON decoder.
///
/// Input arrives through [`write`](Self::write) in chunks of any size; a chunk
/// may end inside a literal, a number, a string, an escape sequence or a
/// multi-byte UTF-8 character. Every value is passed to the sink the moment
/// its last byte has been read, without waiting for the rest of the document.
/// Any number of top-level values may follow one another.
///
/// ```
/// use jsonfeed::{Decoder, Value};
///
/// let mut decoder = Decoder::new(Vec::<Value>::new());
/// decoder.write(r#"{"greeting": "hel"#).unwrap();
/// decoder.write("lo\"}").unwrap();
/// let values = decoder.finish().unwrap();
///
/// assert_eq!(values[0], Value::from("hello"));
/// assert_eq!(values[1].to_string(), r#"{"greeting":"hello"}"#);
/// ```
pub struct Decoder<S> {
    tokenizer: Tokenizer,
    parser: Parser,
    sink: S,
}

impl<S: ValueSink> Decoder<S> {
    /// Creates a decoder with default options.
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, DecoderOptions::default())
    }

    /// Creates a decoder with the given options.
    pub fn with_options(sink: S, options: DecoderOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(options.string_buffer_capacity),
            parser: Parser::new(options.emission),
            sink,
        }
    }

    /// Decodes one chunk of input.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or grammar error in the chunk. The sink's
    /// [`on_error`](ValueSink::on_error) is called with it first, and the
    /// decoder halts: this and every later call fail, the latter with
    /// [`DecodeError::Halted`].
    pub fn write(&mut self, chunk: impl AsRef<[u8]>) -> Result<(), DecodeError> {
        let chunk = chunk.as_ref();
        if self.is_halted() {
            return Err(DecodeError::Halted);
        }
        log::trace!("write: {} bytes", chunk.len());

        let Self {
            tokenizer,
            parser,
            sink,
        } = &mut *self;
        let result = tokenizer.write(chunk, &mut |token: Token| {
            log::trace!("token {token} in state {}", parser.state());
            parser.on_token(token, &mut *sink)
        });
        result.inspect_err(|err| self.fail(err))
    }

    /// Signals the end of input and returns the sink.
    ///
    /// A number at the very end of the stream has no delimiter after it; it is
    /// completed and emitted here.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] if the input stopped inside a token or
    /// inside an open container, [`DecodeError::Halted`] if the decoder had
    /// already failed, or the error raised by the trailing number.
    pub fn finish(mut self) -> Result<S, DecodeError> {
        if self.is_halted() {
            return Err(DecodeError::Halted);
        }

        let Self {
            tokenizer,
            parser,
            sink,
        } = &mut self;
        let ended = tokenizer.end(&mut |token: Token| parser.on_token(token, &mut *sink));
        let complete = match ended {
            Ok(complete) => complete,
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };

        if !complete || !self.parser.is_idle() {
            let err = DecodeError::UnexpectedEnd {
                tokenizer: self.tokenizer.state(),
                parser: self.parser.state(),
            };
            self.tokenizer.halt();
            self.fail(&err);
            return Err(err);
        }
        Ok(self.sink)
    }

    fn fail(&mut self, err: &DecodeError) {
        log::debug!("decoder halted: {err}");
        self.sink.on_error(err);
    }
}

impl<S> Decoder<S> {
    /// The containers currently open, outermost first.
    #[must_use]
    pub fn stack(&self) -> &[Frame] {
        self.parser.frames()
    }

    /// Where the byte scanner is; `Stop` after an error.
    #[must_use]
    pub fn tokenizer_state(&self) -> TokenizerState {
        self.tokenizer.state()
    }

    /// What the grammar expects next.
    #[must_use]
    pub fn parser_state(&self) -> ParserState {
        self.parser.state()
    }

    /// `true` once an error has been returned.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.tokenizer.state() == TokenizerState::Stop
    }

    /// The sink, with whatever it has gathered so far.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink, e.g. to drain collected values.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the decoder without checking for incomplete input.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S> fmt::Debug for Decoder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("tokenizer", &self.tokenizer)
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}
