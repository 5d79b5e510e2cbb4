use alloc::{collections::VecDeque, vec::Vec};

use crate::{
    Decoder, DecoderOptions, Emission, Frame, Map, Value, ValueSink, error::DecodeError,
};

#[derive(Debug, Default)]
struct ObjectQueue {
    ready: VecDeque<Map>,
}

impl ValueSink for ObjectQueue {
    fn on_value(&mut self, value: &Value, _stack: &[Frame]) {
        if let Value::Object(map) = value {
            self.ready.push_back(map.clone());
        }
    }
}

/// Turns a byte stream into the JSON objects it contains.
///
/// Every object is yielded as soon as its closing brace has been written,
/// nested objects before the objects that contain them. Arrays and scalars
/// are skipped, although objects inside arrays are not.
///
/// ```
/// use jsonfeed::{ObjectStream, Value};
///
/// let mut stream = ObjectStream::new();
/// stream.write(r#"[{"id": 1}, {"id""#).unwrap();
/// let first: Vec<_> = stream.by_ref().collect();
/// assert_eq!(first.len(), 1);
///
/// stream.write(": 2}]").unwrap();
/// let rest = stream.finish().unwrap();
/// assert_eq!(rest[0].get("id"), Some(&Value::Number(2.0)));
/// ```
#[derive(Debug)]
pub struct ObjectStream {
    decoder: Decoder<ObjectQueue>,
}

impl ObjectStream {
    /// Yields objects at every nesting level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DecoderOptions::default())
    }

    /// Yields top-level objects only.
    #[must_use]
    pub fn roots() -> Self {
        Self::with_options(DecoderOptions {
            emission: Emission::Roots,
            ..DecoderOptions::default()
        })
    }

    /// Uses `options` as given, including its [`Emission`].
    #[must_use]
    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            decoder: Decoder::with_options(ObjectQueue::default(), options),
        }
    }

    /// Decodes a chunk; completed objects become available through the
    /// iterator.
    ///
    /// # Errors
    ///
    /// See [`Decoder::write`].
    pub fn write(&mut self, chunk: impl AsRef<[u8]>) -> Result<(), DecodeError> {
        self.decoder.write(chunk)
    }

    /// Ends the stream and returns the objects not yet taken.
    ///
    /// # Errors
    ///
    /// See [`Decoder::finish`].
    pub fn finish(self) -> Result<Vec<Map>, DecodeError> {
        Ok(self.decoder.finish()?.ready.into())
    }
}

impl Default for ObjectStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ObjectStream {
    type Item = Map;

    fn next(&mut self) -> Option<Map> {
        self.decoder.sink_mut().ready.pop_front()
    }
}
