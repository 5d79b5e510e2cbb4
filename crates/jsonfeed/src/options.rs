use crate::tokenizer::string_buffer::DEFAULT_STRING_BUFFER_CAPACITY;

/// Which completed values reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emission {
    /// Every value at every nesting level, innermost first.
    #[default]
    All,
    /// Only top-level values.
    Roots,
}

/// Configuration options for the [`Decoder`](crate::Decoder).
///
/// # Default
///
/// Every value is emitted and strings are accumulated in a 64 KiB buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Which completed values are passed to the sink.
    ///
    /// With [`Emission::All`] a document such as `{"a":[1]}` produces three
    /// emissions (`1`, `[1]`, then the object). With [`Emission::Roots`] only
    /// the object is emitted.
    ///
    /// # Default
    ///
    /// [`Emission::All`]
    pub emission: Emission,

    /// Size in bytes of the fixed buffer strings are decoded through.
    ///
    /// Longer strings are still decoded; the buffer is flushed into an
    /// overflow `String` each time it fills. Values below 4 are raised to 4
    /// so that any UTF-8 sequence fits.
    ///
    /// # Default
    ///
    /// `64 * 1024`
    pub string_buffer_capacity: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            emission: Emission::default(),
            string_buffer_capacity: DEFAULT_STRING_BUFFER_CAPACITY,
        }
    }
}
