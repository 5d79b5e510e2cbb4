mod parse_bad;

use alloc::vec::Vec;

use crate::{Decoder, DecodeError, Value};

/// Decodes `chunks` in order and returns every emitted value.
pub(crate) fn decode_chunks<C: AsRef<[u8]>>(chunks: &[C]) -> Result<Vec<Value>, DecodeError> {
    let mut decoder = Decoder::new(Vec::<Value>::new());
    for chunk in chunks {
        decoder.write(chunk)?;
    }
    decoder.finish()
}

pub(crate) fn decode(src: &str) -> Result<Vec<Value>, DecodeError> {
    decode_chunks(&[src])
}

/// Number of cases for the property tests.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}
