//! Accumulation of decoded string literal bytes.
//!
//! Bytes are collected in a fixed-capacity buffer. When an append would not
//! fit, the buffered bytes are decoded into a growable overflow `String` and
//! the buffer is reused from the start, so at any instant the logical value is
//! `overflow + decode(buf[..offset])`.
//!
//! Multi-byte UTF-8 sequences are only ever appended whole. A sequence that
//! straddles two `write` calls is parked in a four-byte temp buffer until its
//! continuation bytes arrive, which keeps every spill of the fixed buffer on a
//! character boundary.
//!
//! `\u` escapes arrive as UTF-16 code units. A high surrogate waits here for
//! its low half; if anything else shows up first, the lone half is emitted as
//! U+FFFD instead of being dropped.

use alloc::{boxed::Box, string::String, vec};

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Default capacity of the fixed string buffer.
pub const DEFAULT_STRING_BUFFER_CAPACITY: usize = 64 * 1024;

/// A multi-byte sequence never exceeds four bytes, so it always fits.
const MIN_CAPACITY: usize = 4;

/// An invalid UTF-8 byte, at index `at` of the slice that was fed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InvalidUtf8 {
    pub(crate) at: usize,
}

#[derive(Debug)]
pub(crate) struct StringBuffer {
    buf: Box<[u8]>,
    offset: usize,
    overflow: String,

    high_surrogate: Option<u16>,

    sequence: [u8; 4],
    bytes_in_sequence: usize,
    bytes_remaining: usize,
}

impl StringBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity.max(MIN_CAPACITY)].into_boxed_slice(),
            offset: 0,
            overflow: String::new(),
            high_surrogate: None,
            sequence: [0; 4],
            bytes_in_sequence: 0,
            bytes_remaining: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Clears all state for a new string literal.
    pub(crate) fn begin(&mut self) {
        self.offset = 0;
        self.overflow.clear();
        self.high_surrogate = None;
        self.bytes_in_sequence = 0;
        self.bytes_remaining = 0;
    }

    /// `true` while a multi-byte sequence waits for continuation bytes.
    pub(crate) fn in_sequence(&self) -> bool {
        self.bytes_remaining > 0
    }

    /// Appends a single ASCII byte.
    pub(crate) fn push_byte(&mut self, byte: u8) {
        self.flush_surrogate();
        self.write_slice(&[byte]);
    }

    /// Appends a run of printable ASCII bytes.
    pub(crate) fn push_ascii(&mut self, mut bytes: &[u8]) {
        self.flush_surrogate();
        while !bytes.is_empty() {
            if self.offset == self.buf.len() {
                self.spill();
            }
            let n = (self.buf.len() - self.offset).min(bytes.len());
            self.buf[self.offset..self.offset + n].copy_from_slice(&bytes[..n]);
            self.offset += n;
            bytes = &bytes[n..];
        }
    }

    /// Appends a UTF-16 code unit decoded from a `\u` escape.
    pub(crate) fn push_code_unit(&mut self, unit: u16) {
        match (self.high_surrogate.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let scalar =
                    0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                self.write_char(char::from_u32(scalar).unwrap_or(REPLACEMENT));
            }
            (pending, 0xD800..=0xDBFF) => {
                if pending.is_some() {
                    self.write_char(REPLACEMENT);
                }
                self.high_surrogate = Some(unit);
            }
            (pending, _) => {
                if pending.is_some() {
                    self.write_char(REPLACEMENT);
                }
                self.write_char(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT));
            }
        }
    }

    /// Starts a multi-byte sequence at `bytes[0]` and consumes as many of its
    /// continuation bytes as `bytes` holds. Returns the number of bytes used.
    pub(crate) fn begin_sequence(&mut self, bytes: &[u8]) -> Result<usize, InvalidUtf8> {
        let Some((&lead, rest)) = bytes.split_first() else {
            return Ok(0);
        };
        let len = match lead {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(InvalidUtf8 { at: 0 }),
        };

        self.flush_surrogate();
        self.sequence[0] = lead;
        self.bytes_in_sequence = len;
        self.bytes_remaining = len - 1;

        self.continue_sequence(rest)
            .map(|used| used + 1)
            .map_err(|err| InvalidUtf8 { at: err.at + 1 })
    }

    /// Feeds continuation bytes to the pending sequence. Returns the number of
    /// bytes used; the sequence is appended once it is complete.
    pub(crate) fn continue_sequence(&mut self, bytes: &[u8]) -> Result<usize, InvalidUtf8> {
        let take = self.bytes_remaining.min(bytes.len());
        for (at, &byte) in bytes[..take].iter().enumerate() {
            if byte & 0xC0 != 0x80 {
                self.abandon_sequence();
                return Err(InvalidUtf8 { at });
            }
            self.sequence[self.bytes_in_sequence - self.bytes_remaining] = byte;
            self.bytes_remaining -= 1;
        }

        if take > 0 && self.bytes_remaining == 0 {
            let sequence = self.sequence;
            let len = self.bytes_in_sequence;
            self.bytes_in_sequence = 0;
            // Rejects overlong forms, encoded surrogates and values past U+10FFFF.
            if core::str::from_utf8(&sequence[..len]).is_err() {
                return Err(InvalidUtf8 { at: take - 1 });
            }
            self.write_slice(&sequence[..len]);
        }

        Ok(take)
    }

    /// Flushes everything and returns the completed string.
    pub(crate) fn finish(&mut self) -> String {
        self.flush_surrogate();
        self.spill();
        core::mem::take(&mut self.overflow)
    }

    fn abandon_sequence(&mut self) {
        self.bytes_in_sequence = 0;
        self.bytes_remaining = 0;
    }

    fn flush_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() {
            self.write_char(REPLACEMENT);
        }
    }

    fn write_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.write_slice(c.encode_utf8(&mut tmp).as_bytes());
    }

    fn write_slice(&mut self, bytes: &[u8]) {
        if self.offset + bytes.len() > self.buf.len() {
            log::debug!(
                "string buffer full; moving {} bytes to overflow",
                self.offset
            );
            self.spill();
        }
        self.buf[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
    }

    /// Decodes the buffered bytes into the overflow string.
    fn spill(&mut self) {
        // Only whole, validated sequences are ever buffered, so this never
        // substitutes anything.
        self.overflow
            .push_str(&String::from_utf8_lossy(&self.buf[..self.offset]));
        self.offset = 0;
    }
}
