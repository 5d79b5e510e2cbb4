//! Accumulation of the four hexadecimal digits of a `\uXXXX` escape.
//!
//! The [`UnicodeEscapeBuffer`] collects ASCII hex digits (`0-9`, `A-F`,
//! `a-f`) and yields the 16-bit code unit once exactly four have been fed,
//! resetting itself for the next escape. Surrogate halves are returned as-is;
//! pairing them is the string accumulator's job.

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

/// The byte fed to [`UnicodeEscapeBuffer::feed`] was not a hex digit.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct NotHexDigit;

impl UnicodeEscapeBuffer {
    pub(crate) fn reset(&mut self) {
        self.value = 0;
        self.len = 0;
    }

    /// Feeds one byte of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer is reset.
    /// - `Err` if `byte` is not an ASCII hex digit.
    pub(crate) fn feed(&mut self, byte: u8) -> Result<Option<u16>, NotHexDigit> {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(NotHexDigit),
        };

        self.value = (self.value << 4) | u16::from(digit);
        self.len += 1;

        if self.len == 4 {
            let unit = self.value;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}
