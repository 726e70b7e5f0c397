//! Decoding of fixed-width hexadecimal escapes inside string literals.
//!
//! String literals accept three hex escape forms: `\xhh`, `\uXXXX` and
//! `\UXXXXXXXX`. [`HexEscapeBuffer`] accumulates exactly the number of digits
//! the form requires into a `u32` as they arrive, and converts the result to a
//! [`char`] once the last digit is provided.
//!
//! # Errors
//!
//! - Feeding a non-hexadecimal character returns
//!   [`SyntaxError::InvalidEscapeChar`].
//! - A completed code point that is not a Unicode scalar value (a surrogate,
//!   or anything above `U+10FFFF`) returns
//!   [`SyntaxError::InvalidUnicodeEscapeSequence`].

use crate::error::SyntaxError;

/// Accumulates a fixed number of hexadecimal digits and decodes them into a
/// Unicode character.
#[derive(Debug)]
pub(crate) struct HexEscapeBuffer {
    acc: u32,
    len: u8,
    width: u8,
}

impl HexEscapeBuffer {
    /// Starts an escape for the given introducer (`x`, `u` or `U`).
    ///
    /// Returns `None` for any other character.
    pub(crate) fn for_introducer(c: char) -> Option<Self> {
        let width = match c {
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => return None,
        };
        Some(Self { acc: 0, len: 0, width })
    }

    #[inline]
    fn hex_val(c: char) -> Option<u32> {
        c.to_digit(16)
    }

    /// Feeds a single hexadecimal digit into the buffer.
    ///
    /// - Returns `Ok(None)` while more digits are required.
    /// - Returns `Ok(Some(ch))` once the last digit has been accumulated.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<char>, SyntaxError> {
        let d = Self::hex_val(c).ok_or(SyntaxError::InvalidEscapeChar(c))?;

        // Eight digits fit in a u32, so the shift cannot overflow.
        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < self.width {
            return Ok(None);
        }

        let code = self.acc;
        self.acc = 0;
        self.len = 0;

        match char::from_u32(code) {
            Some(ch) => Ok(Some(ch)),
            None => Err(SyntaxError::InvalidUnicodeEscapeSequence(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HexEscapeBuffer;
    use crate::error::SyntaxError;

    #[test]
    fn two_digit_escape() {
        let mut buf = HexEscapeBuffer::for_introducer('x').unwrap();
        assert_eq!(buf.feed('4').unwrap(), None);
        assert_eq!(buf.feed('1').unwrap(), Some('A'));
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = HexEscapeBuffer::for_introducer('u').unwrap();
        for ch in "AbCd".chars() {
            let res = buf.feed(ch).unwrap();
            if ch == 'd' {
                assert_eq!(res, Some(char::from_u32(0xABCD).unwrap()));
            } else {
                assert!(res.is_none());
            }
        }
    }

    #[test]
    fn eight_digit_escape() {
        let mut buf = HexEscapeBuffer::for_introducer('U').unwrap();
        let mut out = None;
        for ch in "0001F40D".chars() {
            out = buf.feed(ch).unwrap();
        }
        assert_eq!(out, Some('🐍'));
    }

    #[test]
    fn unknown_introducer() {
        assert!(HexEscapeBuffer::for_introducer('n').is_none());
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = HexEscapeBuffer::for_introducer('u').unwrap();
        let err = buf.feed('G').unwrap_err();
        assert_eq!(err, SyntaxError::InvalidEscapeChar('G'));
    }

    #[test]
    fn surrogate_errors() {
        let mut buf = HexEscapeBuffer::for_introducer('u').unwrap();
        for ch in "D80".chars() {
            let _ = buf.feed(ch).unwrap();
        }
        assert_eq!(
            buf.feed('0').unwrap_err(),
            SyntaxError::InvalidUnicodeEscapeSequence(0xD800)
        );
    }
}
