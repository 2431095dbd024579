//! Lowercase hexadecimal encoding of raw bytes.
//!
//! Decoding accepts both cases. Input with an odd number of digits is
//! accepted: the final lone digit fills the high nibble of the final output
//! byte and its low nibble is zero, so `"f"` decodes to `[0xf0]` and `"abc"`
//! to `[0xab, 0xc0]`.

use crate::{
    error::{Error, Result},
    numeric,
};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Hex digit for the low four bits of `value`.
#[inline]
#[must_use]
pub fn encode_low(value: u8) -> char {
    DIGITS[usize::from(value & 0xf)] as char
}

/// Hex digit for the high four bits of `value`.
#[inline]
#[must_use]
pub fn encode_high(value: u8) -> char {
    DIGITS[usize::from(value >> 4)] as char
}

/// Both digits of one byte, high nibble first.
#[must_use]
pub fn encode_byte(value: u8) -> [char; 2] {
    [encode_high(value), encode_low(value)]
}

/// Encodes `bytes` as lowercase hex text.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(encode_high(b));
        out.push(encode_low(b));
    }
    out
}

/// Encodes `bytes` as seven bit ASCII hex digits.
#[must_use]
pub fn encode_ascii(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[usize::from(b >> 4)]);
        out.push(DIGITS[usize::from(b & 0xf)]);
    }
    out
}

/// Eight digits of `value` in network byte order.
#[must_use]
pub fn encode_u32(value: u32) -> String {
    encode(&numeric::encode_u32(value))
}

/// Sixteen digits of `value` in network byte order.
#[must_use]
pub fn encode_u64(value: u64) -> String {
    encode(&numeric::encode_u64(value))
}

#[inline]
fn nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

/// Decodes hex text.
///
/// # Errors
///
/// [`Error::NotHex`] on the first character that is not a hex digit.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    if let Some((index, found)) = text.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(Error::NotHex { index, found });
    }
    decode_bytes(text.as_bytes())
}

/// Decodes ASCII hex digits.
///
/// # Errors
///
/// [`Error::NotHex`] on the first byte that is not a hex digit.
pub fn decode_bytes(digits: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(digits.len().div_ceil(2));
    for (pair, chunk) in digits.chunks(2).enumerate() {
        let digit = |at: usize| {
            nibble(chunk[at]).ok_or(Error::NotHex {
                index: pair * 2 + at,
                found: char::from(chunk[at]),
            })
        };
        let high = digit(0)?;
        let low = if chunk.len() == 2 { digit(1)? } else { 0 };
        out.push((high << 4) | low);
    }
    Ok(out)
}

/// Decodes `len` digits of `digits` starting at `offset`.
///
/// Error indices are relative to `offset`.
///
/// # Errors
///
/// [`Error::OutOfBounds`] if the range does not fit `digits`, otherwise as
/// [`decode_bytes`].
pub fn decode_range(digits: &[u8], offset: usize, len: usize) -> Result<Vec<u8>> {
    Error::check_range(offset, len, digits.len())?;
    decode_bytes(&digits[offset..offset + len])
}
