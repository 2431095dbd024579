//! Big-endian (network byte order) conversions between fixed-width integers,
//! IEEE floats, and byte sequences.
//!
//! Encoders always produce exactly the width of the value. Decoders read
//! exactly that many bytes from the head of the given slice; trailing bytes
//! are ignored, so a decoder can be pointed at the front of a larger frame.
//! A slice shorter than the width fails with [`Error::InsufficientData`].

use crate::error::{Error, Result};

#[inline]
fn head<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    match bytes.first_chunk::<N>() {
        Some(chunk) => Ok(*chunk),
        None => Err(Error::InsufficientData {
            needed: N,
            available: bytes.len(),
        }),
    }
}

/// Two bytes, high byte first.
#[must_use]
pub fn encode_u16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Three bytes holding the low 24 bits of `value`, high byte first.
#[must_use]
pub fn encode_u24(value: u32) -> [u8; 3] {
    let [_, b1, b2, b3] = value.to_be_bytes();
    [b1, b2, b3]
}

/// Four bytes, high byte first.
#[must_use]
pub fn encode_u32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Eight bytes, high byte first.
#[must_use]
pub fn encode_u64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Four bytes of the two's complement representation of `value`.
#[must_use]
pub fn encode_i32(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Eight bytes of the two's complement representation of `value`.
#[must_use]
pub fn encode_i64(value: i64) -> [u8; 8] {
    value.to_be_bytes()
}

/// The IEEE 754 single precision bit pattern of `value`, big-endian.
#[must_use]
pub fn encode_f32(value: f32) -> [u8; 4] {
    encode_u32(value.to_bits())
}

/// The IEEE 754 double precision bit pattern of `value`, big-endian.
#[must_use]
pub fn encode_f64(value: f64) -> [u8; 8] {
    encode_u64(value.to_bits())
}

/// Writes `value` into the first four bytes of `dst`.
///
/// # Errors
///
/// [`Error::InsufficientData`] if `dst` is shorter than four bytes.
pub fn put_u32(dst: &mut [u8], value: u32) -> Result<()> {
    let available = dst.len();
    let slot = dst.first_chunk_mut::<4>().ok_or(Error::InsufficientData {
        needed: 4,
        available,
    })?;
    *slot = encode_u32(value);
    Ok(())
}

/// Writes `value` into the first eight bytes of `dst`.
///
/// # Errors
///
/// [`Error::InsufficientData`] if `dst` is shorter than eight bytes.
pub fn put_u64(dst: &mut [u8], value: u64) -> Result<()> {
    let available = dst.len();
    let slot = dst.first_chunk_mut::<8>().ok_or(Error::InsufficientData {
        needed: 8,
        available,
    })?;
    *slot = encode_u64(value);
    Ok(())
}

/// Decodes the first two bytes of `bytes`.
///
/// # Errors
///
/// [`Error::InsufficientData`] if fewer than two bytes are given.
pub fn decode_u16(bytes: &[u8]) -> Result<u16> {
    head::<2>(bytes).map(u16::from_be_bytes)
}

/// Decodes the first three bytes of `bytes` into the low 24 bits.
///
/// # Errors
///
/// [`Error::InsufficientData`] if fewer than three bytes are given.
pub fn decode_u24(bytes: &[u8]) -> Result<u32> {
    let [b1, b2, b3] = head::<3>(bytes)?;
    Ok(u32::from_be_bytes([0, b1, b2, b3]))
}

/// Decodes the first four bytes of `bytes`.
///
/// # Errors
///
/// [`Error::InsufficientData`] if fewer than four bytes are given.
pub fn decode_u32(bytes: &[u8]) -> Result<u32> {
    head::<4>(bytes).map(u32::from_be_bytes)
}

/// Decodes the first eight bytes of `bytes`.
///
/// # Errors
///
/// [`Error::InsufficientData`] if fewer than eight bytes are given.
pub fn decode_u64(bytes: &[u8]) -> Result<u64> {
    head::<8>(bytes).map(u64::from_be_bytes)
}

/// # Errors
///
/// [`Error::InsufficientData`] if fewer than four bytes are given.
pub fn decode_i32(bytes: &[u8]) -> Result<i32> {
    head::<4>(bytes).map(i32::from_be_bytes)
}

/// # Errors
///
/// [`Error::InsufficientData`] if fewer than eight bytes are given.
pub fn decode_i64(bytes: &[u8]) -> Result<i64> {
    head::<8>(bytes).map(i64::from_be_bytes)
}

/// # Errors
///
/// [`Error::InsufficientData`] if fewer than four bytes are given.
pub fn decode_f32(bytes: &[u8]) -> Result<f32> {
    decode_u32(bytes).map(f32::from_bits)
}

/// # Errors
///
/// [`Error::InsufficientData`] if fewer than eight bytes are given.
pub fn decode_f64(bytes: &[u8]) -> Result<f64> {
    decode_u64(bytes).map(f64::from_bits)
}
