//! Growable byte buffer with independent read and write cursors.
//!
//! Writing appends at the write cursor and never overwrites unread bytes.
//! Reading consumes from the read cursor and never passes the write cursor.
//! Every operation maintains
//!
//! ```text
//! 0 <= read cursor <= write cursor <= storage extent
//! ```
//!
//! Each direction has its own optional mark. Resetting a direction moves its
//! cursor back to the mark, or to offset zero when unmarked, and consumes the
//! mark: two resets in a row always end at offset zero.
//!
//! The buffer performs no synchronization. Callers sharing one between
//! threads hold their own lock across each whole sequence of calls, for
//! example `mark_read`, `read4`, `reset_read`, `write4`.

use core::fmt;

use bstr::BStr;

use crate::{
    error::{Error, Result},
    numeric,
    options::BufferOptions,
};

mod text;
mod transfer;

#[cfg(test)]
mod tests;

pub use text::Lines;

/// One direction's position and checkpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    pos: usize,
    mark: Option<usize>,
}

impl Cursor {
    fn mark(&mut self) {
        self.mark = Some(self.pos);
    }

    fn reset(&mut self) {
        self.pos = self.mark.take().unwrap_or(0);
    }

    fn mark_or_zero(self) -> usize {
        self.mark.unwrap_or(0)
    }

    fn clamp(&mut self, limit: usize) {
        self.pos = self.pos.min(limit);
        if let Some(mark) = self.mark.as_mut() {
            *mark = (*mark).min(limit);
        }
    }
}

/// Extends `storage` so that `to_index` is a valid index, preserving its
/// contents. Never shrinks.
fn grow(mut storage: Vec<u8>, to_index: usize) -> Vec<u8> {
    if to_index >= storage.len() {
        let extent = to_index + 1;
        storage.reserve_exact(extent - storage.len());
        storage.resize(extent, 0);
    }
    storage
}

/// A read/write byte buffer.
///
/// # Examples
///
/// ```rust
/// use rwbuf::ByteBuffer;
///
/// let mut buf = ByteBuffer::new();
/// buf.write2(0x0102).unwrap();
/// buf.println("hello").unwrap();
///
/// assert_eq!(buf.read2().unwrap(), 0x0102);
/// assert_eq!(buf.read_line().unwrap().as_deref(), Some("hello"));
/// assert!(buf.is_empty());
/// ```
#[derive(Clone)]
pub struct ByteBuffer {
    storage: Option<Vec<u8>>,
    read: Cursor,
    write: Cursor,
    options: BufferOptions,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteBuffer {
    /// Creates an empty buffer with [`BufferOptions::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// Creates an empty buffer that starts with, and grows by, `growth` bytes.
    #[must_use]
    pub fn with_growth_factor(growth: usize) -> Self {
        Self::with_options(BufferOptions::with_growth(growth))
    }

    /// Creates an empty buffer configured by `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            storage: Some(vec![0; options.initial_capacity]),
            read: Cursor::default(),
            write: Cursor::default(),
            options,
        }
    }

    /// Wraps `bytes` so that all of them are immediately readable. The vector
    /// becomes the backing storage without copying.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_bytes_with_options(bytes, BufferOptions::default())
    }

    /// As [`from_bytes`](Self::from_bytes) with explicit options;
    /// `initial_capacity` is ignored.
    #[must_use]
    pub fn from_bytes_with_options(bytes: Vec<u8>, options: BufferOptions) -> Self {
        let written = bytes.len();
        Self {
            storage: Some(bytes),
            read: Cursor::default(),
            write: Cursor {
                pos: written,
                mark: None,
            },
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    #[must_use]
    pub fn growth_factor(&self) -> usize {
        self.options.growth_factor
    }

    /// Changes the growth factor used by subsequent writes.
    pub fn set_growth_factor(&mut self, growth: usize) {
        self.options.growth_factor = growth;
    }

    /// Bytes written and not yet read.
    #[must_use]
    pub fn available(&self) -> usize {
        self.write.pos - self.read.pos
    }

    /// Same as [`available`](Self::available).
    #[must_use]
    pub fn len(&self) -> usize {
        self.available()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Current extent of the backing storage; zero once destroyed.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().map_or(0, Vec::len)
    }

    /// Offset of the last byte written, `None` before the first write.
    #[must_use]
    pub fn offset_write(&self) -> Option<usize> {
        self.write.pos.checked_sub(1)
    }

    /// Offset of the last byte read, `None` before the first read.
    #[must_use]
    pub fn offset_read(&self) -> Option<usize> {
        self.read.pos.checked_sub(1)
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.storage.is_none()
    }

    /// Releases the backing storage. Every later data operation fails with
    /// [`Error::Destroyed`]; size accessors report zero.
    pub fn destroy(&mut self) {
        self.storage = None;
        self.read = Cursor::default();
        self.write = Cursor::default();
    }

    /// Consumes the buffer and returns its storage up to the write cursor.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn into_inner(self) -> Result<Vec<u8>> {
        let mut storage = self.storage.ok_or(Error::Destroyed)?;
        storage.truncate(self.write.pos);
        Ok(storage)
    }

    /// Panics unless the cursor ordering holds.
    #[cfg(feature = "fuzzing")]
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        assert!(self.read.pos <= self.write.pos, "{self:?}");
        assert!(self.write.pos <= self.capacity(), "{self:?}");
        if let Some(mark) = self.write.mark {
            assert!(mark <= self.capacity(), "{self:?}");
        }
        if let Some(mark) = self.read.mark {
            assert!(mark <= self.write.pos, "{self:?}");
        }
    }

    fn live(&self) -> Result<&Vec<u8>> {
        self.storage.as_ref().ok_or(Error::Destroyed)
    }

    /// Makes room for `additional` bytes at the write cursor.
    fn reserve(&mut self, additional: usize) -> Result<&mut [u8]> {
        let extent = self.live()?.len();
        let start = self.write.pos;
        let required = start
            .checked_add(additional)
            .filter(|&end| end <= isize::MAX.unsigned_abs())
            .ok_or(Error::TooLarge {
                len: u64::try_from(additional).unwrap_or(u64::MAX),
            })?;
        if required > extent {
            let step = additional.max(self.options.growth_factor).max(1);
            let target = extent.saturating_add(step).min(isize::MAX.unsigned_abs()).max(required);
            tracing::trace!(from = extent, to = target, "growing byte buffer storage");
            if let Some(storage) = self.storage.take() {
                self.storage = Some(grow(storage, target - 1));
            }
        }
        let storage = self.storage.as_mut().ok_or(Error::Destroyed)?;
        Ok(&mut storage[start..required])
    }

    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        self.write.pos += bytes.len();
        Ok(())
    }

    // ----------------------------------------------------------------------------------------
    // Write path
    // ----------------------------------------------------------------------------------------

    /// Appends one byte.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.append(&[byte])
    }

    /// Appends `bytes`.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.append(bytes)
    }

    /// Appends `len` bytes of `src` starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the range does not fit `src`, or
    /// [`Error::Destroyed`].
    pub fn write_range(&mut self, src: &[u8], offset: usize, len: usize) -> Result<()> {
        Error::check_range(offset, len, src.len())?;
        self.append(&src[offset..offset + len])
    }

    /// Appends `count` copies of `byte` and returns `count`.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`], or [`Error::TooLarge`] when the count cannot be
    /// addressed.
    pub fn nwrite(&mut self, byte: u8, count: usize) -> Result<usize> {
        self.reserve(count)?.fill(byte);
        self.write.pos += count;
        Ok(count)
    }

    /// Advances the write cursor over `n` bytes without writing them.
    ///
    /// The skipped region keeps whatever the storage held there: zero unless
    /// a write cursor reset left earlier bytes behind.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`], or [`Error::TooLarge`] when the count cannot be
    /// addressed.
    pub fn skip_write(&mut self, n: usize) -> Result<usize> {
        self.reserve(n)?;
        self.write.pos += n;
        Ok(n)
    }

    /// Appends `value` as two big-endian bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write2(&mut self, value: u16) -> Result<()> {
        self.append(&numeric::encode_u16(value))
    }

    /// Appends the low 24 bits of `value` as three big-endian bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write3(&mut self, value: u32) -> Result<()> {
        self.append(&numeric::encode_u24(value))
    }

    /// Appends `value` as four big-endian bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write4(&mut self, value: u32) -> Result<()> {
        self.append(&numeric::encode_u32(value))
    }

    /// Appends `value` as eight big-endian bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write8(&mut self, value: u64) -> Result<()> {
        self.append(&numeric::encode_u64(value))
    }

    /// Appends each value of `values` with [`write2`](Self::write2).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write2_all(&mut self, values: &[u16]) -> Result<()> {
        self.reserve(values.len() * 2)?;
        values.iter().try_for_each(|&v| self.write2(v))
    }

    /// Appends each value of `values` with [`write4`](Self::write4).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write4_all(&mut self, values: &[u32]) -> Result<()> {
        self.reserve(values.len() * 4)?;
        values.iter().try_for_each(|&v| self.write4(v))
    }

    /// Appends each value of `values` with [`write8`](Self::write8).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write8_all(&mut self, values: &[u64]) -> Result<()> {
        self.reserve(values.len() * 8)?;
        values.iter().try_for_each(|&v| self.write8(v))
    }

    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.append(&numeric::encode_i32(value))
    }

    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.append(&numeric::encode_i64(value))
    }

    /// Appends the IEEE bit pattern of `value`, big-endian.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.append(&numeric::encode_f32(value))
    }

    /// Appends the IEEE bit pattern of `value`, big-endian.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.append(&numeric::encode_f64(value))
    }

    /// The last byte written, without consuming anything.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn peek_write(&self) -> Result<Option<u8>> {
        Ok(self.live()?[..self.write.pos].last().copied())
    }

    // ----------------------------------------------------------------------------------------
    // Read path
    // ----------------------------------------------------------------------------------------

    /// Borrows the bytes available for reading.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn readable(&self) -> Result<&[u8]> {
        Ok(&self.live()?[self.read.pos..self.write.pos])
    }

    /// The next unread byte, without consuming it.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn peek(&self) -> Result<Option<u8>> {
        Ok(self.readable()?.first().copied())
    }

    /// Consumes the next byte; `None` when nothing is available.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let next = self.peek()?;
        if next.is_some() {
            self.read.pos += 1;
        }
        Ok(next)
    }

    /// Copies as many available bytes as fit into `dst`.
    ///
    /// Returns the number of bytes copied, or `None` if no byte was
    /// available at all.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn read_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>> {
        let src = self.readable()?;
        if src.is_empty() {
            return Ok(None);
        }
        let n = src.len().min(dst.len());
        dst[..n].copy_from_slice(&src[..n]);
        self.read.pos += n;
        Ok(Some(n))
    }

    /// Copies up to `len` available bytes into `dst` at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the range does not fit `dst`, or
    /// [`Error::Destroyed`].
    pub fn read_range(&mut self, dst: &mut [u8], offset: usize, len: usize) -> Result<Option<usize>> {
        Error::check_range(offset, len, dst.len())?;
        self.read_into(&mut dst[offset..offset + len])
    }

    /// Consumes up to `many` bytes into a new vector; `None` when nothing is
    /// available or `many` is zero.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn read_many(&mut self, many: usize) -> Result<Option<Vec<u8>>> {
        let src = self.readable()?;
        let n = src.len().min(many);
        if n == 0 {
            return Ok(None);
        }
        let out = src[..n].to_vec();
        self.read.pos += n;
        Ok(Some(out))
    }

    /// Advances the read cursor by up to `n` available bytes, returning the
    /// number skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn skip_read(&mut self, n: usize) -> Result<usize> {
        let n = self.readable()?.len().min(n);
        self.read.pos += n;
        Ok(n)
    }

    fn read_fixed<T>(&mut self, width: usize, decode: fn(&[u8]) -> Result<T>) -> Result<T> {
        let value = decode(self.readable()?)?;
        self.read.pos += width;
        Ok(value)
    }

    /// Consumes two bytes as a big-endian value.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than two bytes are available;
    /// the cursor does not move.
    pub fn read2(&mut self) -> Result<u16> {
        self.read_fixed(2, numeric::decode_u16)
    }

    /// Consumes three bytes as a big-endian 24 bit value.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than three bytes are available.
    pub fn read3(&mut self) -> Result<u32> {
        self.read_fixed(3, numeric::decode_u24)
    }

    /// Consumes four bytes as a big-endian value.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than four bytes are available.
    pub fn read4(&mut self) -> Result<u32> {
        self.read_fixed(4, numeric::decode_u32)
    }

    /// Consumes eight bytes as a big-endian value.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than eight bytes are available.
    pub fn read8(&mut self) -> Result<u64> {
        self.read_fixed(8, numeric::decode_u64)
    }

    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than four bytes are available.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_fixed(4, numeric::decode_i32)
    }

    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than eight bytes are available.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_fixed(8, numeric::decode_i64)
    }

    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than four bytes are available.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_fixed(4, numeric::decode_f32)
    }

    /// # Errors
    ///
    /// [`Error::InsufficientData`] if fewer than eight bytes are available.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_fixed(8, numeric::decode_f64)
    }

    // ----------------------------------------------------------------------------------------
    // Unread
    // ----------------------------------------------------------------------------------------

    fn check_unread(&self, n: usize) -> Result<()> {
        self.live()?;
        if self.read.pos == 0 {
            return Err(Error::UnreadWithoutRead);
        }
        if n > self.read.pos {
            return Err(Error::UnreadUnderflow {
                requested: n,
                consumed: self.read.pos,
            });
        }
        if !self.options.allow_reopen_at_end && self.read.pos == self.write.pos {
            return Err(Error::ReopenAtEnd);
        }
        Ok(())
    }

    /// Steps the read cursor back over the last byte read.
    ///
    /// # Errors
    ///
    /// [`Error::UnreadWithoutRead`] if nothing has been read,
    /// [`Error::ReopenAtEnd`] if the buffer is drained and
    /// [`BufferOptions::allow_reopen_at_end`] is off.
    pub fn unread(&mut self) -> Result<()> {
        self.check_unread(1)?;
        self.read.pos -= 1;
        Ok(())
    }

    /// As [`unread`](Self::unread), replacing the uncommitted byte with
    /// `byte`.
    ///
    /// # Errors
    ///
    /// As [`unread`](Self::unread).
    pub fn unread_byte(&mut self, byte: u8) -> Result<()> {
        self.check_unread(1)?;
        self.read.pos -= 1;
        let at = self.read.pos;
        if let Some(storage) = self.storage.as_mut() {
            storage[at] = byte;
        }
        Ok(())
    }

    /// Steps the read cursor back `n` bytes. Zero is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::UnreadUnderflow`] if fewer than `n` bytes have been read,
    /// otherwise as [`unread`](Self::unread).
    pub fn unread_n(&mut self, n: usize) -> Result<()> {
        self.live()?;
        if n == 0 {
            return Ok(());
        }
        self.check_unread(n)?;
        self.read.pos -= n;
        Ok(())
    }

    // ----------------------------------------------------------------------------------------
    // Marks
    // ----------------------------------------------------------------------------------------
    //
    // Every mark and reset fails with [`Error::Destroyed`] once the storage is released.

    /// Records the read cursor as the read mark.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn mark_read(&mut self) -> Result<()> {
        self.live()?;
        self.read.mark();
        Ok(())
    }

    /// Moves the read cursor to the read mark, or to zero when unmarked, and
    /// clears the mark.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn reset_read(&mut self) -> Result<()> {
        self.live()?;
        self.read.reset();
        Ok(())
    }

    /// Records the write cursor as the write mark.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn mark_write(&mut self) -> Result<()> {
        self.live()?;
        self.write.mark();
        Ok(())
    }

    /// Moves the write cursor to the write mark, or to zero when unmarked,
    /// and clears the mark. Unread bytes past the new write cursor are
    /// discarded.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn reset_write(&mut self) -> Result<()> {
        self.live()?;
        self.write.reset();
        self.read.clamp(self.write.pos);
        Ok(())
    }

    /// Same as [`reset_write`](Self::reset_write).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn reset(&mut self) -> Result<()> {
        self.reset_write()
    }

    /// Resets both directions.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn reset_all(&mut self) -> Result<()> {
        self.reset_write()?;
        self.reset_read()
    }

    /// Moves both cursors to zero and clears the write mark.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn clear(&mut self) -> Result<()> {
        self.live()?;
        self.write = Cursor::default();
        self.read.clamp(0);
        Ok(())
    }

    /// Moves both cursors to zero and clears both marks.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn close(&mut self) -> Result<()> {
        self.live()?;
        self.write = Cursor::default();
        self.read = Cursor::default();
        Ok(())
    }

    /// Bytes read since the read mark (or offset zero when unmarked).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn marked_read(&self) -> Result<Option<Vec<u8>>> {
        self.marked_read_drop(0)
    }

    /// Bytes read since the read mark, excluding the last `drop` of them.
    /// No cursor or mark changes.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn marked_read_drop(&self, drop: usize) -> Result<Option<Vec<u8>>> {
        let storage = self.live()?;
        let start = self.read.mark_or_zero();
        let end = self.read.pos.saturating_sub(drop);
        Ok((start < end).then(|| storage[start..end].to_vec()))
    }

    /// Bytes written since the write mark (or offset zero when unmarked).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn marked_write(&self) -> Result<Option<Vec<u8>>> {
        let storage = self.live()?;
        let start = self.write.mark_or_zero();
        let end = self.write.pos;
        Ok((start < end).then(|| storage[start..end].to_vec()))
    }

    // ----------------------------------------------------------------------------------------
    // Snapshots
    // ----------------------------------------------------------------------------------------

    /// Copies the available bytes; `None` when empty. No cursor moves.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn to_vec(&self) -> Result<Option<Vec<u8>>> {
        let bytes = self.readable()?;
        Ok((!bytes.is_empty()).then(|| bytes.to_vec()))
    }

    /// Borrows the entire backing storage, including bytes already read and
    /// the unwritten tail.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn verbatim(&self) -> Result<&[u8]> {
        self.live().map(Vec::as_slice)
    }

    /// Copies the entire backing storage; `None` when it has zero extent.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn dump(&self) -> Result<Option<Vec<u8>>> {
        let storage = self.live()?;
        Ok((!storage.is_empty()).then(|| storage.clone()))
    }

    /// Renders the available bytes with a dump [`Printer`](crate::dump::Printer).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`].
    pub fn hexdump(&self, options: crate::options::DumpOptions) -> Result<String> {
        let mut printer = crate::dump::Printer::new(options);
        printer.seek(self.read.pos);
        Ok(printer.render(self.readable()?))
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("ByteBuffer");
        d.field("read", &self.read)
            .field("write", &self.write)
            .field("capacity", &self.capacity());
        match self.readable() {
            Ok(bytes) => d.field("readable", &BStr::new(bytes)),
            Err(_) => d.field("destroyed", &true),
        };
        d.finish()
    }
}
