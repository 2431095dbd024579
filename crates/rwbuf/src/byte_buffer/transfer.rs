//! Bulk copies between a buffer and readers, writers, and files.
//!
//! Nothing here retries. An [`io::ErrorKind::Interrupted`] from the other
//! side propagates like any other failure, with the bytes moved before it
//! already accounted for in the cursors.

use std::{
    fs,
    io::{self, BufRead, Read, Write},
    path::Path,
};

use super::ByteBuffer;
use crate::{
    error::{Error, Result},
    options::{BufferOptions, TruncationPolicy},
};

impl ByteBuffer {
    /// Creates a buffer holding everything `reader` yields.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] from the reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut buf = Self::new();
        buf.read_from(reader)?;
        Ok(buf)
    }

    /// Creates a buffer holding at most `max` bytes of `reader`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] from the reader.
    pub fn from_reader_limited<R: Read>(reader: R, max: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.read_from_limited(reader, max)?;
        Ok(buf)
    }

    /// Creates a buffer holding the contents of the file at `path`, with the
    /// storage sized to the file up front.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened or read, otherwise as
    /// [`read_from_file`](Self::read_from_file).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let len = fs::metadata(path)?.len();
        let len = usize::try_from(len).map_err(|_| Error::TooLarge { len })?;
        let mut buf = Self::with_options(BufferOptions {
            initial_capacity: len,
            ..BufferOptions::default()
        });
        buf.read_from_file(path)?;
        Ok(buf)
    }

    /// Appends everything `reader` yields until it reports end of input.
    /// Returns the number of bytes appended.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] from the reader.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<usize> {
        self.read_from_limited(reader, usize::MAX)
    }

    /// Appends at most `max` bytes of `reader`, in chunks of
    /// [`BufferOptions::copy_chunk`]. Returns the number of bytes appended.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] from the reader.
    pub fn read_from_limited<R: Read>(&mut self, mut reader: R, max: usize) -> Result<usize> {
        let chunk = self.options.copy_chunk.max(1);
        let mut total = 0;
        while total < max {
            let n = self.fill_chunk(&mut reader, chunk.min(max - total))?;
            if n == 0 {
                break;
            }
            total += n;
        }
        tracing::debug!(bytes = total, "read stream into buffer");
        Ok(total)
    }

    /// Appends `expected` bytes of `reader`, a source that has announced its
    /// length, such as a file or a length-prefixed frame.
    ///
    /// Storage grows one [`BufferOptions::file_chunk`] at a time as bytes
    /// arrive, never by the announced length alone. If the reader ends early
    /// the [`BufferOptions::truncation`] policy decides the outcome. Returns
    /// the number of bytes appended.
    ///
    /// # Errors
    ///
    /// [`Error::Truncated`] under [`TruncationPolicy::Reject`], or
    /// [`Error::Io`] from the reader. Bytes read before a failure stay in
    /// the buffer.
    pub fn read_from_sized<R: Read>(&mut self, mut reader: R, expected: usize) -> Result<usize> {
        let chunk = expected.min(self.options.file_chunk).max(1);
        let mut total = 0;
        while total < expected {
            let n = self.fill_chunk(&mut reader, chunk.min(expected - total))?;
            if n == 0 {
                break;
            }
            total += n;
        }
        if total < expected {
            match self.options.truncation {
                TruncationPolicy::Accept => {
                    tracing::warn!(expected, actual = total, "source shrank while reading");
                }
                TruncationPolicy::Reject => {
                    return Err(Error::Truncated {
                        expected,
                        actual: total,
                    });
                }
            }
        }
        Ok(total)
    }

    /// Appends the contents of the file at `path`.
    ///
    /// The file must exist. A file that shrinks while being read is handled
    /// by [`BufferOptions::truncation`]. Returns the number of bytes
    /// appended.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be opened or read,
    /// [`Error::TooLarge`] if its length does not fit in memory, or
    /// [`Error::Truncated`].
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let len = file.metadata()?.len();
        let expected = usize::try_from(len).map_err(|_| Error::TooLarge { len })?;
        let total = self.read_from_sized(file, expected)?;
        tracing::debug!(path = %path.display(), bytes = total, "read file into buffer");
        Ok(total)
    }

    /// Reads once from `reader` straight into up to `want` bytes of storage
    /// at the write cursor.
    fn fill_chunk<R: Read>(&mut self, reader: &mut R, want: usize) -> Result<usize> {
        let n = reader.read(self.reserve(want)?)?;
        self.write.pos += n;
        Ok(n)
    }

    /// Drains the available bytes into `writer` in chunks of
    /// [`BufferOptions::copy_chunk`], advancing the read cursor after each
    /// chunk. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] from the writer. The read cursor reflects the chunks
    /// written before the failure.
    pub fn write_to<W: Write>(&mut self, mut writer: W) -> Result<usize> {
        let chunk = self.options.copy_chunk.max(1);
        let mut total = 0;
        loop {
            let pending = self.readable()?;
            if pending.is_empty() {
                break;
            }
            let n = pending.len().min(chunk);
            writer.write_all(&pending[..n])?;
            self.read.pos += n;
            total += n;
        }
        writer.flush()?;
        tracing::debug!(bytes = total, "drained buffer into stream");
        Ok(total)
    }

    /// Writes the available bytes to `writer` without moving any cursor.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] from the writer.
    pub fn copy_out<W: Write>(&self, mut writer: W) -> Result<usize> {
        let pending = self.readable()?;
        writer.write_all(pending)?;
        Ok(pending.len())
    }

    /// Replaces the file at `path` with a snapshot of the available bytes,
    /// creating missing parent directories. No cursor moves. Returns the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`] before touching the filesystem, or [`Error::Io`]
    /// if the directories or the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let pending = self.readable()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, pending)?;
        tracing::debug!(path = %path.display(), bytes = pending.len(), "wrote buffer snapshot to file");
        Ok(pending.len())
    }
}

impl Read for ByteBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        Ok(self.read_into(buf)?.unwrap_or(0))
    }
}

impl BufRead for ByteBuffer {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.readable()?)
    }

    fn consume(&mut self, amt: usize) {
        self.read.pos += amt.min(self.available());
    }
}

/// Appends to the buffer. `write!` on a buffer appends the formatted UTF-8
/// text.
impl Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Ok(self.append(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
