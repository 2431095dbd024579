//! UTF-8 text on top of the byte stream.
//!
//! Lines are written with a CRLF terminator and read back tolerating `\n`,
//! `\r\n`, and a lone `\r`.

use core::fmt;

use bstr::{BStr, ByteSlice};

use super::ByteBuffer;
use crate::error::Result;

const CRLF: &[u8; 2] = b"\r\n";

impl ByteBuffer {
    /// Appends the UTF-8 bytes of `text`.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.append(text.as_bytes())
    }

    /// Appends the UTF-8 encoding of `ch`.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn print_char(&mut self, ch: char) -> Result<()> {
        let mut utf8 = [0; 4];
        self.append(ch.encode_utf8(&mut utf8).as_bytes())
    }

    /// Appends `text` followed by CRLF. An empty `text` still writes the
    /// terminator.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn println(&mut self, text: &str) -> Result<()> {
        self.reserve(text.len() + CRLF.len())?;
        self.print(text)?;
        self.newline()
    }

    /// Appends `ch` followed by CRLF.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn println_char(&mut self, ch: char) -> Result<()> {
        self.print_char(ch)?;
        self.newline()
    }

    /// Appends CRLF.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn newline(&mut self) -> Result<()> {
        self.append(CRLF)
    }

    /// Appends one byte per char of `text`, keeping the low eight bits of
    /// each code point. ASCII and Latin-1 text round-trips through
    /// [`read_ascii`](Self::read_ascii).
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn write_ascii(&mut self, text: &str) -> Result<()> {
        let count = text.chars().count();
        let dst = self.reserve(count)?;
        for (slot, ch) in dst.iter_mut().zip(text.chars()) {
            *slot = u32::from(ch).to_le_bytes()[0];
        }
        self.write.pos += count;
        Ok(())
    }

    /// Consumes exactly `len` bytes as one char each. Returns `None`, with
    /// the cursor untouched, when fewer are available.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn read_ascii(&mut self, len: usize) -> Result<Option<String>> {
        let pending = self.readable()?;
        let Some(span) = pending.get(..len) else {
            return Ok(None);
        };
        let text = span.iter().copied().map(char::from).collect();
        self.read.pos += len;
        Ok(Some(text))
    }

    /// Appends `items` as `[a b c ]`: an opening bracket, each item's
    /// [`Display`](fmt::Display) form followed by a space, and a closing
    /// bracket. An empty slice writes `[ ]`.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn print_list<T: fmt::Display>(&mut self, items: &[T]) -> Result<()> {
        self.append(b"[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.append(b" ")?;
            }
            self.print(&item.to_string())?;
        }
        self.append(b" ]")
    }

    /// Writes each item's [`Display`](fmt::Display) form on its own
    /// CRLF-terminated line.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn println_each<T: fmt::Display>(&mut self, items: &[T]) -> Result<()> {
        for item in items {
            self.println(&item.to_string())?;
        }
        Ok(())
    }

    /// Consumes one line and returns it without its terminator.
    ///
    /// The line ends at `\n`, `\r\n`, a lone `\r`, or the end of the
    /// available bytes. Invalid UTF-8 is replaced with U+FFFD. An empty line
    /// yields `Some("")`; `None` means nothing was available.
    ///
    /// The read mark is left at the start of the returned line, replacing
    /// any earlier mark, so [`reset_read`](Self::reset_read) steps back over
    /// it.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.mark_read()?;
        let pending = self.readable()?;
        if pending.is_empty() {
            return Ok(None);
        }
        let (consumed, terminator) = match pending.find_byteset(CRLF) {
            None => (pending.len(), 0),
            Some(at) if pending[at] == b'\r' && pending.get(at + 1) == Some(&b'\n') => (at + 2, 2),
            Some(at) => (at + 1, 1),
        };
        self.read.pos += consumed;
        Ok(Some(
            self.marked_read_drop(terminator)?
                .map(|line| line.to_str_lossy().into_owned())
                .unwrap_or_default(),
        ))
    }

    /// Iterates over the remaining lines, as [`read_line`](Self::read_line).
    pub fn lines(&mut self) -> Lines<'_> {
        Lines {
            buf: self,
            done: false,
        }
    }

    /// Decodes the available bytes as lossy UTF-8 without consuming them;
    /// `None` when empty.
    ///
    /// # Errors
    ///
    /// [`Error::Destroyed`](crate::Error::Destroyed).
    pub fn buf_string(&self) -> Result<Option<String>> {
        let bytes = self.readable()?;
        Ok((!bytes.is_empty()).then(|| bytes.to_str_lossy().into_owned()))
    }
}

/// Iterator returned by [`ByteBuffer::lines`].
///
/// Yields every line until the buffer is drained. After an error the
/// iterator is fused.
#[derive(Debug)]
pub struct Lines<'a> {
    buf: &'a mut ByteBuffer,
    done: bool,
}

impl Iterator for Lines<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.buf.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for Lines<'_> {}

/// The available bytes as lossy UTF-8. A destroyed buffer renders empty.
impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.readable().unwrap_or_default()), f)
    }
}
