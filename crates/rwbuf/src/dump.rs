//! Columnar dumps of raw bytes for diagnostics.
//!
//! Each row holds up to [`ROW`] entries and starts with the running offset
//! of its first byte. The dump ends with a line carrying only the offset one
//! past the last byte, so consecutive dumps through the same [`Printer`]
//! continue numbering where the previous one stopped.

use core::fmt::{self, Write};

use crate::options::{Content, DumpOptions, Offset};

/// Entries per row.
pub const ROW: usize = 20;

const CONTROL_NAMES: [&str; 33] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "FS", "GS", "RS", "US", "SP",
];

/// The ASCII mnemonic of a control character, space, or `DEL`.
#[must_use]
pub fn ascii_name(byte: u8) -> Option<&'static str> {
    match byte {
        0x00..=0x20 => Some(CONTROL_NAMES[usize::from(byte)]),
        0x7F => Some("DEL"),
        _ => None,
    }
}

/// Renders printable ASCII as itself and everything else by
/// [`ascii_name`], for quick human-readable views of text fragments.
#[must_use]
pub fn printable(ch: char) -> String {
    match u8::try_from(ch).ok().and_then(ascii_name) {
        Some(name) => name.to_string(),
        None => ch.to_string(),
    }
}

/// Stateful dump writer.
#[derive(Debug, Clone, Default)]
pub struct Printer {
    options: DumpOptions,
    position: usize,
}

impl Printer {
    #[must_use]
    pub fn new(options: DumpOptions) -> Self {
        Self {
            options,
            position: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> DumpOptions {
        self.options
    }

    /// Offset that labels the next byte printed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    pub fn reset(&mut self) {
        self.seek(0);
    }

    fn offset<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self.options.offset {
            Offset::Dec => write!(out, "{:07}", self.position),
            Offset::Hex => write!(out, "{:08X}", self.position),
        }
    }

    fn content<W: Write>(&self, byte: u8, out: &mut W) -> fmt::Result {
        match self.options.content {
            Content::Ascii => match ascii_name(byte) {
                Some(name) => write!(out, " {name:>3}"),
                None if byte.is_ascii_graphic() => write!(out, " {:>3}", char::from(byte)),
                None => write!(out, " {byte:03X}"),
            },
            Content::Hex => write!(out, " {byte:02X}"),
        }
    }

    /// Writes `bytes` to `out`.
    ///
    /// # Errors
    ///
    /// Propagates errors of `out`.
    pub fn print<W: Write>(&mut self, bytes: &[u8], out: &mut W) -> fmt::Result {
        for row in bytes.chunks(ROW) {
            self.offset(out)?;
            for &byte in row {
                self.content(byte, out)?;
                self.position += 1;
            }
            out.write_char('\n')?;
        }
        self.offset(out)?;
        out.write_char('\n')
    }

    /// Renders `bytes` into a new string.
    #[must_use]
    pub fn render(&mut self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity((bytes.len() / ROW + 2) * (9 + ROW * 4));
        // Writing into a `String` cannot fail.
        let _ = self.print(bytes, &mut out);
        out
    }
}
