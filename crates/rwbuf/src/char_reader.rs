//! A cursor over an immutable character sequence, for lexers.
//!
//! The sequence is shared: cloning a [`CharReader`] clones a reference
//! count, not the characters. Each clone moves independently.
//!
//! ```rust
//! use rwbuf::char_reader::{CharReader, WHITESPACE};
//!
//! let mut reader = CharReader::from_text("  width 42px").unwrap();
//! reader.skip_class(&WHITESPACE);
//! assert_eq!(reader.substring(&('a'..='z')).as_deref(), Some("width"));
//! reader.skip_class(&' ');
//! assert_eq!(reader.integer(0).unwrap(), 42);
//! assert_eq!(reader.integer(-1).unwrap(), -1);
//! ```

use core::{ops::RangeInclusive, str::FromStr};
use std::sync::Arc;

use crate::error::{Error, Result};

/// ASCII decimal digits.
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Space, tab, carriage return, and line feed.
pub const WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

/// A set of characters a reader can skip over.
pub trait CharClass {
    fn contains(&self, ch: char) -> bool;
}

impl CharClass for char {
    fn contains(&self, ch: char) -> bool {
        *self == ch
    }
}

impl CharClass for [char] {
    fn contains(&self, ch: char) -> bool {
        self.iter().any(|&c| c == ch)
    }
}

impl<const N: usize> CharClass for [char; N] {
    fn contains(&self, ch: char) -> bool {
        self.as_slice().contains(&ch)
    }
}

impl CharClass for str {
    fn contains(&self, ch: char) -> bool {
        self.chars().any(|c| c == ch)
    }
}

impl CharClass for RangeInclusive<char> {
    fn contains(&self, ch: char) -> bool {
        RangeInclusive::contains(self, &ch)
    }
}

impl<C: CharClass + ?Sized> CharClass for &C {
    fn contains(&self, ch: char) -> bool {
        (**self).contains(ch)
    }
}

/// Adapts a closure into a [`CharClass`].
///
/// ```rust
/// use rwbuf::char_reader::{CharReader, Predicate};
///
/// let mut reader = CharReader::from_text("αβγ;").unwrap();
/// assert_eq!(reader.skip_class(&Predicate(char::is_alphabetic)), 3);
/// assert_eq!(reader.read(), Some(';'));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Predicate<F>(pub F);

impl<F: Fn(char) -> bool> CharClass for Predicate<F> {
    fn contains(&self, ch: char) -> bool {
        (self.0)(ch)
    }
}

/// Read-only cursor with relative peek and a single mark.
///
/// Maintains `0 <= position <= limit <= source.len()`. Moving the position
/// below the mark, or the limit below the mark, discards the mark.
#[derive(Debug, Clone)]
pub struct CharReader {
    source: Arc<[char]>,
    position: usize,
    limit: usize,
    mark: Option<usize>,
}

impl CharReader {
    /// Creates a reader positioned at the start of `source`, with the limit
    /// at its end.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySource`] if `source` has no characters.
    pub fn new(source: impl Into<Arc<[char]>>) -> Result<Self> {
        let source = source.into();
        if source.is_empty() {
            return Err(Error::EmptySource);
        }
        let limit = source.len();
        Ok(Self {
            source,
            position: 0,
            limit,
            mark: None,
        })
    }

    /// Creates a reader over the characters of `text`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySource`] if `text` is empty.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(text.chars().collect::<Arc<[char]>>())
    }

    /// The whole underlying sequence.
    #[must_use]
    pub fn source(&self) -> &[char] {
        &self.source
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Characters between the position and the limit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Whether a character can be read.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.position < self.limit
    }

    /// Moves the limit, pulling the position (and discarding the mark) if
    /// they lie beyond it.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `limit` exceeds the sequence length.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        Error::check_range(0, limit, self.source.len())?;
        self.limit = limit;
        if self.mark.is_some_and(|m| m > limit) {
            self.mark = None;
        }
        self.position = self.position.min(limit);
        Ok(())
    }

    fn index(&self, rel: isize) -> Option<usize> {
        self.position
            .checked_add_signed(rel)
            .filter(|&at| at < self.limit)
    }

    /// The character `rel` places from the position, without moving.
    /// `peek(0)` is the next character [`read`](Self::read) returns and
    /// `peek(-1)` the one it returned last.
    #[must_use]
    pub fn peek(&self, rel: isize) -> Option<char> {
        self.index(rel).map(|at| self.source[at])
    }

    /// The character before the last one read, that is `peek(-2)`. Lexers
    /// use it to tell an escaped delimiter from a bare one.
    #[must_use]
    pub fn precedent(&self) -> Option<char> {
        self.peek(-2)
    }

    /// Consumes the next character; `None` at the limit.
    pub fn read(&mut self) -> Option<char> {
        let ch = self.peek(0)?;
        self.position += 1;
        Some(ch)
    }

    /// Copies as many characters as fit into `dst`, returning the count.
    pub fn read_into(&mut self, dst: &mut [char]) -> usize {
        let n = dst.len().min(self.remaining());
        dst[..n].copy_from_slice(&self.source[self.position..self.position + n]);
        self.position += n;
        n
    }

    /// Moves the position by `delta`, forwards or backwards, returning
    /// `delta`.
    ///
    /// # Errors
    ///
    /// [`Error::PositionOutOfRange`] if the target lies outside
    /// `[0, limit]`; the position does not move.
    pub fn skip(&mut self, delta: isize) -> Result<isize> {
        let target = self
            .position
            .checked_add_signed(delta)
            .filter(|&at| at <= self.limit)
            .ok_or(Error::PositionOutOfRange {
                position: self.position,
                delta,
                limit: self.limit,
            })?;
        if self.mark.is_some_and(|m| m > target) {
            self.mark = None;
        }
        self.position = target;
        Ok(delta)
    }

    /// Advances past the longest run of characters in `class`, returning its
    /// length.
    pub fn skip_class<C: CharClass + ?Sized>(&mut self, class: &C) -> usize {
        let run = self.source[self.position..self.limit]
            .iter()
            .take_while(|&&ch| class.contains(ch))
            .count();
        self.position += run;
        run
    }

    /// As [`skip_class`](Self::skip_class), returning the skipped run as a
    /// string, or `None` if it was empty.
    pub fn substring<C: CharClass + ?Sized>(&mut self, class: &C) -> Option<String> {
        let start = self.position;
        let run = self.skip_class(class);
        (run > 0).then(|| self.source[start..start + run].iter().collect())
    }

    /// Lexes a run of ASCII decimal digits as an `i32`, or returns `default`
    /// without moving when no digit is next.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNumber`] if the digits overflow `i32`. The digits are
    /// consumed.
    pub fn integer(&mut self, default: i32) -> Result<i32> {
        let start = self.position;
        match self.substring(&DIGITS) {
            Some(digits) => digits
                .parse()
                .map_err(|err| Error::InvalidNumber(format!("{digits:?} at offset {start}: {err}"))),
            None => Ok(default),
        }
    }

    /// Records the position. A later [`reset`](Self::reset) returns to it;
    /// the mark survives the reset.
    pub fn mark(&mut self) {
        self.mark = Some(self.position);
    }

    /// Returns to the mark.
    ///
    /// # Errors
    ///
    /// [`Error::NoMark`] if no mark is set.
    pub fn reset(&mut self) -> Result<()> {
        self.position = self.mark.ok_or(Error::NoMark)?;
        Ok(())
    }

    /// Returns to the start and discards the mark.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.mark = None;
    }
}

impl FromStr for CharReader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}
