use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A read asked for more bytes than the source holds.
    InsufficientData,
    /// Malformed input: bad digits, bad bounds, empty required sources.
    InvalidArgument,
    /// The underlying reader, writer, or filesystem failed.
    Resource,
    /// The operation is not valid in the current state of the receiver.
    IllegalState,
}

/// Errors produced by buffers, codecs, and readers in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A fixed-width read found fewer bytes than it needs.
    #[error("insufficient data: {needed} bytes needed, {available} available")]
    InsufficientData { needed: usize, available: usize },
    /// A sized source ended before its recorded length.
    #[error("source truncated while reading: expected {expected} bytes, read {actual}")]
    Truncated { expected: usize, actual: usize },
    /// A source too large to hold in one buffer.
    #[error("source of {len} bytes is too large for a single buffer")]
    TooLarge { len: u64 },

    /// A character outside `[0-9a-fA-F]` in hex input.
    #[error("not hex: invalid character {found:?} at index {index}")]
    NotHex { index: usize, found: char },
    /// An offset/length pair that does not fit the target.
    #[error("range {offset}+{len} out of bounds for length {size}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },
    /// A char reader position change that leaves `[0, limit]`.
    #[error("cannot move {delta} from position {position}: limit is {limit}")]
    PositionOutOfRange {
        position: usize,
        delta: isize,
        limit: usize,
    },
    /// A constructor was given an empty required source.
    #[error("source must not be empty")]
    EmptySource,
    /// A lexed number could not be represented.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    /// An option string did not name a known value.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Failure of the underlying reader, writer, or filesystem.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer was destroyed.
    #[error("buffer has been destroyed")]
    Destroyed,
    /// `unread` without a preceding read.
    #[error("each unread must follow a read")]
    UnreadWithoutRead,
    /// `unread_n` past the start of consumed data.
    #[error("cannot unread {requested} bytes, only {consumed} consumed")]
    UnreadUnderflow { requested: usize, consumed: usize },
    /// `unread` on a drained buffer that forbids reopening.
    #[error("unread refused: buffer is drained and reopening at end is disabled")]
    ReopenAtEnd,
    /// `reset` without a prior `mark`.
    #[error("reset without mark")]
    NoMark,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InsufficientData { .. } | Error::Truncated { .. } => ErrorKind::InsufficientData,
            Error::NotHex { .. }
            | Error::OutOfBounds { .. }
            | Error::PositionOutOfRange { .. }
            | Error::EmptySource
            | Error::TooLarge { .. }
            | Error::InvalidNumber(_)
            | Error::InvalidOption(_) => ErrorKind::InvalidArgument,
            Error::Io(_) => ErrorKind::Resource,
            Error::Destroyed
            | Error::UnreadWithoutRead
            | Error::UnreadUnderflow { .. }
            | Error::ReopenAtEnd
            | Error::NoMark => ErrorKind::IllegalState,
        }
    }

    pub(crate) fn check_range(offset: usize, len: usize, size: usize) -> Result<(), Error> {
        match offset.checked_add(len) {
            Some(end) if end <= size => Ok(()),
            _ => Err(Error::OutOfBounds { offset, len, size }),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(io) => io,
            Error::InsufficientData { .. } | Error::Truncated { .. } => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, err)
            }
            other => match other.kind() {
                ErrorKind::InvalidArgument => {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, other)
                }
                _ => std::io::Error::other(other),
            },
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
