use core::{fmt, str::FromStr};

use crate::error::Error;

/// Configuration options for a [`ByteBuffer`](crate::ByteBuffer).
///
/// These options control how the backing storage grows, whether a drained
/// buffer may be reopened by `unread`, and the chunk sizes used by the bulk
/// transfer operations.
///
/// # Examples
///
/// ```rust
/// use rwbuf::{BufferOptions, ByteBuffer};
///
/// let options = BufferOptions {
///     growth_factor: 64,
///     initial_capacity: 0,
///     ..Default::default()
/// };
/// let mut buf = ByteBuffer::with_options(options);
/// buf.write4(0xCAFE_F00D).unwrap();
/// assert_eq!(buf.available(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BufferOptions {
    /// Minimum number of bytes added to the backing storage whenever a write
    /// does not fit.
    ///
    /// A write that needs more than this grows the storage by what it needs.
    /// Zero is permitted and behaves as one.
    ///
    /// # Default
    ///
    /// `512`
    pub growth_factor: usize,

    /// Size of the backing storage allocated by the constructor.
    ///
    /// # Default
    ///
    /// `512`
    pub initial_capacity: usize,

    /// Whether `unread` may step back over the final byte of a fully drained
    /// buffer.
    ///
    /// When `true`, a buffer holding one byte can read and then unread that
    /// byte. When `false`, `unread` is refused once every written byte has
    /// been consumed.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_reopen_at_end: bool,

    /// Chunk size for `read_from` and `write_to` against streams.
    ///
    /// # Default
    ///
    /// `512`
    pub copy_chunk: usize,

    /// Upper bound on the chunk size for `read_from_file`. The chunk is the
    /// smaller of this and the file length.
    ///
    /// # Default
    ///
    /// `4096`
    pub file_chunk: usize,

    /// What `read_from_file` does when the file shrinks while being read.
    ///
    /// # Default
    ///
    /// [`TruncationPolicy::Accept`]
    pub truncation: TruncationPolicy,
}

/// Default growth factor and initial capacity.
pub const DEFAULT_GROWTH: usize = 0x200;

/// Default stream copy chunk.
pub const DEFAULT_COPY_CHUNK: usize = 0x200;

/// Default upper bound of the file read chunk.
pub const DEFAULT_FILE_CHUNK: usize = 0x1000;

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            growth_factor: DEFAULT_GROWTH,
            initial_capacity: DEFAULT_GROWTH,
            allow_reopen_at_end: true,
            copy_chunk: DEFAULT_COPY_CHUNK,
            file_chunk: DEFAULT_FILE_CHUNK,
            truncation: TruncationPolicy::Accept,
        }
    }
}

impl BufferOptions {
    /// Options with `growth_factor` and `initial_capacity` both set to
    /// `growth`.
    #[must_use]
    pub fn with_growth(growth: usize) -> Self {
        Self {
            growth_factor: growth,
            initial_capacity: growth,
            ..Self::default()
        }
    }
}

/// Behaviour of sized reads when the source delivers fewer bytes than its
/// recorded length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TruncationPolicy {
    /// Keep what was read and log a warning.
    #[default]
    Accept,
    /// Fail with [`Error::Truncated`]. Bytes read before the shortfall stay
    /// in the buffer.
    Reject,
}

/// How a dump row labels its starting offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Offset {
    /// Seven digit zero padded decimal.
    Dec,
    /// Eight digit zero padded uppercase hex.
    #[default]
    Hex,
}

/// How a dump renders each byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Content {
    /// Printable ASCII as itself, control characters by name, the rest as
    /// three hex digits.
    #[default]
    Ascii,
    /// Two uppercase hex digits.
    Hex,
}

/// Configuration of the dump [`Printer`](crate::dump::Printer).
///
/// # Default
///
/// Hex offsets with ASCII content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DumpOptions {
    /// Offset column style.
    pub offset: Offset,
    /// Byte column style.
    pub content: Content,
}

impl DumpOptions {
    /// Parses both columns from their names, case-insensitively. `None`
    /// selects the default for that column.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOption`] if a name is not recognised.
    pub fn parse(offset: Option<&str>, content: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            offset: offset.map(str::parse::<Offset>).transpose()?.unwrap_or_default(),
            content: content.map(str::parse::<Content>).transpose()?.unwrap_or_default(),
        })
    }
}

impl FromStr for Offset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("dec") {
            Ok(Offset::Dec)
        } else if s.eq_ignore_ascii_case("hex") {
            Ok(Offset::Hex)
        } else {
            Err(Error::InvalidOption(format!("unknown offset style {s:?}")))
        }
    }
}

impl FromStr for Content {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") || s.eq_ignore_ascii_case("ascii") {
            Ok(Content::Ascii)
        } else if s.eq_ignore_ascii_case("hex") {
            Ok(Content::Hex)
        } else {
            Err(Error::InvalidOption(format!("unknown content style {s:?}")))
        }
    }
}

impl fmt::Display for DumpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = match self.offset {
            Offset::Dec => "DEC",
            Offset::Hex => "HEX",
        };
        let content = match self.content {
            Content::Ascii => "ASC",
            Content::Hex => "HEX",
        };
        write!(f, "offset: {offset}, content: {content}")
    }
}
