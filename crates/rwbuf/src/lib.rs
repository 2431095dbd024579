//! Growable byte buffers with independent read and write cursors, fixed
//! width big-endian field codecs, hex text, and a character reader for
//! lexers.
//!
//! ```rust
//! use rwbuf::{ByteBuffer, hex};
//!
//! let mut frame = ByteBuffer::new();
//! frame.write2(0x0001).unwrap();
//! frame.write4(5).unwrap();
//! frame.println("hello").unwrap();
//!
//! assert_eq!(
//!     hex::encode(frame.readable().unwrap()),
//!     "00010000000568656c6c6f0d0a"
//! );
//! assert_eq!(frame.read2().unwrap(), 1);
//! assert_eq!(frame.read4().unwrap(), 5);
//! assert_eq!(frame.read_line().unwrap().as_deref(), Some("hello"));
//! ```

#![allow(missing_docs)]

mod byte_buffer;
pub mod char_reader;
pub mod dump;
mod error;
pub mod hex;
pub mod numeric;
mod options;


pub use byte_buffer::{ByteBuffer, Lines};
pub use char_reader::{CharClass, CharReader};
pub use error::{Error, ErrorKind, Result};
pub use options::{BufferOptions, Content, DumpOptions, Offset, TruncationPolicy};
