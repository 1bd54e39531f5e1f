//! membuf
//!
//! Bounds-checked in-memory byte buffer for building and parsing binary
//! messages.
//!
//! A [`Buffer`] covers one contiguous byte region with a read cursor and a
//! write cursor. It is the building block protocol encoders and decoders
//! sit on:
//!
//! - read existing bytes with [`Buffer::fixed_reader`]
//! - write into caller storage with [`Buffer::fixed_writer`]
//! - write into growable storage with [`Buffer::dynamic`]
//!
//! The crate intentionally:
//! - does NOT define a wire format or endianness
//! - does NOT perform I/O
//! - does NOT synchronize access across threads
//!
//! Every operation is checked. A read or write either moves the full
//! amount or fails with a [`BufferError`] and leaves the buffer as it was.
//!
//! # Writing and reading back
//!
//! ```
//! use membuf::{Buffer, BufferError};
//!
//! fn main() -> Result<(), BufferError> {
//!     let mut buf = Buffer::dynamic();
//!     buf.write(b"hello\0")?;
//!
//!     buf.rewind_reader();
//!     let s = buf.read_cstring()?;
//!     assert_eq!(s.to_bytes(), b"hello");
//!     assert_eq!(buf.read_position(), 6);
//!     Ok(())
//! }
//! ```
//!
//! # Fixed storage
//!
//! ```
//! use membuf::{Buffer, BufferError};
//!
//! let mut frame = [0u8; 4];
//! let mut buf = Buffer::fixed_writer(&mut frame);
//!
//! buf.write(b"abc")?;
//! let err = buf.write(b"de").unwrap_err();
//! assert!(err.is_boundary());
//! assert_eq!(buf.written(), b"abc");
//! # Ok::<(), BufferError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;

//
// Public surface (intentionally tiny)
//

pub use buffer::Buffer;
pub use config::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY, GrowthConfig};
pub use error::{BufferError, Result};
