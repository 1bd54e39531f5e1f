//! The bounds-checked buffer.
//!
//! Storage modes live in `storage`, the cursor logic in `cursor`, and the
//! `bytes::Buf` integration in `buf_impl`.

mod buf_impl;
mod cursor;
mod storage;

pub use cursor::Buffer;
