//! The `Buffer` type - a bounds-checked read/write cursor over one byte region.

use std::cell::Cell;
use std::ffi::CStr;
use std::fmt;

use bytes::Bytes;

use super::storage::Storage;
use crate::config::GrowthConfig;
use crate::error::{BufferError, Result};

/// A bounds-checked byte buffer with independent read and write cursors.
///
/// A buffer starts in one of three modes:
///
/// - [`Buffer::fixed_reader`] wraps existing bytes for reading only;
/// - [`Buffer::fixed_writer`] wraps caller storage for writing, never growing past it;
/// - [`Buffer::dynamic`] owns a growable allocation, made on first write.
///
/// The cursors always satisfy `read_position <= bytes_written <= capacity`.
/// Every read and write either transfers the full amount or fails and leaves
/// the buffer untouched.
///
/// Reads take `&self`, so several views returned by [`read_bytes`] or
/// [`read_cstring`] can be held at once. Any `&mut self` call (a write,
/// [`rewind_writer`], [`release`]) ends those borrows, which is exactly when
/// the storage may move.
///
/// [`read_bytes`]: Buffer::read_bytes
/// [`read_cstring`]: Buffer::read_cstring
/// [`rewind_writer`]: Buffer::rewind_writer
/// [`release`]: Buffer::release
///
/// # Example
///
/// ```
/// use membuf::Buffer;
///
/// let mut buf = Buffer::dynamic();
/// buf.write_byte(0x01)?;
/// buf.write(b"key\0")?;
///
/// assert_eq!(buf.read_byte()?, 0x01);
/// assert_eq!(buf.read_cstring()?.to_bytes(), b"key");
/// assert_eq!(buf.bytes_available_to_read(), 0);
/// # Ok::<(), membuf::BufferError>(())
/// ```
pub struct Buffer<'a> {
    storage: Storage<'a>,
    read_pos: Cell<usize>,
    write_pos: usize,
}

impl<'a> Buffer<'a> {
    /// Wraps `data` for reading. All of it is available to read; every
    /// write fails with [`BufferError::ReadOnly`].
    pub fn fixed_reader(data: &'a [u8]) -> Self {
        Self {
            write_pos: data.len(),
            storage: Storage::FixedReader(data),
            read_pos: Cell::new(0),
        }
    }

    /// Wraps `storage` for writing. Capacity is `storage.len()` and never
    /// changes; the caller keeps ownership of the bytes.
    pub fn fixed_writer(storage: &'a mut [u8]) -> Self {
        Self {
            storage: Storage::FixedWriter(storage),
            read_pos: Cell::new(0),
            write_pos: 0,
        }
    }

    /// Returns true if the buffer only wraps data for reading.
    #[inline]
    pub fn is_reader(&self) -> bool {
        self.storage.is_reader()
    }

    /// Returns true if the storage belongs to the caller.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.storage.is_fixed()
    }

    /// Returns the allocated capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the offset of the next byte to read.
    #[inline]
    pub fn read_position(&self) -> usize {
        self.read_pos.get()
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn bytes_available_to_read(&self) -> usize {
        self.write_pos - self.read_pos.get()
    }

    /// Returns how many bytes can be written without growing.
    ///
    /// Always 0 for readers.
    #[inline]
    pub fn bytes_available_to_write(&self) -> usize {
        if self.is_reader() {
            return 0;
        }
        self.storage.len() - self.write_pos
    }

    /// Returns the total number of bytes written (for readers, the length
    /// of the wrapped data).
    #[inline]
    pub fn bytes_written(&self) -> usize {
        self.write_pos
    }

    /// Returns true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.write_pos == 0
    }

    /// Returns the written region, `[0, bytes_written)`.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.storage.as_slice()[..self.write_pos]
    }

    /// Returns the unread region without consuming it.
    #[inline]
    pub fn unread(&self) -> &[u8] {
        &self.storage.as_slice()[self.read_pos.get()..self.write_pos]
    }

    /// Moves the read cursor back to the start.
    ///
    /// Valid in every mode: a writer can re-read what it produced.
    pub fn rewind_reader(&self) {
        self.read_pos.set(0);
    }

    /// Clears both cursors so the storage can be reused without
    /// reallocating. Does nothing for readers.
    pub fn rewind_writer(&mut self) {
        if !self.is_reader() {
            self.read_pos.set(0);
            self.write_pos = 0;
        }
    }

    /// Frees owned storage and resets the buffer to the empty dynamic state.
    ///
    /// Fixed buffers are left alone: their bytes belong to the caller.
    /// Calling this more than once is harmless.
    pub fn release(&mut self) {
        if self.storage.release() {
            self.read_pos.set(0);
            self.write_pos = 0;
        }
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if nothing is left to read.
    pub fn read_byte(&self) -> Result<u8> {
        let pos = self.read_pos.get();
        if pos >= self.write_pos {
            return Err(BufferError::Underflow {
                requested: 1,
                available: 0,
            });
        }

        self.read_pos.set(pos + 1);
        Ok(self.storage.as_slice()[pos])
    }

    /// Reads `len` bytes as a view into the buffer (no copy).
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if fewer than `len` bytes are unread. The
    /// read cursor does not move.
    pub fn read_bytes(&self, len: usize) -> Result<&[u8]> {
        let available = self.bytes_available_to_read();
        if len > available {
            return Err(BufferError::Underflow {
                requested: len,
                available,
            });
        }

        let start = self.read_pos.get();
        self.read_pos.set(start + len);
        Ok(&self.storage.as_slice()[start..start + len])
    }

    /// Reads a NUL-terminated string from the unread region.
    ///
    /// The returned view excludes the terminator; the read cursor moves
    /// past it.
    ///
    /// # Errors
    ///
    /// [`BufferError::Unterminated`] if no NUL byte occurs before the write
    /// cursor. The read cursor does not move.
    pub fn read_cstring(&self) -> Result<&CStr> {
        let unread = self.unread();
        let s = CStr::from_bytes_until_nul(unread).map_err(|_| BufferError::Unterminated {
            available: unread.len(),
        })?;
        self.read_pos
            .set(self.read_pos.get() + s.to_bytes_with_nul().len());
        Ok(s)
    }

    /// Grows storage so at least `extra` bytes fit after the write cursor.
    ///
    /// Only dynamic buffers grow. Capacity at least doubles on each
    /// reallocation, so repeated small writes cost amortized linear time.
    /// Fixed buffers always refuse, even with free space left.
    ///
    /// # Errors
    ///
    /// - [`BufferError::ReadOnly`] for readers
    /// - [`BufferError::NoRoom`] for fixed writers, or if growth would pass
    ///   the configured maximum or the address space
    /// - [`BufferError::AllocationFailed`] if the allocator refuses
    pub fn make_room(&mut self, extra: usize) -> Result<()> {
        self.storage.make_room(self.write_pos, extra)
    }

    /// Writes one byte, growing if needed.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::make_room`].
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write(&[value])
    }

    /// Appends `data`, growing if needed.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::make_room`]. Nothing is written on failure.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.reserve_slot(data.len())?.copy_from_slice(data);
        self.write_pos += data.len();
        Ok(())
    }

    /// Appends the whole written region of `src`, leaving `src` untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::write`].
    pub fn write_raw_buffer(&mut self, src: &Buffer<'_>) -> Result<()> {
        self.write(src.written())
    }

    /// Appends `len` copies of `value`.
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::write`].
    pub fn fill(&mut self, value: u8, len: usize) -> Result<()> {
        self.reserve_slot(len)?.fill(value);
        self.write_pos += len;
        Ok(())
    }

    /// Consumes the buffer and returns its written region.
    ///
    /// Dynamic storage is handed over without copying; fixed storage is
    /// copied since the caller still owns it.
    pub fn into_bytes(self) -> Bytes {
        match self.storage {
            Storage::Dynamic { mut data, .. } => {
                data.truncate(self.write_pos);
                Bytes::from(data)
            }
            Storage::FixedReader(data) => Bytes::copy_from_slice(&data[..self.write_pos]),
            Storage::FixedWriter(data) => Bytes::copy_from_slice(&data[..self.write_pos]),
        }
    }

    /// Grows as needed and returns the `len` bytes after the write cursor.
    fn reserve_slot(&mut self, len: usize) -> Result<&mut [u8]> {
        if self.bytes_available_to_write() < len {
            self.make_room(len)?;
        }
        let start = self.write_pos;
        let slot = self
            .storage
            .as_mut_slice()
            .ok_or(BufferError::ReadOnly)?;
        Ok(&mut slot[start..start + len])
    }

    /// Moves the read cursor; the caller has checked `cnt` against the unread length.
    pub(super) fn consume(&mut self, cnt: usize) {
        self.read_pos.set(self.read_pos.get() + cnt);
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.read_pos.get() <= self.write_pos);
        assert!(self.write_pos <= self.storage.len());
    }
}

impl Buffer<'static> {
    /// Creates an empty growable writer. Nothing is allocated until the
    /// first write.
    pub fn dynamic() -> Self {
        Self::dynamic_with_config(GrowthConfig::default())
    }

    /// Creates an empty growable writer with custom growth limits.
    pub fn dynamic_with_config(config: GrowthConfig) -> Self {
        Self {
            storage: Storage::dynamic(config),
            read_pos: Cell::new(0),
            write_pos: 0,
        }
    }
}

impl Default for Buffer<'static> {
    fn default() -> Self {
        Self::dynamic()
    }
}

impl fmt::Debug for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("mode", &self.storage.mode_name())
            .field("read_pos", &self.read_pos.get())
            .field("write_pos", &self.write_pos)
            .field("capacity", &self.capacity())
            .finish()
    }
}
