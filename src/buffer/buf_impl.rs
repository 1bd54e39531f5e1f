//! `bytes::Buf` integration for decoders written against the `bytes` traits.

use bytes::Buf;

use super::Buffer;

impl Buf for Buffer<'_> {
    fn remaining(&self) -> usize {
        self.bytes_available_to_read()
    }

    fn chunk(&self) -> &[u8] {
        self.unread()
    }

    /// Moves the read cursor forward.
    ///
    /// # Panics
    ///
    /// Panics if `cnt` exceeds the unread length, as the `Buf` contract requires.
    fn advance(&mut self, cnt: usize) {
        let remaining = self.bytes_available_to_read();
        assert!(
            cnt <= remaining,
            "cannot advance past end of buffer: {} > {}",
            cnt,
            remaining
        );
        self.consume(cnt);
    }
}
