use bytes::{BufMut, Bytes, BytesMut};

/// Maximum message length in bytes, terminator included.
pub const CAPACITY: usize = 80;

/// Zero byte marking the logical end of a message.
pub const TERMINATOR: u8 = 0;

/// Fixed-capacity message storage with a read cursor.
///
/// Holds one logical message: data bytes followed by a terminator byte,
/// total length at most [`CAPACITY`]. A terminator exists within the first
/// [`CAPACITY`] bytes after every store, so reads always stop.
///
/// The cursor tracks streaming read position only; stores rewind it.
#[derive(Debug)]
pub struct MessageBuffer {
    data: [u8; CAPACITY],
    cursor: usize,
}

impl MessageBuffer {
    /// An empty buffer: terminator at offset 0, cursor at the start.
    pub fn new() -> Self {
        Self {
            data: [TERMINATOR; CAPACITY],
            cursor: 0,
        }
    }

    /// Replace the stored message with `payload`, truncating to
    /// `CAPACITY - 1` data bytes so the terminator always fits.
    ///
    /// Every byte beyond the copied region is zero-filled. That places the
    /// terminator and destroys any stale tail left by a longer previous
    /// message. Rewinds the cursor. Returns the number of bytes copied;
    /// oversize input is truncated, not an error.
    pub fn store(&mut self, payload: &[u8]) -> usize {
        let count = payload.len().min(CAPACITY - 1);
        self.data[..count].copy_from_slice(&payload[..count]);
        self.data[count..].fill(TERMINATOR);
        self.cursor = 0;
        count
    }

    /// Read up to `max` bytes from the cursor, stopping at the terminator.
    ///
    /// Returns an empty result at end-of-stream (cursor on the terminator).
    /// The terminator itself is never copied out. Advances the cursor by
    /// the number of bytes returned; content is untouched.
    pub fn read(&mut self, max: usize) -> Bytes {
        if self.data[self.cursor] == TERMINATOR {
            return Bytes::new();
        }

        let mut out = BytesMut::with_capacity(max.min(CAPACITY));
        while out.len() < max && self.data[self.cursor] != TERMINATOR {
            out.put_u8(self.data[self.cursor]);
            self.cursor += 1;
        }
        out.freeze()
    }

    /// The byte at `index`, or `None` outside the buffer.
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Offset of the terminator, i.e. the logical message length.
    pub fn message_len(&self) -> usize {
        self.data
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(CAPACITY)
    }

    /// Reset the cursor to the start of the message.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(buffer: &mut MessageBuffer, chunk: usize) -> Vec<u8> {
        let mut out = Vec::new();
        loop {
            let bytes = buffer.read(chunk);
            if bytes.is_empty() {
                return out;
            }
            out.extend_from_slice(&bytes);
        }
    }

    #[test]
    fn store_then_drain_yields_exact_message() {
        let mut buffer = MessageBuffer::new();
        let count = buffer.store(b"hello\n");

        assert_eq!(count, 6);
        assert_eq!(drain(&mut buffer, 4), b"hello\n");
        assert!(buffer.read(16).is_empty(), "drained buffer is end-of-stream");
    }

    #[test]
    fn empty_buffer_reads_empty() {
        let mut buffer = MessageBuffer::new();
        assert!(buffer.read(16).is_empty());
        assert_eq!(buffer.message_len(), 0);
    }

    #[test]
    fn read_respects_max_and_resumes_at_cursor() {
        let mut buffer = MessageBuffer::new();
        buffer.store(b"abcdef");

        assert_eq!(buffer.read(2).as_ref(), b"ab");
        assert_eq!(buffer.read(3).as_ref(), b"cde");
        assert_eq!(buffer.read(10).as_ref(), b"f");
        assert!(buffer.read(10).is_empty());
    }

    #[test]
    fn oversize_store_truncates_to_capacity_minus_one() {
        let mut buffer = MessageBuffer::new();
        let payload = vec![b'x'; CAPACITY + 20];
        let count = buffer.store(&payload);

        assert_eq!(count, CAPACITY - 1);
        assert_eq!(buffer.message_len(), CAPACITY - 1);
        assert_eq!(drain(&mut buffer, 32).len(), CAPACITY - 1);
    }

    #[test]
    fn exact_fit_store_keeps_terminator_in_bounds() {
        let mut buffer = MessageBuffer::new();
        let payload = vec![b'y'; CAPACITY - 1];
        let count = buffer.store(&payload);

        assert_eq!(count, CAPACITY - 1);
        assert_eq!(buffer.byte_at(CAPACITY - 1), Some(TERMINATOR));
    }

    #[test]
    fn shorter_rewrite_leaves_no_stale_tail() {
        let mut buffer = MessageBuffer::new();
        buffer.store(b"a much longer message than the second one");
        buffer.store(b"short");

        assert_eq!(drain(&mut buffer, 8), b"short");
        // The old tail must be gone byte-for-byte, not just unread.
        for index in 5..CAPACITY {
            assert_eq!(buffer.byte_at(index), Some(TERMINATOR));
        }
    }

    #[test]
    fn store_rewinds_the_cursor() {
        let mut buffer = MessageBuffer::new();
        buffer.store(b"first");
        assert_eq!(buffer.read(3).as_ref(), b"fir");

        buffer.store(b"second");
        assert_eq!(drain(&mut buffer, 16), b"second");
    }

    #[test]
    fn byte_at_is_bounded() {
        let buffer = MessageBuffer::new();
        assert_eq!(buffer.byte_at(0), Some(TERMINATOR));
        assert_eq!(buffer.byte_at(CAPACITY - 1), Some(TERMINATOR));
        assert_eq!(buffer.byte_at(CAPACITY), None);
    }

    #[test]
    fn rewind_replays_the_message() {
        let mut buffer = MessageBuffer::new();
        buffer.store(b"replay");
        assert_eq!(drain(&mut buffer, 16), b"replay");

        buffer.rewind();
        assert_eq!(drain(&mut buffer, 16), b"replay");
    }
}
