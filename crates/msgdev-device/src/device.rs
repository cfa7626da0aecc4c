use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tracing::debug;

use crate::buffer::{MessageBuffer, CAPACITY};
use crate::error::{DeviceError, Result};

/// The exclusive-access message-buffer device.
///
/// Composes one [`MessageBuffer`] with a session lock. Constructed
/// explicitly (typically once, at registration) and shared via `Arc`;
/// destroyed when the last handle drops. All callers observe the same
/// buffer — there is no per-session copy.
///
/// The buffer and the open flag live behind a single mutex. Streaming
/// operations and control-path operations both go through it, so a control
/// call issued without a session can never interleave with a stream
/// session mid-copy.
#[derive(Debug)]
pub struct Device {
    state: Mutex<DeviceState>,
    /// Live session grants. Diagnostic only, never consulted for locking.
    usage: AtomicU64,
}

#[derive(Debug)]
struct DeviceState {
    buffer: MessageBuffer,
    open: bool,
}

impl Device {
    /// A fresh device with an empty buffer (terminator at offset 0).
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DeviceState {
                buffer: MessageBuffer::new(),
                open: false,
            }),
            usage: AtomicU64::new(0),
        }
    }

    /// Open an exclusive session.
    ///
    /// Fails with [`DeviceError::Busy`] immediately if a session is already
    /// held — the caller is never queued. On success the read cursor is
    /// rewound to the start of the message. The check-and-acquire happens
    /// under the device mutex, so two racing opens cannot both succeed.
    pub fn open(self: &Arc<Self>) -> Result<Session> {
        let mut state = self.state();
        if state.open {
            return Err(DeviceError::Busy);
        }
        state.open = true;
        state.buffer.rewind();
        drop(state);

        self.usage.fetch_add(1, Ordering::Relaxed);
        debug!("session opened");
        Ok(Session {
            device: Arc::clone(self),
            released: false,
        })
    }

    /// Replace the stored message. Control-path entry point: no session
    /// required, same mutex as the stream channel.
    ///
    /// Returns the number of bytes actually copied, which is less than the
    /// payload length when the payload exceeds capacity (truncation is a
    /// reported condition, not an error).
    pub fn store_message(&self, payload: &[u8]) -> usize {
        let count = self.state().buffer.store(payload);
        debug!(requested = payload.len(), stored = count, "message stored");
        count
    }

    /// Read up to `max` bytes from the live cursor. Control-path entry
    /// point; shares the cursor with the stream channel.
    pub fn read_message(&self, max: usize) -> Bytes {
        self.state().buffer.read(max)
    }

    /// The buffer byte at `index`, bounds-checked.
    pub fn byte_at(&self, index: usize) -> Result<u8> {
        self.state()
            .buffer
            .byte_at(index)
            .ok_or(DeviceError::OutOfRange {
                index,
                capacity: CAPACITY,
            })
    }

    /// Fixed buffer capacity in bytes.
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Current logical message length (terminator offset).
    pub fn message_len(&self) -> usize {
        self.state().buffer.message_len()
    }

    /// Whether a session currently holds the device.
    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// Number of live session grants (0 or 1). Diagnostic only.
    pub fn usage(&self) -> u64 {
        self.usage.load(Ordering::Relaxed)
    }

    fn release(&self) {
        let mut state = self.state();
        state.open = false;
        drop(state);

        self.usage.fetch_sub(1, Ordering::Relaxed);
        debug!("session released");
    }

    fn state(&self) -> MutexGuard<'_, DeviceState> {
        // Buffer state is valid after any partial operation; a poisoned
        // lock carries no torn writes worth refusing.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive-access grant to a [`Device`].
///
/// Only a successful [`Device::open`] produces one, so a close without a
/// matching open is unrepresentable. [`Session::close`] consumes the
/// session; dropping an unclosed session releases the lock the same way.
#[derive(Debug)]
pub struct Session {
    device: Arc<Device>,
    released: bool,
}

impl Session {
    /// Read up to `max` bytes from the cursor; empty at end-of-stream.
    pub fn read(&mut self, max: usize) -> Bytes {
        self.device.read_message(max)
    }

    /// Replace the stored message and rewind the cursor. Returns the
    /// number of bytes copied (capacity-truncating).
    pub fn write(&mut self, payload: &[u8]) -> usize {
        self.device.store_message(payload)
    }

    /// Release the device for the next caller.
    pub fn close(mut self) {
        self.release_once();
    }

    /// The device this session holds.
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.device.release();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release_once();
    }
}
