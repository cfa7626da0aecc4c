use std::sync::Arc;

use tracing::debug;

use msgdev_device::{Device, CAPACITY, TERMINATOR};

use crate::error::Result;
use crate::source::MessageSource;

/// Transfer budget for [`ControlDispatcher::get_message`].
///
/// Deliberately larger than the buffer capacity; it is the observable limit
/// of the legacy control contract. Transfers are additionally capped by the
/// caller's destination length, terminator included, so a short destination
/// is never overrun.
pub const TRANSFER_CAP: usize = 99;

/// Translates control opcodes into device operations.
///
/// The device handle is injected at construction — the dispatcher holds no
/// state of its own and can be cloned freely. None of the control calls
/// require an open session; they take the device mutex directly.
#[derive(Debug, Clone)]
pub struct ControlDispatcher {
    device: Arc<Device>,
}

impl ControlDispatcher {
    pub fn new(device: Arc<Device>) -> Self {
        Self { device }
    }

    /// SET_MESSAGE: discover the source length byte by byte, then store
    /// exactly the discovered span.
    ///
    /// The scan stops at the source's terminator, at exhaustion, or after
    /// `CAPACITY - 1` data bytes — an unterminated source cannot run the
    /// scan past the device's own limit. The terminator is excluded from
    /// the stored span; the store places its own. Returns the stored count.
    pub fn set_message<S: MessageSource + ?Sized>(&self, source: &S) -> usize {
        let mut span = Vec::with_capacity(CAPACITY);
        for offset in 0..CAPACITY - 1 {
            match source.byte_at(offset) {
                Some(TERMINATOR) | None => break,
                Some(byte) => span.push(byte),
            }
        }
        debug!(discovered = span.len(), "set_message");
        self.device.store_message(&span)
    }

    /// GET_MESSAGE: copy from the live read cursor into `dest`, then append
    /// one terminator byte immediately after the copied bytes.
    ///
    /// The transfer is capped at `min(TRANSFER_CAP, dest.len())`, terminator
    /// included. Returns the number of data bytes copied — the count is
    /// surfaced to the caller rather than swallowed at this layer.
    pub fn get_message(&self, dest: &mut [u8]) -> usize {
        let budget = TRANSFER_CAP.min(dest.len());
        if budget == 0 {
            return 0;
        }

        let bytes = self.device.read_message(budget - 1);
        dest[..bytes.len()].copy_from_slice(&bytes);
        dest[bytes.len()] = TERMINATOR;
        debug!(copied = bytes.len(), "get_message");
        bytes.len()
    }

    /// GET_NTH_BYTE: the buffer byte at `index`, returned as the call's
    /// result value. Indices at or beyond capacity are rejected.
    pub fn nth_byte(&self, index: usize) -> Result<u8> {
        Ok(self.device.byte_at(index)?)
    }

    /// The device this dispatcher operates on.
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use msgdev_device::DeviceError;

    use super::*;
    use crate::error::ControlError;

    fn dispatcher() -> ControlDispatcher {
        ControlDispatcher::new(Arc::new(Device::new()))
    }

    /// A source that never terminates: every probe yields the same byte.
    struct Endless(u8);

    impl MessageSource for Endless {
        fn byte_at(&self, _offset: usize) -> Option<u8> {
            Some(self.0)
        }
    }

    #[test]
    fn set_then_get_roundtrips_under_capacity() {
        let control = dispatcher();
        let stored = control.set_message("hello\n");
        assert_eq!(stored, 6);

        let mut dest = [0u8; 100];
        let count = control.get_message(&mut dest);
        assert_eq!(count, 6);
        assert_eq!(&dest[..count], b"hello\n");
        assert_eq!(dest[count], TERMINATOR);
    }

    #[test]
    fn set_message_excludes_the_source_terminator() {
        let control = dispatcher();
        let stored = control.set_message(&b"abc\0trailing"[..]);
        assert_eq!(stored, 3, "scan stops at the embedded terminator");
        assert_eq!(control.device().message_len(), 3);
    }

    #[test]
    fn set_message_caps_an_unterminated_source() {
        let control = dispatcher();
        let stored = control.set_message(&Endless(b'z'));
        assert_eq!(stored, CAPACITY - 1);
        assert_eq!(control.device().message_len(), CAPACITY - 1);
    }

    #[test]
    fn get_message_respects_a_short_destination() {
        let control = dispatcher();
        control.set_message("a fairly long message body");

        let mut dest = [0xAAu8; 8];
        let count = control.get_message(&mut dest);
        assert_eq!(count, 7, "seven data bytes plus the terminator fill dest");
        assert_eq!(&dest[..count], b"a fairl");
        assert_eq!(dest[count], TERMINATOR);
    }

    #[test]
    fn get_message_on_zero_length_destination_copies_nothing() {
        let control = dispatcher();
        control.set_message("ignored");

        let mut dest = [0u8; 0];
        assert_eq!(control.get_message(&mut dest), 0);
    }

    #[test]
    fn get_message_reads_from_the_live_cursor() {
        let control = dispatcher();
        control.set_message("cursor test");

        let mut dest = [0u8; 100];
        assert_eq!(control.get_message(&mut dest), 11);
        // Cursor is drained now; a second transfer delivers end-of-stream.
        assert_eq!(control.get_message(&mut dest), 0);
        assert_eq!(dest[0], TERMINATOR);
    }

    #[test]
    fn nth_byte_walks_the_message() {
        let control = dispatcher();
        control.set_message("walk");

        let mut reconstructed = Vec::new();
        for index in 0.. {
            let byte = control.nth_byte(index).expect("index within capacity");
            if byte == TERMINATOR {
                break;
            }
            reconstructed.push(byte);
        }
        assert_eq!(reconstructed, b"walk");
    }

    #[test]
    fn nth_byte_rejects_indices_at_or_beyond_capacity() {
        let control = dispatcher();
        control.set_message("bounds");

        assert!(control.nth_byte(CAPACITY - 1).is_ok());
        assert!(matches!(
            control.nth_byte(CAPACITY),
            Err(ControlError::Device(DeviceError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn control_calls_need_no_open_session() {
        let control = dispatcher();
        let _session = control
            .device()
            .open()
            .expect("stream session should open");

        // A held stream session does not gate the control path.
        control.set_message("side channel");
        let mut dest = [0u8; 100];
        assert_eq!(control.get_message(&mut dest), 12);
    }
}
