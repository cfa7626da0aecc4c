use std::sync::Arc;

use tracing::debug;

use msgdev_control::ControlDispatcher;
use msgdev_device::{Device, DeviceRegistry, Session, TERMINATOR};

use crate::error::{ClientError, Result};

/// Local destination capacity for [`DeviceClient::get_message`], one byte
/// above the control transfer cap so a full transfer plus terminator fits.
pub const DEST_CAPACITY: usize = 100;

/// Thin wrapper issuing control calls and stream operations against a
/// resolved device handle.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    device: Arc<Device>,
    control: ControlDispatcher,
}

impl DeviceClient {
    /// Wrap an explicit device handle.
    pub fn new(device: Arc<Device>) -> Self {
        let control = ControlDispatcher::new(Arc::clone(&device));
        Self { device, control }
    }

    /// Resolve a device from `registry` by name — normally
    /// [`msgdev_device::DEVICE_NAME`], the identifier both sides agree on.
    pub fn resolve(registry: &DeviceRegistry, name: &str) -> Result<Self> {
        let device = registry
            .resolve(name)
            .ok_or_else(|| ClientError::UnknownDevice(name.to_string()))?;
        debug!(name, "device resolved");
        Ok(Self::new(device))
    }

    /// Open an exclusive stream session. Fails with `Busy` while another
    /// session is held.
    pub fn open(&self) -> Result<Session> {
        Ok(self.device.open()?)
    }

    /// Issue SET_MESSAGE with `text` as the external source. Returns the
    /// stored byte count (capacity-truncating).
    pub fn set_message(&self, text: &str) -> Result<usize> {
        Ok(self.control.set_message(text))
    }

    /// Issue GET_MESSAGE into a local destination and return the delivered
    /// text.
    pub fn get_message(&self) -> Result<String> {
        let mut dest = [0u8; DEST_CAPACITY];
        let count = self.control.get_message(&mut dest);
        Ok(String::from_utf8_lossy(&dest[..count]).into_owned())
    }

    /// Issue a single GET_NTH_BYTE call.
    pub fn nth_byte(&self, index: usize) -> Result<u8> {
        Ok(self.control.nth_byte(index)?)
    }

    /// Reconstruct the message one GET_NTH_BYTE call at a time.
    ///
    /// Indexes up from zero, accumulating bytes until the device returns
    /// the terminator. This is the client's own length discovery, separate
    /// from the dispatcher's SET_MESSAGE-side scan. Any error aborts the
    /// loop and propagates.
    pub fn get_nth_byte(&self) -> Result<String> {
        let mut acc = Vec::new();
        for index in 0.. {
            let byte = self.nth_byte(index)?;
            if byte == TERMINATOR {
                break;
            }
            acc.push(byte);
        }
        Ok(String::from_utf8_lossy(&acc).into_owned())
    }

    /// The underlying device handle.
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use msgdev_device::{DeviceError, DEVICE_NAME};

    use super::*;

    fn client() -> DeviceClient {
        DeviceClient::new(Arc::new(Device::new()))
    }

    #[test]
    fn resolve_by_well_known_name() {
        let registry = DeviceRegistry::new();
        registry
            .register(DEVICE_NAME, Arc::new(Device::new()))
            .expect("registration should succeed");

        let client =
            DeviceClient::resolve(&registry, DEVICE_NAME).expect("resolution should succeed");
        assert_eq!(client.device().message_len(), 0);
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let registry = DeviceRegistry::new();
        let err = DeviceClient::resolve(&registry, "absent").expect_err("resolve should fail");
        assert!(matches!(err, ClientError::UnknownDevice(name) if name == "absent"));
    }

    #[test]
    fn set_and_get_message_roundtrip() {
        let client = client();
        let stored = client.set_message("hello\n").expect("set should succeed");
        assert_eq!(stored, 6);

        let delivered = client.get_message().expect("get should succeed");
        assert_eq!(delivered, "hello\n");
    }

    #[test]
    fn get_nth_byte_matches_a_full_stream_read() {
        let client = client();
        client
            .set_message("byte-for-byte identical")
            .expect("set should succeed");

        let reconstructed = client.get_nth_byte().expect("discovery should succeed");

        let mut session = client.open().expect("open should succeed");
        let mut streamed = Vec::new();
        loop {
            let chunk = session.read(16);
            if chunk.is_empty() {
                break;
            }
            streamed.extend_from_slice(&chunk);
        }
        session.close();

        assert_eq!(reconstructed.as_bytes(), streamed.as_slice());
    }

    #[test]
    fn get_nth_byte_on_empty_device_is_empty() {
        let client = client();
        assert_eq!(client.get_nth_byte().expect("discovery should succeed"), "");
    }

    #[test]
    fn open_propagates_busy() {
        let client = client();
        let _held = client.open().expect("first open should succeed");

        let err = client.open().expect_err("second open should fail");
        assert!(matches!(err, ClientError::Device(DeviceError::Busy)));
    }

    #[test]
    fn nth_byte_error_aborts_discovery() {
        let client = client();
        // Out-of-range access surfaces as an error rather than a byte.
        let err = client
            .nth_byte(client.device().capacity())
            .expect_err("out-of-range index should fail");
        assert!(matches!(err, ClientError::Control(_)));
    }
}
