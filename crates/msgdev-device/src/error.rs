/// Errors that can occur on device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Another session already holds the device.
    #[error("device busy: an exclusive session is already open")]
    Busy,

    /// A byte index fell outside the buffer capacity.
    #[error("index {index} out of range (capacity {capacity})")]
    OutOfRange { index: usize, capacity: usize },

    /// A device is already registered under this name.
    #[error("device {0:?} is already registered")]
    AlreadyRegistered(String),
}

pub type Result<T> = std::result::Result<T, DeviceError>;
