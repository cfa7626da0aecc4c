/// Errors that can occur in client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A control call failed.
    #[error("control call failed: {0}")]
    Control(#[from] msgdev_control::ControlError),

    /// A stream-path device operation failed.
    #[error("device error: {0}")]
    Device(#[from] msgdev_device::DeviceError),

    /// No device is registered under the requested name.
    #[error("no device registered under {0:?}")]
    UnknownDevice(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
