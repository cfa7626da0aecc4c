/// Errors that can occur on control calls.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// Device-level failure.
    #[error("device error: {0}")]
    Device(#[from] msgdev_device::DeviceError),

    /// The raw opcode number is not part of the control set.
    #[error("unknown control opcode {0}")]
    UnknownOpcode(u32),
}

pub type Result<T> = std::result::Result<T, ControlError>;
