use std::fmt;

use msgdev_client::ClientError;
use msgdev_control::ControlError;
use msgdev_device::DeviceError;

// Exit code constants for the msgdev CLI.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
/// Legacy driver contract: the fixed call sequence exits -1 on the first
/// failed call.
pub const DRIVER_FAILURE: i32 = -1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    let code = match err {
        DeviceError::Busy => FAILURE,
        DeviceError::OutOfRange { .. } => DATA_INVALID,
        DeviceError::AlreadyRegistered(_) => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn control_error(context: &str, err: ControlError) -> CliError {
    match err {
        ControlError::Device(err) => device_error(context, err),
        ControlError::UnknownOpcode(_) => CliError::new(USAGE, format!("{context}: {err}")),
    }
}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    match err {
        ClientError::Device(err) => device_error(context, err),
        ClientError::Control(err) => control_error(context, err),
        ClientError::UnknownDevice(_) => CliError::new(USAGE, format!("{context}: {err}")),
    }
}
