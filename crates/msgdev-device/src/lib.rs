//! Exclusive-access message-buffer device.
//!
//! One fixed-capacity byte buffer, one session lock. A single client at a
//! time opens the device for streaming reads and writes; control calls reach
//! the same buffer without a session (see the `msgdev-control` crate). Every
//! buffer access takes the same internal mutex, so the two paths cannot race.
//!
//! This is the lowest layer of msgdev. Everything else builds on top of
//! the [`Device`] type provided here.

pub mod buffer;
pub mod device;
pub mod error;
pub mod registry;

pub use buffer::{MessageBuffer, CAPACITY, TERMINATOR};
pub use device::{Device, Session};
pub use error::{DeviceError, Result};
pub use registry::{DeviceRegistry, DEVICE_NAME};
