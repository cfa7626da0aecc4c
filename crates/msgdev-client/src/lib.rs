//! Client library for the message device.
//!
//! This is the "just works" layer: resolve the device by its well-known
//! name, then issue control calls and stream reads/writes against the
//! handle. Errors come back as values — deciding whether a failure is
//! fatal belongs to the program driving the client, not to this crate.

pub mod client;
pub mod error;

pub use client::{DeviceClient, DEST_CAPACITY};
pub use error::{ClientError, Result};
