//! Exclusive-access message device with a three-opcode control interface.
//!
//! msgdev models a single shared byte-buffer device: one client session at
//! a time opens it for streaming reads and writes, while a closed set of
//! control calls — set message, get message, get nth byte — reaches the
//! same buffer out of band.
//!
//! # Crate Structure
//!
//! - [`device`] — Message buffer, session lock, device, and registry
//! - [`control`] — Opcode set and control dispatcher
//! - [`client`] — Client library over a resolved device handle

/// Re-export device types.
pub mod device {
    pub use msgdev_device::*;
}

/// Re-export control types.
pub mod control {
    pub use msgdev_control::*;
}

/// Re-export client types.
pub mod client {
    pub use msgdev_client::*;
}
