//! Three-opcode control interface for the message device.
//!
//! Control calls are the side channel next to the stream interface: they
//! reach the shared buffer directly, without holding an open session. The
//! opcode set is closed — set message, get message, get nth byte — and
//! unknown opcode numbers are rejected at the dispatch boundary.

pub mod dispatcher;
pub mod error;
pub mod opcode;
pub mod source;

pub use dispatcher::{ControlDispatcher, TRANSFER_CAP};
pub use error::{ControlError, Result};
pub use opcode::Opcode;
pub use source::MessageSource;
