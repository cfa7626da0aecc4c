//! Control-call opcodes.
//!
//! The numbering is part of the external contract and must not change.

use crate::error::ControlError;

/// A control operation on the message device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Replace the stored message with caller-supplied bytes.
    SetMessage = 0,
    /// Copy the stored message out to a caller destination.
    GetMessage = 1,
    /// Fetch a single buffer byte by index.
    GetNthByte = 2,
}

impl Opcode {
    /// All opcodes, in contract order.
    pub const ALL: [Opcode; 3] = [Opcode::SetMessage, Opcode::GetMessage, Opcode::GetNthByte];

    /// The wire number of this opcode.
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Human-readable opcode name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::SetMessage => "SET_MESSAGE",
            Opcode::GetMessage => "GET_MESSAGE",
            Opcode::GetNthByte => "GET_NTH_BYTE",
        }
    }
}

impl TryFrom<u32> for Opcode {
    type Error = ControlError;

    /// Resolve a raw opcode number. Unknown numbers are rejected, never
    /// treated as an index into anything.
    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Opcode::SetMessage),
            1 => Ok(Opcode::GetMessage),
            2 => Ok(Opcode::GetNthByte),
            other => Err(ControlError::UnknownOpcode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_numbers_are_the_contract_values() {
        assert_eq!(Opcode::SetMessage.raw(), 0);
        assert_eq!(Opcode::GetMessage.raw(), 1);
        assert_eq!(Opcode::GetNthByte.raw(), 2);
    }

    #[test]
    fn try_from_roundtrips_known_opcodes() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::try_from(op.raw()).expect("known opcode"), op);
        }
    }

    #[test]
    fn try_from_rejects_unknown_numbers() {
        assert!(matches!(
            Opcode::try_from(3),
            Err(ControlError::UnknownOpcode(3))
        ));
        assert!(matches!(
            Opcode::try_from(u32::MAX),
            Err(ControlError::UnknownOpcode(_))
        ));
    }
}
