// src/common/command.rs

//! Command frames sent to the module.
//!
//! Every command is exactly five bytes and starts with `0xFF 0xAA`. Register
//! writes only take effect after an [`Command::Unlock`] and are persisted by
//! [`Command::Save`].

use arrayvec::ArrayVec;
use core::fmt;

use super::register::Register;

/// First two bytes of every command frame.
pub const COMMAND_HEADER: [u8; 2] = [0xFF, 0xAA];
/// Unlock key written after the header.
pub const UNLOCK_KEY: [u8; 3] = [0x69, 0x88, 0xB5];
/// Length of every command frame.
pub const COMMAND_LEN: usize = 5;

/// Encoded command bytes.
pub type CommandBuffer = ArrayVec<u8, COMMAND_LEN>;

/// Represents a command frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Unlock (`FF AA 69 88 B5`) - Opens the register map for writing.
    Unlock,

    /// Write Register (`FF AA reg lo hi`) - Writes a 16-bit value.
    Write { register: u8, value: u16 },

    /// Save (`FF AA 00 00 00`) - Persists the configuration.
    Save,

    /// Read Register (`FF AA 27 reg 00`) - Requests a register dump.
    /// The reply arrives through the normal data stream.
    Read { register: u8 },
}

impl Command {
    /// Convenience constructor for a write to a documented register.
    pub fn write(register: Register, value: u16) -> Self {
        Command::Write { register: register.addr(), value }
    }

    /// Encodes the command into its five wire bytes.
    pub fn format_into(&self) -> CommandBuffer {
        let mut buf = CommandBuffer::new();
        buf.extend(COMMAND_HEADER);
        match *self {
            Command::Unlock => buf.extend(UNLOCK_KEY),
            Command::Write { register, value } => {
                let [lo, hi] = value.to_le_bytes();
                buf.extend([register, lo, hi]);
            }
            Command::Save => buf.extend([Register::Save.addr(), 0x00, 0x00]),
            Command::Read { register } => buf.extend([Register::ReadAddr.addr(), register, 0x00]),
        }
        buf
    }

    /// Only register reads produce a reply; everything else is fire-and-forget.
    pub fn requires_response(&self) -> bool {
        matches!(self, Command::Read { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.format_into().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_command_encoding() {
        assert_eq!(Command::Unlock.format_into().as_slice(), &[0xFF, 0xAA, 0x69, 0x88, 0xB5]);
        assert_eq!(Command::Save.format_into().as_slice(), &[0xFF, 0xAA, 0x00, 0x00, 0x00]);
        assert_eq!(
            Command::write(Register::RRate, 11).format_into().as_slice(),
            &[0xFF, 0xAA, 0x03, 0x0B, 0x00]
        );
        assert_eq!(
            Command::Write { register: 0x05, value: 0x1234 }.format_into().as_slice(),
            &[0xFF, 0xAA, 0x05, 0x34, 0x12]
        );
        assert_eq!(
            Command::Read { register: 0x34 }.format_into().as_slice(),
            &[0xFF, 0xAA, 0x27, 0x34, 0x00]
        );
    }

    #[test]
    fn test_every_command_is_five_bytes() {
        for cmd in [
            Command::Unlock,
            Command::Save,
            Command::write(Register::ManualCali, 0x0004),
            Command::Read { register: 0xFF },
        ] {
            assert!(cmd.format_into().is_full());
        }
    }

    #[test]
    fn test_display_hex_dump() {
        let mut output = HeaplessString::<16>::new();
        write!(output, "{}", Command::write(Register::CaliYaw, 0)).unwrap();
        assert_eq!(output.as_str(), "FF AA 76 00 00");
    }

    #[test]
    fn test_requires_response() {
        assert!(Command::Read { register: 0x3F }.requires_response());
        assert!(!Command::Unlock.requires_response());
        assert!(!Command::Save.requires_response());
        assert!(!Command::write(Register::Baud, 6).requires_response());
    }
}
