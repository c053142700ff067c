//! Reader status decoding
//!
//! The status frame carries one bitfield byte:
//!
//! ```text
//! Bit 0: RAM error
//! Bit 1: not used
//! Bit 2: activated, waiting for a card
//! Bit 3: wrong read (double-read mismatch)
//! Bit 4: wrong clock count
//! Bits 5-7: not used
//! ```

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Raw status bitfield as transmitted by the reader
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const RAM_ERROR   = 1 << 0;
        const WAITING     = 1 << 2;
        const WRONG_READ  = 1 << 3;
        const WRONG_CLOCK = 1 << 4;
    }
}

/// Condition reported by one status query
///
/// Exactly one condition is reported per query. [`DeviceStatus::Error`] is
/// the host-side sentinel for a transport or checksum failure, never a bit
/// the reader sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// No fault bits set
    Ok,

    /// Reader RAM self-test failed
    RamError,

    /// Reader is armed and waiting for a swipe
    Waiting,

    /// The two passes of a double read disagreed
    WrongRead,

    /// Track clock count did not match the configured value
    WrongClock,

    /// The status exchange itself failed
    Error,
}

impl DeviceStatus {
    /// Decode the status byte, reporting the highest-priority set bit
    pub fn from_byte(byte: u8) -> Self {
        let flags = StatusFlags::from_bits_truncate(byte);

        if flags.contains(StatusFlags::RAM_ERROR) {
            Self::RamError
        } else if flags.contains(StatusFlags::WAITING) {
            Self::Waiting
        } else if flags.contains(StatusFlags::WRONG_READ) {
            Self::WrongRead
        } else if flags.contains(StatusFlags::WRONG_CLOCK) {
            Self::WrongClock
        } else {
            Self::Ok
        }
    }

    /// True unless the query reported a fault or failed outright
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok | Self::Waiting)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ok => "ok",
            Self::RamError => "RAM error",
            Self::Waiting => "waiting for card",
            Self::WrongRead => "wrong read",
            Self::WrongClock => "wrong clock count",
            Self::Error => "status exchange failed",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clear_byte_is_ok() {
        assert_eq!(DeviceStatus::from_byte(0b0000_0000), DeviceStatus::Ok);
    }

    #[test]
    fn single_bits() {
        assert_eq!(DeviceStatus::from_byte(0b0000_0001), DeviceStatus::RamError);
        assert_eq!(DeviceStatus::from_byte(0b0000_0100), DeviceStatus::Waiting);
        assert_eq!(DeviceStatus::from_byte(0b0000_1000), DeviceStatus::WrongRead);
        assert_eq!(DeviceStatus::from_byte(0b0001_0000), DeviceStatus::WrongClock);
    }

    #[test]
    fn unused_bits_are_ignored() {
        assert_eq!(DeviceStatus::from_byte(0b1110_0010), DeviceStatus::Ok);
    }

    #[test]
    fn ram_error_outranks_other_bits() {
        assert_eq!(DeviceStatus::from_byte(0b0001_0101), DeviceStatus::RamError);
    }

    #[test]
    fn waiting_outranks_read_faults() {
        assert_eq!(DeviceStatus::from_byte(0b0001_1100), DeviceStatus::Waiting);
    }

    #[test]
    fn health_predicate() {
        assert!(DeviceStatus::Ok.is_ok());
        assert!(DeviceStatus::Waiting.is_ok());
        assert!(!DeviceStatus::WrongRead.is_ok());
        assert!(!DeviceStatus::Error.is_ok());
    }
}
