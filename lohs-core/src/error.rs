//! Error types for lohs-core

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Received buffer cannot hold delimiters plus trailer
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort { expected: usize, actual: usize },

    /// A delimiter byte is not where the frame layout puts it
    #[error("Bad delimiter at offset {offset}: 0x{value:02X}")]
    BadDelimiter { offset: usize, value: u8 },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch { expected: u16, received: u16 },

    /// Opcode sequence exceeds the codec's length limit
    #[error("Opcode sequence too long: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },
}

impl Error {
    /// Checksum mismatches are recoverable: the host answers with a NACK and
    /// the reader retransmits.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}
