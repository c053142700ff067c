//! Protocol constants

/// Start-of-text delimiter, first byte of every frame
pub const STX: u8 = 0x02;

/// End-of-text delimiter, last byte before the checksum trailer
pub const ETX: u8 = 0x03;

/// Positive acknowledgment byte (doubles as the short-command class marker)
pub const ACK: u8 = 0x06;

/// Data link escape (reserved by the protocol, never observed on the wire)
pub const DLE: u8 = 0x10;

/// Negative acknowledgment byte
pub const NACK: u8 = 0x15;

/// Checksum trailer length in bytes
pub const TRAILER_SIZE: usize = 2;

/// Smallest well-formed frame: STX + ETX + trailer
pub const MIN_FRAME_SIZE: usize = 4;

/// Maximum opcode sequence length accepted by the codec
pub const MAX_OPCODE_SIZE: usize = 32;

/// Default acknowledgment deadline (seconds)
pub const DEFAULT_ACK_TIMEOUT: u64 = 5;

/// Settle delay after a reset command (seconds)
pub const RESET_SETTLE: u64 = 1;

/// Reply-frame markers (second inner byte of device-originated frames)
pub mod markers {
    /// Status report frame
    pub const STATUS: u8 = 0xF0;

    /// Card data block frame
    pub const CARD_BLOCK: u8 = 0xF1;

    /// Version report frame
    pub const VERSION: u8 = 0xF2;
}

/// Device-originated frame lengths, trailer included
pub mod frame_sizes {
    /// Status report: `<stx><07><F0><status><etx><crc1><crc2>`
    pub const STATUS: usize = 7;

    /// Version report: `<stx><09><F2><model><firm><hard><etx><crc1><crc2>`
    pub const VERSION: usize = 9;
}
