//! Block checksum
//!
//! The reader firmware computes a 16-bit checksum over every frame body and
//! the host must answer in kind. The exact polynomial is a property of the
//! device firmware, so the codec takes the checksum as a plain function and
//! ships CRC-16/ARC as the default.

use tracing::trace;

/// Contract for a block checksum: a deterministic 16-bit value over a byte
/// buffer.
pub type ChecksumFn = fn(&[u8]) -> u16;

/// CRC-16/ARC (reflected polynomial 0xA001, zero initial value).
pub fn block_crc16(block: &[u8]) -> u16 {
    let mut crc: u16 = 0;

    for &byte in block {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }

    trace!(
        len = block.len(),
        checksum = format!("0x{:04X}", crc),
        "calculated block checksum"
    );

    crc
}
