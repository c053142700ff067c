//! LOHS frame construction and validation

use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, BytesMut};

use crate::{
    checksum::{self, ChecksumFn},
    constants::{ETX, MAX_OPCODE_SIZE, MIN_FRAME_SIZE, STX, TRAILER_SIZE},
    error::{Error, Result},
};

/// Frame codec for the LOHS wire format
///
/// # Frame Structure
///
/// ```text
/// ┌─────────┬──────────────┬─────────┬─────────┬─────────┐
/// │   STX   │ opcode bytes │   ETX   │  crc hi │  crc lo │
/// │  1 byte │    0..=32    │  1 byte │  1 byte │  1 byte │
/// └─────────┴──────────────┴─────────┴─────────┴─────────┘
/// ```
///
/// The checksum covers everything before the two-byte trailer, delimiters
/// included, and is appended most-significant byte first. Both directions
/// of the protocol use the same coverage.
///
/// # Examples
///
/// ```
/// use lohs_core::FrameCodec;
///
/// let codec = FrameCodec::new();
/// let frame = codec.encode(&[0x06, 0x00]).unwrap();
/// assert_eq!(codec.verify(&frame).unwrap(), &[0x06, 0x00]);
/// ```
#[derive(Clone, Copy)]
pub struct FrameCodec {
    checksum: ChecksumFn,
    max_opcode: usize,
}

impl FrameCodec {
    /// Create a codec with the default checksum and opcode length limit
    pub fn new() -> Self {
        Self {
            checksum: checksum::block_crc16,
            max_opcode: MAX_OPCODE_SIZE,
        }
    }

    /// Replace the block-checksum function
    ///
    /// The checksum algorithm is a property of the device firmware; readers
    /// with a different polynomial plug it in here.
    pub fn with_checksum(mut self, checksum: ChecksumFn) -> Self {
        self.checksum = checksum;
        self
    }

    /// Replace the maximum accepted opcode sequence length
    pub fn with_max_opcode(mut self, max_opcode: usize) -> Self {
        self.max_opcode = max_opcode;
        self
    }

    /// Build the wire frame for an opcode sequence
    ///
    /// # Errors
    ///
    /// Fails only with [`Error::PayloadTooLarge`] when the opcode sequence
    /// exceeds the codec's opcode length limit.
    pub fn encode(&self, opcode: &[u8]) -> Result<BytesMut> {
        if opcode.len() > self.max_opcode {
            return Err(Error::PayloadTooLarge {
                size: opcode.len(),
                max: self.max_opcode,
            });
        }

        let mut buf = BytesMut::with_capacity(opcode.len() + MIN_FRAME_SIZE);
        buf.put_u8(STX);
        buf.put_slice(opcode);
        buf.put_u8(ETX);

        // Trailer: high byte first
        let crc = (self.checksum)(&buf);
        buf.put_u16(crc);

        Ok(buf)
    }

    /// Validate a received frame and return the opcode bytes between the
    /// delimiters
    ///
    /// Recomputes the checksum over everything before the trailer and
    /// compares it against the received big-endian trailer value.
    ///
    /// # Errors
    ///
    /// A [`Error::ChecksumMismatch`] is data, not a fault: the caller answers
    /// the device with a NACK and reports a failed result.
    pub fn verify<'a>(&self, raw: &'a [u8]) -> Result<&'a [u8]> {
        if raw.len() < MIN_FRAME_SIZE {
            return Err(Error::FrameTooShort {
                expected: MIN_FRAME_SIZE,
                actual: raw.len(),
            });
        }

        let (body, trailer) = raw.split_at(raw.len() - TRAILER_SIZE);

        if body[0] != STX {
            return Err(Error::BadDelimiter {
                offset: 0,
                value: body[0],
            });
        }
        let etx_at = body.len() - 1;
        if body[etx_at] != ETX {
            return Err(Error::BadDelimiter {
                offset: etx_at,
                value: body[etx_at],
            });
        }

        let expected = (self.checksum)(body);
        let received = BigEndian::read_u16(trailer);
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        Ok(&body[1..etx_at])
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCodec")
            .field("max_opcode", &self.max_opcode)
            .finish_non_exhaustive()
    }
}
