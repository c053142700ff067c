//! Command/response engine
//!
//! One exchange: send a framed command, wait for a single acknowledgment
//! byte within the deadline, classify it. Every LOHS command goes through
//! this same round trip. There is no retry at this layer; retry policy, if
//! any, belongs to the caller.

use std::time::Duration;

use bytes::BytesMut;
use tracing::trace;

use lohs_core::constants::{ACK, NACK};
use lohs_core::FrameCodec;
use lohs_transport::Transport;

use crate::error::{Error, Result};

/// Execute one command round trip
///
/// `Idle → Sending → AwaitingAck → {Acked | Nacked | TimedOut |
/// TransportFailed}`: one terminal outcome per call, no state carried
/// across calls. A short or failed write aborts immediately. After a
/// timeout the transport input is discarded so a late acknowledgment
/// cannot misalign the next exchange.
pub fn execute<T: Transport + ?Sized>(
    transport: &mut T,
    codec: &FrameCodec,
    opcode: &[u8],
    timeout: Duration,
) -> Result<()> {
    let frame = codec.encode(opcode)?;

    trace!(frame = hex::encode(&frame), "TX command frame");
    transport.write(&frame)?;

    match transport.read(1, timeout) {
        Ok(buf) => match buf.first() {
            Some(&ACK) => Ok(()),
            Some(&NACK) => Err(Error::Nacked),
            Some(&other) => Err(Error::ProtocolViolation(other)),
            None => Err(Error::TimedOut),
        },
        Err(lohs_transport::Error::ReadTimeout) => {
            transport.discard_input()?;
            Err(Error::TimedOut)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read exactly `len` bytes, accumulating partial serial reads
///
/// Each read is bounded by `timeout`; a timeout mid-frame discards pending
/// input before surfacing, for the same alignment reason as [`execute`].
pub fn read_exact<T: Transport + ?Sized>(
    transport: &mut T,
    len: usize,
    timeout: Duration,
) -> Result<BytesMut> {
    let mut buf = BytesMut::with_capacity(len);

    while buf.len() < len {
        match transport.read(len - buf.len(), timeout) {
            Ok(chunk) => buf.extend_from_slice(&chunk),
            Err(lohs_transport::Error::ReadTimeout) => {
                transport.discard_input()?;
                return Err(Error::TimedOut);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(buf)
}

/// Answer a device-originated frame with a single ACK or NACK byte
pub fn acknowledge<T: Transport + ?Sized>(transport: &mut T, ok: bool) -> Result<()> {
    let byte = if ok { ACK } else { NACK };

    trace!(byte = format!("0x{byte:02X}"), "TX acknowledgment");
    transport.write(&[byte])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lohs_transport::MockTransport;
    use pretty_assertions::assert_eq;

    const TIMEOUT: Duration = Duration::from_millis(10);

    fn beep_frame() -> BytesMut {
        FrameCodec::new().encode(&[0x06, 0x03]).unwrap()
    }

    #[test]
    fn acked_exchange() {
        let mut mock = MockTransport::new().with_read([ACK]);
        let codec = FrameCodec::new();

        execute(&mut mock, &codec, &[0x06, 0x03], TIMEOUT).unwrap();

        assert_eq!(mock.written(), beep_frame().as_ref());
    }

    #[test]
    fn nacked_exchange() {
        let mut mock = MockTransport::new().with_read([NACK]);
        let codec = FrameCodec::new();

        let result = execute(&mut mock, &codec, &[0x06, 0x03], TIMEOUT);
        assert!(matches!(result, Err(Error::Nacked)));
    }

    #[test]
    fn unexpected_byte_is_a_violation() {
        let mut mock = MockTransport::new().with_read([0x42]);
        let codec = FrameCodec::new();

        let result = execute(&mut mock, &codec, &[0x06, 0x03], TIMEOUT);
        assert!(matches!(result, Err(Error::ProtocolViolation(0x42))));
    }

    #[test]
    fn silent_line_times_out_and_discards() {
        let mut mock = MockTransport::new().with_read_timeout();
        let codec = FrameCodec::new();

        let result = execute(&mut mock, &codec, &[0x06, 0x03], TIMEOUT);

        assert!(matches!(result, Err(Error::TimedOut)));
        assert_eq!(mock.discards(), 1);
    }

    #[test]
    fn oversized_opcode_never_reaches_the_wire() {
        let mut mock = MockTransport::new();
        let codec = FrameCodec::new();

        let result = execute(&mut mock, &codec, &[0u8; 33], TIMEOUT);

        assert!(matches!(
            result,
            Err(Error::Core(lohs_core::Error::PayloadTooLarge { .. }))
        ));
        assert_eq!(mock.written(), &[] as &[u8]);
    }

    #[test]
    fn read_exact_accumulates_partial_chunks() {
        let mut mock = MockTransport::new()
            .with_read([1, 2, 3])
            .with_read([4])
            .with_read([5, 6, 7]);

        let buf = read_exact(&mut mock, 7, TIMEOUT).unwrap();
        assert_eq!(buf.as_ref(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn read_exact_timeout_mid_frame_discards() {
        let mut mock = MockTransport::new().with_read([1, 2]).with_read_timeout();

        let result = read_exact(&mut mock, 7, TIMEOUT);

        assert!(matches!(result, Err(Error::TimedOut)));
        assert_eq!(mock.discards(), 1);
    }

    #[test]
    fn acknowledge_writes_one_byte() {
        let mut mock = MockTransport::new();

        acknowledge(&mut mock, true).unwrap();
        acknowledge(&mut mock, false).unwrap();

        assert_eq!(mock.written(), &[ACK, NACK]);
    }
}
