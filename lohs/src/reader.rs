//! High-level reader interface

use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, info, trace, warn};

use lohs_core::constants::{frame_sizes, DEFAULT_ACK_TIMEOUT, RESET_SETTLE};
use lohs_core::{Command, FlowControlMode, FrameCodec, ReadCount, ReaderBuffer, VerifyKind};
use lohs_transport::{SerialSettings, SerialTransport, Transport};
use lohs_types::{CardData, DeviceStatus, VersionInfo};

use crate::error::{Error, Result};
use crate::exchange;

/// LOHS card reader
///
/// One method per protocol command; each is a thin composition of an opcode
/// template and one acknowledged exchange. The protocol is stateless across
/// commands: the reader's own mode (flow control, verification scheme, read
/// count) is set by commands but not tracked here, so callers remember what
/// they configured last.
///
/// Dropping the `Reader` restores the serial line and releases the port.
///
/// # Examples
///
/// ```no_run
/// use lohs::Reader;
///
/// fn main() -> lohs::Result<()> {
///     let mut reader = Reader::open("/dev/ttyS0")?;
///     reader.beep()?;
///
///     let version = reader.query_version()?;
///     println!("{version}");
///
///     Ok(())
/// }
/// ```
pub struct Reader {
    transport: Box<dyn Transport>,
    codec: FrameCodec,
    timeout: Duration,
}

impl Reader {
    /// Open a serial device with the reader's factory line settings
    pub fn open(path: &str) -> Result<Self> {
        Self::open_with(path, &SerialSettings::default())
    }

    /// Open a serial device with explicit line settings
    pub fn open_with(path: &str, settings: &SerialSettings) -> Result<Self> {
        info!(path, "opening reader");
        let transport = SerialTransport::open(path, settings)?;
        Ok(Self::from_transport(transport))
    }

    /// Drive the protocol over an already-open channel
    pub fn from_transport(transport: impl Transport + 'static) -> Self {
        debug!(channel = transport.describe(), "reader attached");
        Self {
            transport: Box::new(transport),
            codec: FrameCodec::new(),
            timeout: Duration::from_secs(DEFAULT_ACK_TIMEOUT),
        }
    }

    /// Set the acknowledgment deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the frame codec, e.g. for a different checksum algorithm
    pub fn with_codec(mut self, codec: FrameCodec) -> Self {
        self.codec = codec;
        self
    }

    // Host-originated commands

    /// Soft-reset the reader and wait for it to settle
    pub fn reset(&mut self) -> Result<()> {
        self.execute(&Command::Reset)?;
        // The reader is deaf for a moment after a reset
        std::thread::sleep(Duration::from_secs(RESET_SETTLE));
        Ok(())
    }

    /// Arm the reader for a card swipe
    pub fn start_read(&mut self) -> Result<()> {
        self.execute(&Command::StartRead)
    }

    /// Sound the buzzer
    pub fn beep(&mut self) -> Result<()> {
        self.execute(&Command::Beep)
    }

    /// Enable or disable the communication self-test
    pub fn comm_test(&mut self, enable: bool) -> Result<()> {
        self.execute(&Command::CommTest(enable))
    }

    /// Select the transmit buffer
    pub fn select_buffer(&mut self, buffer: ReaderBuffer) -> Result<()> {
        self.execute(&Command::SelectBuffer(buffer))
    }

    /// Set the number of read passes per swipe
    pub fn read_count(&mut self, count: ReadCount) -> Result<()> {
        self.execute(&Command::ReadCount(count))
    }

    /// Set the data verification scheme
    pub fn verify_kind(&mut self, kind: VerifyKind) -> Result<()> {
        self.execute(&Command::VerifyKind(kind))
    }

    /// Set the expected clock count per track; 0 disables the check
    pub fn clock_count(&mut self, count: u8) -> Result<()> {
        self.execute(&Command::ClockCount(count))
    }

    /// Set the serial flow-control scheme
    pub fn flow_control(&mut self, mode: FlowControlMode) -> Result<()> {
        self.execute(&Command::FlowControl(mode))
    }

    /// Show a message on the reader display
    pub fn display_text(&mut self, text: &str) -> Result<()> {
        self.execute(&Command::DisplayText(text.to_string()))
    }

    /// Set the track-bit read mask (bits 0 through 11)
    pub fn set_read_mask(&mut self, mask: u16) -> Result<()> {
        self.execute(&Command::SetReadMask(mask))
    }

    /// Ask the reader to transmit its version frame
    ///
    /// The report itself arrives as a device-originated frame; see
    /// [`Reader::read_version`] or the combined [`Reader::query_version`].
    pub fn show_version(&mut self) -> Result<()> {
        self.execute(&Command::ShowVersion)
    }

    /// Abort a pending swipe wait
    ///
    /// A bare NUL poke on the line; the reader does not acknowledge it.
    pub fn cancel_wait(&mut self) -> Result<()> {
        debug!("cancelling swipe wait");
        self.transport.write(&[0x00])?;
        Ok(())
    }

    /// Put the reader in its documented default mode: CRC verification,
    /// single read, hardware flow control, clock check off
    pub fn set_defaults(&mut self) -> Result<()> {
        self.reset()?;
        self.verify_kind(VerifyKind::Crc)?;
        self.read_count(ReadCount::Single)?;
        self.flow_control(FlowControlMode::RtsCts)?;
        self.clock_count(0)?;
        Ok(())
    }

    // Device-originated frames

    /// Receive a status report
    ///
    /// Never fails: a transport or checksum failure is reported as the
    /// [`DeviceStatus::Error`] sentinel, so callers must check for it.
    /// A well-formed frame is acknowledged with ACK, a corrupt one with
    /// NACK.
    pub fn read_status(&mut self) -> DeviceStatus {
        match self.receive_report(frame_sizes::STATUS) {
            Ok(payload) => {
                let status = DeviceStatus::from_byte(payload[2]);
                debug!(%status, "status report");
                status
            }
            Err(e) => {
                warn!(error = %e, "status exchange failed");
                DeviceStatus::Error
            }
        }
    }

    /// Receive a version report
    ///
    /// Unrecognized model, firmware, or hardware bytes decode to `Unknown`
    /// variants; only transport and checksum failures are errors.
    pub fn read_version(&mut self) -> Result<VersionInfo> {
        let payload = self.receive_report(frame_sizes::VERSION)?;
        let info = VersionInfo::from_bytes(payload[2], payload[3], payload[4]);

        debug!(%info, "version report");
        Ok(info)
    }

    /// Request and receive the version report in one call
    pub fn query_version(&mut self) -> Result<VersionInfo> {
        self.show_version()?;
        self.read_version()
    }

    /// Receive a swiped-card data block
    ///
    /// The track bit-pack layout still has to be validated against captures
    /// from a real device, so this surfaces [`Error::NotImplemented`]
    /// instead of guessing at the unpacking.
    pub fn read_card_block(&mut self) -> Result<CardData> {
        Err(Error::NotImplemented("card block track unpacking"))
    }

    // Helpers

    fn execute(&mut self, command: &Command) -> Result<()> {
        debug!(%command, "executing command");
        exchange::execute(
            self.transport.as_mut(),
            &self.codec,
            &command.opcode_bytes(),
            self.timeout,
        )
    }

    /// Read one device-originated frame, verify it, and acknowledge:
    /// ACK and the inner payload on success, NACK and the verification
    /// error on a corrupt frame.
    fn receive_report(&mut self, frame_len: usize) -> Result<BytesMut> {
        let raw = exchange::read_exact(self.transport.as_mut(), frame_len, self.timeout)?;
        trace!(frame = hex::encode(&raw), "RX report frame");

        match self.codec.verify(&raw) {
            Ok(payload) => {
                let payload = BytesMut::from(payload);
                exchange::acknowledge(self.transport.as_mut(), true)?;
                Ok(payload)
            }
            Err(e) => {
                exchange::acknowledge(self.transport.as_mut(), false)?;
                Err(e.into())
            }
        }
    }
}
