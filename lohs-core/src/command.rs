//! LOHS command catalogue
//!
//! Every host-originated command renders a fixed opcode template, byte-exact
//! from the vendor command table. Parameterized commands select among a small
//! set of templates or append parameter bytes; the codec wraps the result in
//! delimiters and the checksum trailer.

use std::fmt;

// Opcode templates from the vendor command table
const RESET: &[u8] = &[0x06, 0x00];
const START_READ: &[u8] = &[0x06, 0x01];
const BEEP: &[u8] = &[0x06, 0x03];
const ENABLE_COMM_TEST: &[u8] = &[0x06, 0x04];
const DISABLE_COMM_TEST: &[u8] = &[0x06, 0x05];
const SHOW_VERSION: &[u8] = &[0x06, 0x0B];
const BUFFER_1: &[u8] = &[0x07, 0x02, 0x01];
const BUFFER_2: &[u8] = &[0x07, 0x02, 0x02];
const READ_SINGLE: &[u8] = &[0x07, 0x06, 0x01];
const READ_DOUBLE: &[u8] = &[0x07, 0x06, 0x02];
const VERIFY_XOR: &[u8] = &[0x07, 0x07, 0x00];
const VERIFY_CRC: &[u8] = &[0x07, 0x07, 0x01];
const CLOCK_COUNT: &[u8] = &[0x07, 0x08];
const DISPLAY_TEXT: &[u8] = &[0x07, 0x09, 0x40];
const FLOW_XON_XOFF: &[u8] = &[0x07, 0x0A, 0x00];
const FLOW_RTS_CTS: &[u8] = &[0x07, 0x0A, 0x01];
const READ_MASK: &[u8] = &[0x08, 0x09];

/// Serial flow-control scheme selected on the reader side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FlowControlMode {
    XonXoff = 0,
    RtsCts = 1,
}

impl From<u8> for FlowControlMode {
    /// Unrecognized values select the hardware scheme, the reader's
    /// documented default.
    fn from(value: u8) -> Self {
        match value {
            0 => Self::XonXoff,
            _ => Self::RtsCts,
        }
    }
}

/// Data verification scheme the reader applies to card data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VerifyKind {
    Xor = 0,
    Crc = 1,
}

impl From<u8> for VerifyKind {
    /// Unrecognized values select CRC verification, the reader's documented
    /// default.
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Xor,
            _ => Self::Crc,
        }
    }
}

/// Number of read passes per card swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadCount {
    Single = 1,
    Double = 2,
}

impl From<u8> for ReadCount {
    /// Unrecognized values select a single read, the reader's documented
    /// default.
    fn from(value: u8) -> Self {
        match value {
            2 => Self::Double,
            _ => Self::Single,
        }
    }
}

/// Transmit buffer selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReaderBuffer {
    One = 1,
    Two = 2,
}

impl From<u8> for ReaderBuffer {
    /// Unrecognized values select buffer 1, the reader's documented default.
    fn from(value: u8) -> Self {
        match value {
            2 => Self::Two,
            _ => Self::One,
        }
    }
}

/// Host-originated LOHS commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Soft-reset the reader
    Reset,

    /// Arm the reader for a card swipe
    StartRead,

    /// Sound the buzzer
    Beep,

    /// Enable or disable the communication self-test
    CommTest(bool),

    /// Select the transmit buffer
    SelectBuffer(ReaderBuffer),

    /// Set the number of read passes per swipe
    ReadCount(ReadCount),

    /// Set the data verification scheme
    VerifyKind(VerifyKind),

    /// Expected clock count per track (0 disables the check)
    ClockCount(u8),

    /// Show a message on the reader display
    DisplayText(String),

    /// Set the serial flow-control scheme
    FlowControl(FlowControlMode),

    /// Ask the reader to transmit its version frame
    ShowVersion,

    /// Set the track-bit read mask (bits 0 through 11)
    SetReadMask(u16),
}

impl Command {
    /// Render the opcode byte sequence for this command
    pub fn opcode_bytes(&self) -> Vec<u8> {
        match self {
            Self::Reset => RESET.to_vec(),
            Self::StartRead => START_READ.to_vec(),
            Self::Beep => BEEP.to_vec(),
            Self::CommTest(true) => ENABLE_COMM_TEST.to_vec(),
            Self::CommTest(false) => DISABLE_COMM_TEST.to_vec(),
            Self::SelectBuffer(ReaderBuffer::One) => BUFFER_1.to_vec(),
            Self::SelectBuffer(ReaderBuffer::Two) => BUFFER_2.to_vec(),
            Self::ReadCount(ReadCount::Single) => READ_SINGLE.to_vec(),
            Self::ReadCount(ReadCount::Double) => READ_DOUBLE.to_vec(),
            Self::VerifyKind(VerifyKind::Xor) => VERIFY_XOR.to_vec(),
            Self::VerifyKind(VerifyKind::Crc) => VERIFY_CRC.to_vec(),
            Self::ClockCount(count) => {
                let mut opcode = CLOCK_COUNT.to_vec();
                opcode.push(*count);
                opcode
            }
            Self::DisplayText(text) => {
                let mut opcode = DISPLAY_TEXT.to_vec();
                opcode.extend_from_slice(text.as_bytes());
                opcode
            }
            Self::FlowControl(FlowControlMode::XonXoff) => FLOW_XON_XOFF.to_vec(),
            Self::FlowControl(FlowControlMode::RtsCts) => FLOW_RTS_CTS.to_vec(),
            Self::ShowVersion => SHOW_VERSION.to_vec(),
            Self::SetReadMask(mask) => {
                // Mask 1 carries bits 7..0, mask 2 carries bits 11..8
                let mut opcode = READ_MASK.to_vec();
                opcode.push((mask & 0xFF) as u8);
                opcode.push(((mask >> 8) & 0x0F) as u8);
                opcode
            }
        }
    }

    /// Get command name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::StartRead => "START_READ",
            Self::Beep => "BEEP",
            Self::CommTest(true) => "ENABLE_COMM_TEST",
            Self::CommTest(false) => "DISABLE_COMM_TEST",
            Self::SelectBuffer(_) => "SELECT_BUFFER",
            Self::ReadCount(_) => "READ_COUNT",
            Self::VerifyKind(_) => "VERIFY_KIND",
            Self::ClockCount(_) => "CLOCK_COUNT",
            Self::DisplayText(_) => "DISPLAY_TEXT",
            Self::FlowControl(_) => "FLOW_CONTROL",
            Self::ShowVersion => "SHOW_VERSION",
            Self::SetReadMask(_) => "SET_READ_MASK",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_command_templates() {
        assert_eq!(Command::Reset.opcode_bytes(), vec![0x06, 0x00]);
        assert_eq!(Command::StartRead.opcode_bytes(), vec![0x06, 0x01]);
        assert_eq!(Command::Beep.opcode_bytes(), vec![0x06, 0x03]);
        assert_eq!(Command::ShowVersion.opcode_bytes(), vec![0x06, 0x0B]);
    }

    #[test]
    fn comm_test_templates() {
        assert_eq!(Command::CommTest(true).opcode_bytes(), vec![0x06, 0x04]);
        assert_eq!(Command::CommTest(false).opcode_bytes(), vec![0x06, 0x05]);
    }

    #[test]
    fn parameterized_templates() {
        assert_eq!(
            Command::SelectBuffer(ReaderBuffer::One).opcode_bytes(),
            vec![0x07, 0x02, 0x01]
        );
        assert_eq!(
            Command::SelectBuffer(ReaderBuffer::Two).opcode_bytes(),
            vec![0x07, 0x02, 0x02]
        );
        assert_eq!(
            Command::ReadCount(ReadCount::Double).opcode_bytes(),
            vec![0x07, 0x06, 0x02]
        );
        assert_eq!(
            Command::VerifyKind(VerifyKind::Xor).opcode_bytes(),
            vec![0x07, 0x07, 0x00]
        );
        assert_eq!(
            Command::FlowControl(FlowControlMode::RtsCts).opcode_bytes(),
            vec![0x07, 0x0A, 0x01]
        );
    }

    #[test]
    fn clock_count_appends_parameter() {
        assert_eq!(Command::ClockCount(0).opcode_bytes(), vec![0x07, 0x08, 0x00]);
        assert_eq!(Command::ClockCount(42).opcode_bytes(), vec![0x07, 0x08, 42]);
    }

    #[test]
    fn display_text_appends_message() {
        let opcode = Command::DisplayText("HI".into()).opcode_bytes();
        assert_eq!(opcode, vec![0x07, 0x09, 0x40, b'H', b'I']);
    }

    #[test]
    fn read_mask_packs_twelve_bits() {
        assert_eq!(
            Command::SetReadMask(0x0FFF).opcode_bytes(),
            vec![0x08, 0x09, 0xFF, 0x0F]
        );
        assert_eq!(
            Command::SetReadMask(0x0304).opcode_bytes(),
            vec![0x08, 0x09, 0x04, 0x03]
        );
        // Bits above 11 never reach the wire
        assert_eq!(
            Command::SetReadMask(0xF001).opcode_bytes(),
            vec![0x08, 0x09, 0x01, 0x00]
        );
    }

    #[test]
    fn flow_control_fallback() {
        assert_eq!(FlowControlMode::from(0), FlowControlMode::XonXoff);
        assert_eq!(FlowControlMode::from(1), FlowControlMode::RtsCts);
        assert_eq!(FlowControlMode::from(7), FlowControlMode::RtsCts);
    }

    #[test]
    fn mode_fallbacks() {
        assert_eq!(VerifyKind::from(0), VerifyKind::Xor);
        assert_eq!(VerifyKind::from(9), VerifyKind::Crc);
        assert_eq!(ReadCount::from(2), ReadCount::Double);
        assert_eq!(ReadCount::from(0), ReadCount::Single);
        assert_eq!(ReaderBuffer::from(2), ReaderBuffer::Two);
        assert_eq!(ReaderBuffer::from(250), ReaderBuffer::One);
    }

    #[test]
    fn command_display() {
        assert_eq!(Command::Beep.to_string(), "BEEP");
        assert_eq!(Command::CommTest(false).to_string(), "DISABLE_COMM_TEST");
    }
}
