//! Version report decoding
//!
//! The version frame carries three bytes: model, firmware, hardware. Each
//! field is a closed enumeration; byte values outside the table decode to
//! `Unknown` so a newer reader never breaks the host.

use std::fmt;

/// Reader model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// "3m" series
    M3,
    /// "4" series
    M4,
    Unknown(u8),
}

impl From<u8> for Model {
    fn from(byte: u8) -> Self {
        match byte {
            0x01 => Self::M3,
            0x02 => Self::M4,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::M3 => f.write_str("3m"),
            Self::M4 => f.write_str("4"),
            Self::Unknown(byte) => write!(f, "unknown (0x{byte:02X})"),
        }
    }
}

/// Firmware revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firmware {
    V3_4,
    V3_5,
    Unknown(u8),
}

impl From<u8> for Firmware {
    fn from(byte: u8) -> Self {
        match byte {
            0x34 => Self::V3_4,
            0x35 => Self::V3_5,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for Firmware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3_4 => f.write_str("3.4"),
            Self::V3_5 => f.write_str("3.5"),
            Self::Unknown(byte) => write!(f, "unknown (0x{byte:02X})"),
        }
    }
}

/// Hardware fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hardware {
    Standard,
    DoubleReadSupport,
    Unknown(u8),
}

impl From<u8> for Hardware {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => Self::Standard,
            0x01 => Self::DoubleReadSupport,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for Hardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("Standard"),
            Self::DoubleReadSupport => f.write_str("Double Read Support"),
            Self::Unknown(byte) => write!(f, "unknown (0x{byte:02X})"),
        }
    }
}

/// Decoded version report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub model: Model,
    pub firmware: Firmware,
    pub hardware: Hardware,
}

impl VersionInfo {
    /// Decode the three fixed-offset bytes of a version frame
    pub fn from_bytes(model: u8, firmware: u8, hardware: u8) -> Self {
        Self {
            model: model.into(),
            firmware: firmware.into(),
            hardware: hardware.into(),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reader[model: {}, firmware: {}, hardware: {}]",
            self.model, self.firmware, self.hardware
        )
    }
}
