//! # lohs
//!
//! Driver for LOHS magnetic card readers on an RS-232 serial line.
//!
//! The LOHS protocol exchanges STX/ETX-delimited frames carrying a 16-bit
//! checksum trailer. Every host command is answered with a single ACK or
//! NACK byte; the reader pushes status, version, and card-data frames of
//! its own, which the host acknowledges the same way.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lohs::Reader;
//!
//! fn main() -> lohs::Result<()> {
//!     // Open with the reader's factory line settings (9600 8N2, RTS/CTS)
//!     let mut reader = Reader::open("/dev/ttyS0")?;
//!
//!     reader.set_defaults()?;
//!     reader.beep()?;
//!
//!     let version = reader.query_version()?;
//!     println!("{version}");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod exchange;
pub mod reader;

// Re-exports
pub use error::{Error, Result};
pub use reader::Reader;

// Re-export protocol and transport types
pub use lohs_core::{Command, FlowControlMode, FrameCodec, ReadCount, ReaderBuffer, VerifyKind};
pub use lohs_transport::{MockTransport, SerialSettings, SerialTransport, Transport};
pub use lohs_types::{CardData, DeviceStatus, VersionInfo};
