//! Transport layer for the LOHS driver
//!
//! Provides the blocking byte channel the protocol engine runs over.

pub mod error;
pub mod mock;
pub mod serial;

pub use error::{Error, Result};
pub use mock::MockTransport;
pub use serial::{SerialSettings, SerialTransport};

use std::time::Duration;

use bytes::BytesMut;

/// Byte-oriented, blocking, duplex channel with a read deadline
///
/// One execution context owns a transport at a time; concurrent commands over
/// a shared handle are out of contract and must be serialized by the caller.
pub trait Transport: Send {
    /// Write the whole buffer; a short write is a failure
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Block until at least one byte arrives (up to `max`) or the deadline
    /// passes
    ///
    /// # Errors
    ///
    /// [`Error::ReadTimeout`] when nothing arrives before the deadline.
    fn read(&mut self, max: usize, timeout: Duration) -> Result<BytesMut>;

    /// Drop any bytes received but not yet read
    ///
    /// Called after a timed-out exchange so a late byte cannot misalign the
    /// next frame.
    fn discard_input(&mut self) -> Result<()>;

    /// Human-readable channel name for diagnostics
    fn describe(&self) -> String;
}
