//! RS-232 transport

use std::io::{Read, Write};
use std::time::Duration;

use bytes::BytesMut;
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, trace};

use crate::{error::*, Transport};

/// Serial line settings, owned by the caller and applied at open
///
/// The defaults match the reader's factory configuration: 9600 baud, eight
/// data bits, no parity, two stop bits, hardware flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::Two,
            flow_control: FlowControl::Hardware,
        }
    }
}

impl SerialSettings {
    /// Set the baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the host-side flow control
    pub fn with_flow_control(mut self, flow_control: FlowControl) -> Self {
        self.flow_control = flow_control;
        self
    }
}

/// Serial transport for LOHS readers
///
/// Wraps an exclusively-owned serial port. The previous line discipline is
/// restored when the transport is dropped, which releases the port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialTransport {
    /// Open a serial device and apply the line settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceUnavailable`] when the path cannot be opened
    /// or the line settings are rejected.
    pub fn open(path: &str, settings: &SerialSettings) -> Result<Self> {
        let port = serialport::new(path, settings.baud_rate)
            .data_bits(settings.data_bits)
            .parity(settings.parity)
            .stop_bits(settings.stop_bits)
            .flow_control(settings.flow_control)
            .timeout(Duration::from_millis(100))
            .open()
            .map_err(|source| Error::DeviceUnavailable {
                path: path.to_string(),
                source,
            })?;

        debug!(path, baud = settings.baud_rate, "serial port open");

        Ok(Self {
            port,
            path: path.to_string(),
        })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        trace!("TX {} bytes on {}", data.len(), self.path);

        self.port.write_all(data)?;
        self.port.flush()?;

        Ok(())
    }

    fn read(&mut self, max: usize, timeout: Duration) -> Result<BytesMut> {
        self.port.set_timeout(timeout)?;

        let mut buf = vec![0u8; max];
        match self.port.read(&mut buf) {
            Ok(0) => Err(Error::Closed),
            Ok(n) => {
                trace!("RX {} bytes on {}", n, self.path);
                Ok(BytesMut::from(&buf[..n]))
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Err(Error::ReadTimeout),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn discard_input(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_reader_factory_line() {
        let settings = SerialSettings::default();

        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.data_bits, DataBits::Eight);
        assert_eq!(settings.parity, Parity::None);
        assert_eq!(settings.stop_bits, StopBits::Two);
        assert_eq!(settings.flow_control, FlowControl::Hardware);
    }

    #[test]
    fn settings_builders() {
        let settings = SerialSettings::default()
            .with_baud_rate(19200)
            .with_flow_control(FlowControl::Software);

        assert_eq!(settings.baud_rate, 19200);
        assert_eq!(settings.flow_control, FlowControl::Software);
    }

    #[test]
    fn open_missing_device_fails() {
        let result = SerialTransport::open("/dev/tty-does-not-exist", &SerialSettings::default());

        assert!(matches!(result, Err(Error::DeviceUnavailable { .. })));
    }
}
