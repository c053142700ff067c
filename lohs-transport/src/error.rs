//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open device {path}: {source}")]
    DeviceUnavailable {
        path: String,
        source: serialport::Error,
    },

    #[error("Read timeout")]
    ReadTimeout,

    #[error("Channel closed by peer")]
    Closed,

    #[error("Serial line error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
