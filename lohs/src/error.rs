//! Driver-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Core(#[from] lohs_core::Error),

    #[error("Transport error: {0}")]
    Transport(lohs_transport::Error),

    #[error("No acknowledgment within the deadline")]
    TimedOut,

    #[error("Device rejected the command")]
    Nacked,

    #[error("Expected ACK or NACK, received 0x{0:02X}")]
    ProtocolViolation(u8),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

impl From<lohs_transport::Error> for Error {
    fn from(err: lohs_transport::Error) -> Self {
        match err {
            lohs_transport::Error::ReadTimeout => Self::TimedOut,
            other => Self::Transport(other),
        }
    }
}
