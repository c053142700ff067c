//! # lohs-core
//!
//! Core protocol primitives for LOHS card readers:
//! - Frame construction and validation
//! - Block checksum
//! - Command catalogue
//! - Protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;

pub use command::{Command, FlowControlMode, ReadCount, ReaderBuffer, VerifyKind};
pub use error::{Error, Result};
pub use frame::FrameCodec;
