//! Decoded device-report types for the LOHS driver

pub mod card;
pub mod status;
pub mod version;

pub use card::CardData;
pub use status::{DeviceStatus, StatusFlags};
pub use version::{Firmware, Hardware, Model, VersionInfo};
