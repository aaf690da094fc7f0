//! NVS blob handling for wl12xx/wl128x chips.
//!
//! An NVS blob is a 468-byte NVS section (burst header with the MAC address,
//! then TLV-encoded calibration results) followed by the packed radio
//! parameters decoded from a calibration INI file.

pub mod dump;
pub mod error;
pub mod file;
pub mod mac;
pub mod section;

pub use dump::*;
pub use error::*;
pub use file::*;
pub use mac::*;
pub use section::*;
