//! wl12xx core types: chip architectures, calibration records and their packed
//! NVS layout.
//!
//! The two chip generations (wl1271 and wl128x) carry differently shaped
//! radio parameters. Both are modelled as plain structs with fixed-size arrays;
//! [`IniRecord`] ties one of them to the architecture it was bound with.

pub mod arch;
pub mod layout;
pub mod params;
pub mod record;

pub use arch::*;
pub use layout::*;
pub use params::*;
pub use record::*;
