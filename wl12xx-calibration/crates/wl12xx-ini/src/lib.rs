//! Stateful INI parser for wl12xx/wl128x radio calibration files.
//!
//! Lines are cleaned by [`LineReader`], split into `Key = value`, routed to a
//! section by marker keys and decoded through per-architecture field tables
//! into an [`IniRecord`](wl12xx_core::IniRecord) held by a [`CommonContext`].

pub mod context;
pub mod decode;
pub mod error;
pub mod parser;
pub mod reader;
pub mod section;
pub mod tables;
pub mod writer;

pub use context::*;
pub use decode::*;
pub use error::*;
pub use parser::*;
pub use reader::*;
pub use section::*;
pub use writer::*;
