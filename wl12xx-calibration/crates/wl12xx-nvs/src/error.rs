use std::io;
use thiserror::Error;

use wl12xx_core::NVS_SECTION_SIZE;
use wl12xx_ini::IniError;

#[derive(Error, Debug)]
pub enum NvsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ini(#[from] IniError),
    #[error("reference NVS is {0} bytes, at least {NVS_SECTION_SIZE} needed")]
    TooShort(usize),
    #[error("MAC address is not valid: {0}")]
    InvalidMac(String),
}
