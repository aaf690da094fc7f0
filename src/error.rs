use std::io;
use thiserror::Error;

use wl12xx_ini::IniError;
use wl12xx_nvs::NvsError;

#[derive(Error, Debug)]
pub enum CalError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ini(#[from] IniError),
    #[error(transparent)]
    Nvs(#[from] NvsError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a hex byte: {0}")]
    InvalidHex(String),
    #[error("no calibration data found in {0}")]
    EmptyIni(String),
}

/// Parse a one-byte value given in hex, with or without a `0x` prefix.
pub fn parse_hex_u8(text: &str) -> Result<u8, CalError> {
    let digits = text
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u8::from_str_radix(digits, 16).map_err(|_| CalError::InvalidHex(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u8() {
        assert_eq!(parse_hex_u8("1").unwrap(), 1);
        assert_eq!(parse_hex_u8("0x1f").unwrap(), 0x1f);
        assert_eq!(parse_hex_u8("FF").unwrap(), 0xff);
        assert!(matches!(parse_hex_u8("100"), Err(CalError::InvalidHex(_))));
        assert!(matches!(parse_hex_u8("zz"), Err(CalError::InvalidHex(_))));
        assert!(matches!(parse_hex_u8(""), Err(CalError::InvalidHex(_))));
    }
}
