//! `Key = value` splitting and hexadecimal array decoding.

use std::num::IntErrorKind;

use crate::error::IniError;

/// Split a cleaned line at the first `=`.
pub fn split_line(line: &str) -> Result<(&str, &str), IniError> {
    let (key, value) = line.split_once('=').ok_or(IniError::Format)?;
    Ok((key.trim_end(), value.trim_start()))
}

/// Decode `value` into exactly `dest.len()` bytes.
pub fn parse_u8_array(field: &str, value: &str, dest: &mut [u8]) -> Result<(), IniError> {
    let mut filled = 0;
    for token in tokens(value) {
        let v = parse_hex(field, token, u8::MAX as u64)? as u8;
        store(field, dest, filled, v)?;
        filled += 1;
    }
    check_filled(field, dest.len(), filled)
}

/// Decode `value` into exactly `dest.len()` 16-bit words.
pub fn parse_u16_array(field: &str, value: &str, dest: &mut [u16]) -> Result<(), IniError> {
    let mut filled = 0;
    for token in tokens(value) {
        let v = parse_hex(field, token, u16::MAX as u64)? as u16;
        store(field, dest, filled, v)?;
        filled += 1;
    }
    check_filled(field, dest.len(), filled)
}

fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}

fn parse_hex(field: &str, token: &str, max: u64) -> Result<u64, IniError> {
    let overflow = || IniError::Overflow {
        field: field.to_string(),
        token: token.to_string(),
        max,
    };
    // from_str_radix accepts a leading '+', the file format does not.
    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IniError::Syntax {
            field: field.to_string(),
            token: token.to_string(),
        });
    }
    match u64::from_str_radix(token, 16) {
        Ok(v) if v <= max => Ok(v),
        Ok(_) => Err(overflow()),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(overflow()),
        Err(_) => Err(IniError::Syntax {
            field: field.to_string(),
            token: token.to_string(),
        }),
    }
}

fn store<T>(field: &str, dest: &mut [T], index: usize, value: T) -> Result<(), IniError> {
    match dest.get_mut(index) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(IniError::TooManyValues {
            field: field.to_string(),
            expected: dest.len(),
        }),
    }
}

fn check_filled(field: &str, expected: usize, got: usize) -> Result<(), IniError> {
    if got < expected {
        return Err(IniError::TooFewValues {
            field: field.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IniErrorKind;

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("RefClk = 1a").unwrap(), ("RefClk", "1a"));
        assert_eq!(split_line("A=B=C").unwrap(), ("A", "B=C"));
        assert_eq!(split_line("Key\t=   ").unwrap(), ("Key", ""));
    }

    #[test]
    fn test_split_line_missing_separator() {
        assert_eq!(split_line("RefClk 1a").unwrap_err().kind(), IniErrorKind::Format);
    }

    #[test]
    fn test_u8_array_exact() {
        let mut dest = [0u8; 8];
        parse_u8_array("SRF", "01,02,03,04,05,06,07,08", &mut dest).unwrap();
        assert_eq!(dest, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_mixed_separators() {
        let mut dest = [0u8; 4];
        parse_u8_array("X", "0a ,  FF,,10 7", &mut dest).unwrap();
        assert_eq!(dest, [0x0a, 0xff, 0x10, 0x07]);
    }

    #[test]
    fn test_tab_separators() {
        let mut dest = [0u8; 3];
        parse_u8_array("SRF1", "01\t02\t03", &mut dest).unwrap();
        assert_eq!(dest, [1, 2, 3]);

        let mut words = [0u16; 2];
        parse_u16_array("PD", "0120,\t01c4\t", &mut words).unwrap();
        assert_eq!(words, [0x0120, 0x01c4]);
    }

    #[test]
    fn test_scalar_field() {
        let mut dest = [0u8; 1];
        parse_u8_array("RefClk", "1a", &mut dest).unwrap();
        assert_eq!(dest[0], 0x1a);
    }

    #[test]
    fn test_arity_errors() {
        let mut dest = [0u8; 3];
        let err = parse_u8_array("X", "01 02", &mut dest).unwrap_err();
        assert!(matches!(err, IniError::TooFewValues { expected: 3, got: 2, .. }));
        let err = parse_u8_array("X", "01 02 03 04", &mut dest).unwrap_err();
        assert!(matches!(err, IniError::TooManyValues { expected: 3, .. }));
        let err = parse_u8_array("X", "", &mut dest).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::Arity);
    }

    #[test]
    fn test_u8_overflow() {
        let mut dest = [0u8; 1];
        let err = parse_u8_array("X", "100", &mut dest).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::Overflow);
        let err = parse_u8_array("X", "fffffffffffffffffff", &mut dest).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::Overflow);
    }

    #[test]
    fn test_syntax_errors() {
        let mut dest = [0u8; 1];
        for bad in ["zz", "0x10", "+1", "1g", "-1"] {
            let err = parse_u8_array("X", bad, &mut dest).unwrap_err();
            assert_eq!(err.kind(), IniErrorKind::Syntax, "token {bad}");
        }
    }

    #[test]
    fn test_u16_array() {
        let mut dest = [0u16; 3];
        parse_u16_array("PD", "0123, ffff 0", &mut dest).unwrap();
        assert_eq!(dest, [0x0123, 0xffff, 0]);
        let err = parse_u16_array("PD", "10000 1 2", &mut dest).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::Overflow);
    }
}
