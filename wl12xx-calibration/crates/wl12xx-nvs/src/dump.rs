//! Hex dump of raw NVS bytes.

/// 16 bytes per row, prefixed with the row offset.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!(" {:04X} ", row * 16));
        for b in chunk {
            out.push_str(&format!("{b:02x} "));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let bytes: Vec<u8> = (0..20).collect();
        let dump = hex_dump(&bytes);
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 0000 00 01 02"));
        assert_eq!(lines[1], " 0010 10 11 12 13 ");
    }

    #[test]
    fn test_empty() {
        assert_eq!(hex_dump(&[]), "");
    }
}
