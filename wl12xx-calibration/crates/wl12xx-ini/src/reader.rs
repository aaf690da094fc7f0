//! Logical line reader: strips comments and whitespace, skips blank lines.

use std::io::BufRead;

use crate::error::IniError;

/// Default maximum physical line length, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;

/// Parser options.
#[derive(Debug, Clone)]
pub struct IniOptions {
    /// Lines longer than `max_line_len - 1` bytes are truncated.
    pub max_line_len: usize,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

/// Yields cleaned `Key = value` lines from a text stream.
pub struct LineReader<R> {
    inner: R,
    max_line_len: usize,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_options(inner, &IniOptions::default())
    }

    pub fn with_options(inner: R, opts: &IniOptions) -> Self {
        Self {
            inner,
            max_line_len: opts.max_line_len.max(2),
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Number of logical lines returned so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next non-empty, comment-free line, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<String>, IniError> {
        loop {
            self.buf.clear();
            if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.buf.truncate(self.max_line_len - 1);

            let raw = String::from_utf8_lossy(&self.buf);
            if let Some(line) = clean_line(&raw) {
                self.line_number += 1;
                return Ok(Some(line.to_string()));
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String, IniError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Strip leading whitespace and a trailing comment from one raw line.
///
/// A `#` inside a double-quoted span does not start a comment: the search
/// begins after the last `"` that follows the first one.
pub fn clean_line(raw: &str) -> Option<&str> {
    let line = raw.trim_start_matches([' ', '\t', '\r']);
    if line.is_empty() || line.starts_with('#') || line.starts_with('\n') {
        return None;
    }

    let search_from = line
        .find('"')
        .and_then(|first| line[first + 1..].rfind('"').map(|last| first + 1 + last))
        .unwrap_or(0);
    let content = match line[search_from..].find('#') {
        Some(pos) => &line[..search_from + pos],
        None => line,
    };

    let content = content.trim_end_matches([' ', '\t', '\r', '\n']);
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(text: &str) -> Vec<String> {
        LineReader::new(Cursor::new(text.as_bytes().to_vec()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let text = "# header\n\n   \n\t# indented comment\nRefClk = 01\r\n";
        assert_eq!(lines(text), vec!["RefClk = 01"]);
    }

    #[test]
    fn test_strips_trailing_comment() {
        assert_eq!(clean_line("  SRState = 01   # enabled\n"), Some("SRState = 01"));
        assert_eq!(clean_line("Key = 1#x"), Some("Key = 1"));
    }

    #[test]
    fn test_hash_inside_quotes_kept() {
        assert_eq!(
            clean_line("Name = \"a # b\" # tail\n"),
            Some("Name = \"a # b\"")
        );
        assert_eq!(
            clean_line("Name = \"x\" \"y#z\"\n"),
            Some("Name = \"x\" \"y#z\"")
        );
    }

    #[test]
    fn test_unbalanced_quote_searches_from_start() {
        assert_eq!(clean_line("Name = \"abc # c\n"), Some("Name = \"abc"));
    }

    #[test]
    fn test_comment_only_after_trim_is_skipped() {
        assert_eq!(clean_line("   # only comment"), None);
        assert_eq!(clean_line("\r\n"), None);
        assert_eq!(clean_line("\t \t"), None);
    }

    #[test]
    fn test_line_counter_counts_returned_lines() {
        let mut reader = LineReader::new(Cursor::new(b"# c\nA = 1\n\n\nB = 2\n# c\n".to_vec()));
        assert_eq!(reader.line_number(), 0);
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("A = 1"));
        assert_eq!(reader.line_number(), 1);
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("B = 2"));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 2);
    }

    #[test]
    fn test_long_lines_truncated() {
        let opts = IniOptions { max_line_len: 8 };
        let mut reader =
            LineReader::with_options(Cursor::new(b"Key = 0123456789\nB = 2\n".to_vec()), &opts);
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("Key = 0"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("B = 2"));
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(lines("A = 1\nB = 2"), vec!["A = 1", "B = 2"]);
    }
}
