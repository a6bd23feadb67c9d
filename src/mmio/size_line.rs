//! Size line codec: `nrows ncols nnz` after the comment block

use std::io::{BufRead, Write};

use log::debug;

use crate::constants::COMMENT_MARKER;
use crate::error::{MmioError, Result};
use crate::mmio::{read_raw_line, read_text_line, trim_line_ending};

/// Declared dimensions and entry count
///
/// `nnz` is the count stored in the file, before symmetric expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLine {
    pub n_rows: u64,
    pub n_cols: u64,
    pub nnz: u64,
}

impl SizeLine {
    pub fn new(n_rows: u64, n_cols: u64, nnz: u64) -> Self {
        Self {
            n_rows,
            n_cols,
            nnz,
        }
    }
}

/// Skips the comment block and reads the size line
///
/// Comment lines are appended to `comments` as raw bytes without line
/// endings, so non-UTF-8 text survives a read followed by a write. If the
/// first non-comment line does not start with three unsigned integers
/// (typically a blank line), integers are collected from the following lines
/// until three have been read.
pub fn read_size_line<R: BufRead>(
    reader: &mut R,
    comments: &mut Vec<Vec<u8>>,
) -> Result<SizeLine> {
    let mut raw = Vec::new();

    loop {
        if !read_raw_line(reader, &mut raw)? {
            return Err(MmioError::PrematureEof("size line"));
        }
        if raw.first() != Some(&(COMMENT_MARKER as u8)) {
            break;
        }
        comments.push(trim_line_ending(&raw).to_vec());
    }

    let mut line = String::from_utf8_lossy(&raw).into_owned();
    let first: Vec<u64> = line
        .split_whitespace()
        .take(3)
        .map_while(|t| t.parse().ok())
        .collect();
    if let [n_rows, n_cols, nnz] = first[..] {
        let size = SizeLine::new(n_rows, n_cols, nnz);
        debug!("Declared size: {:?}", size);
        return Ok(size);
    }

    let mut values = Vec::with_capacity(3);
    while values.len() < 3 {
        if !read_text_line(reader, &mut line)? {
            return Err(MmioError::PrematureEof("size line"));
        }
        for token in line.split_whitespace() {
            let value = token.parse::<u64>().map_err(|_| MmioError::InvalidToken {
                context: "size line",
                token: token.to_string(),
            })?;
            values.push(value);
            if values.len() == 3 {
                break;
            }
        }
    }

    let size = SizeLine::new(values[0], values[1], values[2]);
    debug!("Declared size: {:?}", size);
    Ok(size)
}

/// Writes `nrows ncols nnz` followed by a newline
pub fn write_size_line<W: Write>(writer: &mut W, size: &SizeLine) -> Result<()> {
    writeln!(writer, "{} {} {}", size.n_rows, size.n_cols, size.nnz)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_after_comments() {
        let mut input = Cursor::new("% first\n% second\n3 4 5\n1 1 1.0\n");
        let mut comments = Vec::new();

        let size = read_size_line(&mut input, &mut comments).unwrap();

        assert_eq!(size, SizeLine::new(3, 4, 5));
        assert_eq!(comments, vec![b"% first".to_vec(), b"% second".to_vec()]);

        // The stream is left at the first entry
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut input, &mut rest).unwrap();
        assert_eq!(rest, "1 1 1.0\n");
    }

    #[test]
    fn test_comment_bytes_kept_verbatim() {
        let mut input = Cursor::new(b"% caf\xe9\r\n%\xff\xfe\n1 1 0\n".to_vec());
        let mut comments = Vec::new();

        let size = read_size_line(&mut input, &mut comments).unwrap();

        assert_eq!(size, SizeLine::new(1, 1, 0));
        assert_eq!(comments, vec![b"% caf\xe9".to_vec(), b"%\xff\xfe".to_vec()]);
    }

    #[test]
    fn test_blank_line_fallback() {
        let mut input = Cursor::new("%c\n\n   \n10\n20 30\n");
        let size = read_size_line(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(size, SizeLine::new(10, 20, 30));
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let mut input = Cursor::new("2 2 1 trailing\n");
        let size = read_size_line(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(size, SizeLine::new(2, 2, 1));
    }

    #[test]
    fn test_premature_eof() {
        let mut input = Cursor::new("% only comments\n");
        assert!(matches!(
            read_size_line(&mut input, &mut Vec::new()),
            Err(MmioError::PrematureEof("size line"))
        ));

        let mut input = Cursor::new("\n1 2\n");
        assert!(matches!(
            read_size_line(&mut input, &mut Vec::new()),
            Err(MmioError::PrematureEof("size line"))
        ));
    }

    #[test]
    fn test_malformed_fallback_token() {
        let mut input = Cursor::new("\n3 x 1\n");
        assert!(matches!(
            read_size_line(&mut input, &mut Vec::new()),
            Err(MmioError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_write_size_line() {
        let mut out = Vec::new();
        write_size_line(&mut out, &SizeLine::new(7, 8, 9)).unwrap();
        assert_eq!(out, b"7 8 9\n");
    }
}
