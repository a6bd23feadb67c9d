//! Matrix Market and BMTX file I/O
//!
//! Both formats share the textual header: a banner line, `%` comment lines
//! and a size line. Text files then carry one 1-based `row col [value]`
//! record per entry; BMTX files carry fixed-width little-endian binary
//! records with 0-based indices, whose widths are declared in the banner.

pub mod entries;
pub mod header;
pub mod metadata;
pub mod reader;
pub mod size_line;
pub mod symmetry;
pub mod typecode;
pub mod validation;
pub mod writer;

use std::io::BufRead;

use crate::error::Result;

pub use metadata::{FileFormat, MatrixMetadata, ReadOptions};
pub use reader::{
    read_coo, read_coo_from, read_coo_with_metadata, read_csr, read_csr_from,
    read_csr_with_metadata,
};
pub use size_line::SizeLine;
pub use typecode::{BinaryWidths, Field, Shape, Symmetry, Typecode};
pub use validation::{required_bytes_for_dims, required_bytes_index};
pub use writer::{write_coo, write_coo_to};

/// Reads one raw line into `buf`, replacing its contents
///
/// Stops right after the `\n`, so binary data following the header is left in
/// the stream. Returns `false` at end of stream.
pub(crate) fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}

/// Reads one header line into `buf`, replacing its contents
///
/// Invalid UTF-8 is replaced rather than rejected; such lines can only fail
/// later as unknown tokens.
pub(crate) fn read_text_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<bool> {
    buf.clear();
    let mut bytes = Vec::new();
    if !read_raw_line(reader, &mut bytes)? {
        return Ok(false);
    }
    buf.push_str(&String::from_utf8_lossy(&bytes));
    Ok(true)
}

/// Strips a trailing `\n` or `\r\n`
pub(crate) fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_read_text_line_leaves_binary_tail() {
        let mut input = Cursor::new(b"3 3 1\n\x00\xff\x01".to_vec());
        let mut line = String::new();

        assert!(read_text_line(&mut input, &mut line).unwrap());
        assert_eq!(line, "3 3 1\n");

        let mut rest = Vec::new();
        input.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![0x00, 0xff, 0x01]);
    }

    #[test]
    fn test_read_text_line_eof() {
        let mut line = String::from("stale");
        assert!(!read_text_line(&mut Cursor::new(Vec::new()), &mut line).unwrap());
        assert!(line.is_empty());
    }

    #[test]
    fn test_read_raw_line_keeps_invalid_utf8() {
        let mut input = Cursor::new(b"% caf\xe9\r\nnext".to_vec());
        let mut line = Vec::new();

        assert!(read_raw_line(&mut input, &mut line).unwrap());
        assert_eq!(line, b"% caf\xe9\r\n".to_vec());
        assert_eq!(trim_line_ending(&line), b"% caf\xe9");
        assert_eq!(trim_line_ending(b"no newline"), b"no newline");
    }
}
