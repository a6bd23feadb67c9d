//! Banner line codec
//!
//! Text files start with `%%MatrixMarket matrix coordinate <field> <symmetry>`.
//! BMTX files append two unsigned byte counts: the index width and the value
//! width of the binary records that follow.

use std::io::{BufRead, Write};

use log::debug;

use crate::constants::*;
use crate::error::{MmioError, Result};
use crate::mmio::read_text_line;
use crate::mmio::typecode::{BinaryWidths, Field, Shape, Symmetry, Typecode};

/// Parses a banner line
///
/// # Arguments
///
/// * `line` - The first line of the file
/// * `binary` - Whether the two BMTX width fields are expected
///
/// # Errors
///
/// - `PrematureEof` if the line has fewer tokens than required
/// - `NoHeader` if the first token does not start with `%%MatrixMarket`
/// - `UnsupportedType` if a classification token or a binary width is unknown
/// - `InvalidToken` if a binary width is not an unsigned byte count
pub fn parse_banner(line: &str, binary: bool) -> Result<Typecode> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let required = if binary {
        BINARY_BANNER_TOKENS
    } else {
        TEXT_BANNER_TOKENS
    };
    if tokens.len() < required {
        return Err(MmioError::PrematureEof("banner"));
    }

    if !tokens[0].starts_with(MATRIX_MARKET_BANNER) {
        return Err(MmioError::NoHeader);
    }

    let object = tokens[1].to_lowercase();
    if object != MTX_STR {
        return Err(unsupported("object", &object));
    }

    let shape = tokens[2].to_lowercase();
    let shape = Shape::from_token(&shape).ok_or_else(|| unsupported("storage", &shape))?;

    let field = tokens[3].to_lowercase();
    let field = Field::from_token(&field).ok_or_else(|| unsupported("field", &field))?;

    let symmetry = tokens[4].to_lowercase();
    let symmetry =
        Symmetry::from_token(&symmetry).ok_or_else(|| unsupported("symmetry", &symmetry))?;

    let widths = if binary {
        let idx_bytes = parse_width(tokens[5], "index width")?;
        let val_bytes = parse_width(tokens[6], "value width")?;

        if !SUPPORTED_INDEX_BYTES.contains(&idx_bytes) {
            return Err(unsupported("index width", tokens[5]));
        }
        if field != Field::Pattern && !SUPPORTED_VALUE_BYTES.contains(&val_bytes) {
            return Err(unsupported("value width", tokens[6]));
        }

        Some(BinaryWidths {
            idx_bytes,
            val_bytes,
        })
    } else {
        None
    };

    Ok(Typecode {
        shape,
        field,
        symmetry,
        widths,
    })
}

/// Reads and parses the first line of the stream
pub fn read_banner<R: BufRead>(reader: &mut R, binary: bool) -> Result<Typecode> {
    let mut line = String::new();
    if !read_text_line(reader, &mut line)? {
        return Err(MmioError::PrematureEof("banner"));
    }

    let typecode = parse_banner(&line, binary)?;
    debug!("Decoded banner: {}", typecode.banner());
    Ok(typecode)
}

/// Writes the banner line for `typecode`, widths included when present
pub fn write_banner<W: Write>(writer: &mut W, typecode: &Typecode) -> Result<()> {
    writeln!(writer, "{}", typecode.banner())?;
    Ok(())
}

fn parse_width(token: &str, context: &'static str) -> Result<u8> {
    token.parse().map_err(|_| MmioError::InvalidToken {
        context,
        token: token.to_string(),
    })
}

fn unsupported(what: &str, token: &str) -> MmioError {
    MmioError::UnsupportedType(format!("unknown {} {:?}", what, token))
}
