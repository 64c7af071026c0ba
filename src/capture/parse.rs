//! # Capture Text Parser
//!
//! Parses bit rows printed by an rtl_433 style front end.
//!
//! Two row formats are accepted:
//!
//! ```text
//! [00] {120} 55 5a 7c 00 6a a5 60 e7 3f 36 da ff 5d 38 ff
//! {120}555a7c006aa560e73f36daff5d38ff
//! ```
//!
//! The row index in brackets is informational only.

use crate::bitbuffer::BitRow;
use crate::error::{DecoderError, Result};

/// Classification of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A captured row
    Row(BitRow),
    /// End of the current transmission
    Blank,
    /// Anything else (headers, comments, front end chatter)
    Other,
}

/// Classify and parse one line
///
/// # Errors
///
/// Returns `DecoderError::RowParse` for a line that looks like a row but
/// cannot be parsed.
pub fn parse_line(line: &str) -> Result<Line> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    let rest = match line.strip_prefix('[') {
        Some(indexed) => match indexed.split_once(']') {
            Some((_, rest)) => rest.trim_start(),
            None => return Ok(Line::Other),
        },
        None => line,
    };

    if !rest.starts_with('{') {
        return Ok(Line::Other);
    }

    parse_row(rest).map(Line::Row)
}

/// Parse `{bits}hex` into a row
pub fn parse_row(text: &str) -> Result<BitRow> {
    let body = text
        .strip_prefix('{')
        .ok_or_else(|| DecoderError::RowParse(format!("missing bit count in '{}'", text)))?;

    let (count, hex_part) = body
        .split_once('}')
        .ok_or_else(|| DecoderError::RowParse(format!("unterminated bit count in '{}'", text)))?;

    let bits: usize = count
        .trim()
        .parse()
        .map_err(|_| DecoderError::RowParse(format!("invalid bit count '{}'", count)))?;

    let mut digits: String = hex_part.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 == 1 {
        digits.push('0');
    }

    let bytes = hex::decode(&digits)
        .map_err(|e| DecoderError::RowParse(format!("invalid hex '{}': {}", digits, e)))?;

    if bytes.len() * 8 < bits {
        return Err(DecoderError::RowParse(format!(
            "{} bits declared but only {} supplied",
            bits,
            bytes.len() * 8
        )));
    }

    Ok(BitRow::new(bytes, bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_row() {
        let line = "[03] {120} 55 5a 7c 00 6a a5 60 e7 3f 36 da ff 5d 38 fc";
        let Line::Row(row) = parse_line(line).unwrap() else {
            panic!("expected a row");
        };
        assert_eq!(row.bit_len(), 120);
        assert_eq!(&row.bytes()[..3], &[0x55, 0x5A, 0x7C]);
        assert_eq!(row.bytes()[14], 0xFC);
    }

    #[test]
    fn test_compact_row() {
        let Line::Row(row) = parse_line("{12}abc").unwrap() else {
            panic!("expected a row");
        };
        assert_eq!(row.bit_len(), 12);
        assert_eq!(row.bytes(), &[0xAB, 0xC0]);
    }

    #[test]
    fn test_blank_and_other_lines() {
        assert_eq!(parse_line("   ").unwrap(), Line::Blank);
        assert_eq!(parse_line("Detected OOK package").unwrap(), Line::Other);
        assert_eq!(parse_line("[pulse_slicer_pwm] EMOS").unwrap(), Line::Other);
    }

    #[test]
    fn test_malformed_rows() {
        assert!(parse_line("{120} 55 5a").is_err());
        assert!(parse_line("{abc} 55").is_err());
        assert!(parse_line("{8} zz").is_err());
        assert!(parse_line("{8 55").is_err());
    }
}
