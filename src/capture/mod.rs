//! # Capture Input Module
//!
//! Reads transmissions from a text stream produced by the demodulation
//! front end.
//!
//! This module handles:
//! - Line-by-line async reading from stdin or a file
//! - Grouping rows into transmissions (blank line or end of input)
//! - Skipping malformed rows without dropping the whole transmission

pub mod parse;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{trace, warn};

use crate::bitbuffer::BitRowStore;
use crate::error::Result;
use parse::{parse_line, Line};

/// Async source of transmissions
pub struct TransmissionReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin> TransmissionReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Read the next non-empty transmission
    ///
    /// # Returns
    ///
    /// * `Ok(None)` at end of input
    pub async fn next_transmission(&mut self) -> Result<Option<BitRowStore>> {
        let mut store = BitRowStore::new();

        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;

            match parse_line(&line) {
                Ok(Line::Row(row)) => store.push(row),
                Ok(Line::Blank) if !store.is_empty() => return Ok(Some(store)),
                Ok(Line::Blank) => {}
                Ok(Line::Other) => trace!(line = self.line_no, "ignoring '{}'", line),
                Err(e) => warn!("Skipping row on line {}: {}", self.line_no, e),
            }
        }

        if store.is_empty() {
            Ok(None)
        } else {
            Ok(Some(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
Detected OOK package
[00] {120} 55 5a 7c 00 6a a5 60 e7 3f 36 da ff 5d 38 ff
[01] {120} 55 5a 7c 00 6a a5 60 e7 3f 36 da ff 5d 38 fe
[02] {120} zz

{8}aa
{8}bb
";

    #[test]
    fn test_groups_rows_into_transmissions() {
        tokio_test::block_on(async {
            let mut reader = TransmissionReader::new(INPUT.as_bytes());

            let first = reader.next_transmission().await.unwrap().unwrap();
            assert_eq!(first.len(), 2);
            assert_eq!(first.rows()[1].bytes()[14], 0xFE);

            let second = reader.next_transmission().await.unwrap().unwrap();
            assert_eq!(second.len(), 2);
            assert_eq!(second.rows()[0].bytes(), &[0xAA]);

            assert!(reader.next_transmission().await.unwrap().is_none());
        });
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        tokio_test::block_on(async {
            let mut reader = TransmissionReader::new("\n\n{8}01\n".as_bytes());
            let store = reader.next_transmission().await.unwrap().unwrap();
            assert_eq!(store.len(), 1);
            assert!(reader.next_transmission().await.unwrap().is_none());
        });
    }
}
