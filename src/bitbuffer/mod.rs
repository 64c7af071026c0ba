//! # Bit Buffer Module
//!
//! Captured bit rows handed over by the demodulation front end.
//!
//! This module handles:
//! - Immutable rows with an exact bit count
//! - Ordered row storage for one reception window
//! - Prefix comparison of rows that ignores bits past a given length

use bytes::Bytes;

/// One captured row of demodulated bits
///
/// Bits are stored MSB-first. Bits past `bit_len` in the last byte are
/// padding and never take part in comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRow {
    bytes: Bytes,
    bit_len: usize,
}

impl BitRow {
    /// Create a row from a byte buffer and an exact bit count
    ///
    /// The buffer is truncated to the bytes needed for `bit_len` bits.
    /// Missing trailing bytes are zero filled.
    pub fn new(bytes: impl Into<Bytes>, bit_len: usize) -> Self {
        let mut bytes: Bytes = bytes.into();
        let needed = bit_len.div_ceil(8);

        if bytes.len() > needed {
            bytes.truncate(needed);
        } else if bytes.len() < needed {
            let mut padded = bytes.to_vec();
            padded.resize(needed, 0);
            bytes = Bytes::from(padded);
        }

        Self { bytes, bit_len }
    }

    /// Create a row whose length is a whole number of bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes), bytes.len() * 8)
    }

    /// Exact number of captured bits
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Row content as bytes (last byte may be partially used)
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Compare the first `bits` bits of two rows
    ///
    /// Returns false when either row is shorter than `bits`.
    pub fn prefix_eq(&self, other: &BitRow, bits: usize) -> bool {
        if self.bit_len < bits || other.bit_len < bits {
            return false;
        }

        let full = bits / 8;
        if self.bytes[..full] != other.bytes[..full] {
            return false;
        }

        let rem = bits % 8;
        if rem == 0 {
            return true;
        }

        let mask = 0xFFu8 << (8 - rem);
        (self.bytes[full] & mask) == (other.bytes[full] & mask)
    }
}

/// All rows captured in one reception window, in capture order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitRowStore {
    rows: Vec<BitRow>,
}

impl BitRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a captured row
    pub fn push(&mut self, row: BitRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[BitRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&BitRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<BitRow> for BitRowStore {
    fn from_iter<I: IntoIterator<Item = BitRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_truncates_and_pads() {
        let row = BitRow::new(vec![0xAA, 0xBB, 0xCC], 12);
        assert_eq!(row.bytes(), &[0xAA, 0xBB]);
        assert_eq!(row.bit_len(), 12);

        let row = BitRow::new(vec![0xAA], 20);
        assert_eq!(row.bytes(), &[0xAA, 0x00, 0x00]);
    }

    #[test]
    fn test_prefix_eq_ignores_padding_bits() {
        let a = BitRow::new(vec![0xFF, 0xF0], 12);
        let b = BitRow::new(vec![0xFF, 0xFF], 12);
        assert!(a.prefix_eq(&b, 12));
        assert!(!a.prefix_eq(&b, 16));
    }

    #[test]
    fn test_prefix_eq_partial_byte() {
        let a = BitRow::from_bytes(&[0x12, 0b1010_0000]);
        let b = BitRow::from_bytes(&[0x12, 0b1011_0000]);
        assert!(a.prefix_eq(&b, 11));
        assert!(!a.prefix_eq(&b, 12));
    }

    #[test]
    fn test_prefix_eq_short_row() {
        let a = BitRow::from_bytes(&[0x12]);
        let b = BitRow::from_bytes(&[0x12, 0x34]);
        assert!(!a.prefix_eq(&b, 16));
        assert!(a.prefix_eq(&b, 8));
    }

    #[test]
    fn test_store_collect() {
        let store: BitRowStore = (0..3u8).map(|i| BitRow::from_bytes(&[i])).collect();
        assert_eq!(store.len(), 3);
        assert_eq!(store.row(2).map(|r| r.bytes()[0]), Some(2));
        assert!(store.row(3).is_none());
        assert!(BitRowStore::new().is_empty());
    }
}
