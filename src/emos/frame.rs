//! # Frame Validation
//!
//! Structural checks on the representative row and the one-time bit
//! inversion.
//!
//! A [`WireFrame`] holds the validated row exactly as received. Calling
//! [`WireFrame::invert`] consumes it and yields a [`Frame`], so the
//! inversion happens once and only after the signature check.

use super::protocol::ProtocolSpec;
use crate::bitbuffer::BitRow;
use crate::error::DecodeError;

/// A structurally valid row, not yet inverted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    row: usize,
    bytes: Vec<u8>,
}

/// An inverted frame, ready for checksum and field extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    row: usize,
    bytes: Vec<u8>,
}

/// Check length and signature of the representative row
///
/// # Arguments
///
/// * `spec` - Protocol description
/// * `index` - Index of the row in its store, kept for diagnostics
/// * `row` - The representative row
///
/// # Errors
///
/// Returns error if:
/// - The row is not exactly `spec.frame_bits` long
/// - The first three bytes differ from `spec.magic`
pub fn validate(spec: &ProtocolSpec, index: usize, row: &BitRow) -> Result<WireFrame, DecodeError> {
    if row.bit_len() != spec.frame_bits {
        return Err(DecodeError::LengthMismatch {
            row: index,
            expected: spec.frame_bits,
            actual: row.bit_len(),
        });
    }

    let bytes = row.bytes().to_vec();

    if !bytes.starts_with(&spec.magic) {
        let mut actual = [0u8; 3];
        for (dst, src) in actual.iter_mut().zip(&bytes) {
            *dst = *src;
        }
        return Err(DecodeError::SignatureMismatch {
            row: index,
            expected: spec.magic,
            actual,
        });
    }

    Ok(WireFrame { row: index, bytes })
}

impl WireFrame {
    /// Invert every bit; the sensor transmits inverted logic levels
    pub fn invert(self) -> Frame {
        Frame {
            row: self.row,
            bytes: self.bytes.into_iter().map(|b| !b).collect(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Frame {
    /// Index of the source row in its store
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
