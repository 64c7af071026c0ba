//! # Row Consensus
//!
//! Finds a row repeated enough times to defeat single-copy bit errors.

use crate::bitbuffer::BitRowStore;
use crate::error::DecodeError;

/// Find the first row that has at least `min_repeats` identical copies
///
/// Rows are compared over their first `match_bits` bits and must have the
/// same total bit length. The row itself counts as one copy.
///
/// # Errors
///
/// Returns `DecodeError::ConsensusFailure` with the largest group size seen
/// when no row qualifies.
pub fn find_repeated_row(
    store: &BitRowStore,
    min_repeats: usize,
    match_bits: usize,
) -> Result<usize, DecodeError> {
    let rows = store.rows();
    let mut best = 0;

    for (i, candidate) in rows.iter().enumerate() {
        if candidate.bit_len() < match_bits {
            continue;
        }

        let count = rows
            .iter()
            .filter(|other| {
                other.bit_len() == candidate.bit_len() && candidate.prefix_eq(other, match_bits)
            })
            .count();

        if count >= min_repeats {
            return Ok(i);
        }
        best = best.max(count);
    }

    Err(DecodeError::ConsensusFailure {
        required: min_repeats,
        rows: rows.len(),
        best,
    })
}
